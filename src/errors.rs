use std::io;
use thiserror::Error;

/// Result alias for everything that can fail while generating geometry.
pub type Result<T> = std::result::Result<T, ProcGeoError>;

#[derive(Error, Debug)]
pub enum ProcGeoError {
    /// A generated point landed outside `[0, width] x [0, height]`.
    #[error("point {label}({x}, {y}) outside of the viewport ({width},{height})")]
    OutOfViewport {
        label: String,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// A sampling range came out empty or inverted, or an offset is larger
    /// than the bound it's clamped against. The shape parameters can't fit in
    /// the viewport with the current margins.
    #[error("invalid range for {quantity}: low ({low}) must be below high ({high})")]
    InvalidRange {
        quantity: String,
        low: f64,
        high: f64,
    },

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ProcGeoError {
    /// True when the drawn shape couldn't be fitted into the viewport.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, ProcGeoError::InvalidRange { .. })
    }
}
