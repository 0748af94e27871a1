use crate::errors::{ProcGeoError, Result};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MIN_PTS_DISTANCE: u32 = 10;
pub const DEFAULT_MARGIN_SAFE_AREA: u32 = 1;

fn default_min_pts_distance() -> u32 {
    DEFAULT_MIN_PTS_DISTANCE
}

fn default_margin_safe_area() -> u32 {
    DEFAULT_MARGIN_SAFE_AREA
}

/// Serializable generator settings. Written as RON, e.g.
///
/// ```ron
/// (width: 500, height: 500, min_pts_distance: 10, margin_safe_area: 60)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcGeoConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_min_pts_distance")]
    pub min_pts_distance: u32,
    #[serde(default = "default_margin_safe_area")]
    pub margin_safe_area: u32,
    /// Upper bound for open triangle arms. Unset means margin_safe_area is
    /// used, which is how the generator has always behaved.
    #[serde(default)]
    pub max_arm_length: Option<u32>,
}

impl ProcGeoConfig {
    pub fn new(width: u32, height: u32) -> ProcGeoConfig {
        ProcGeoConfig {
            width,
            height,
            min_pts_distance: DEFAULT_MIN_PTS_DISTANCE,
            margin_safe_area: DEFAULT_MARGIN_SAFE_AREA,
            max_arm_length: None,
        }
    }

    pub fn from_ron_str(text: &str) -> Result<ProcGeoConfig> {
        ron::from_str(text).map_err(|e| ProcGeoError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ProcGeoConfig> {
        let text = fs::read_to_string(path)?;
        ProcGeoConfig::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, PrettyConfig::new())
            .map_err(|e| ProcGeoError::Config(e.to_string()))
    }
}
