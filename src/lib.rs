//! Bounded procedural geometry for plotter and render demos.
//!
//! Generates random rectangles, lines and open triangles whose every point is
//! guaranteed to sit inside a `width x height` viewport, respecting a safe
//! margin and a minimum point distance. Shapes come back as plain integer
//! points (or the rect descriptor), ready to be drawn by whatever is on the
//! other end; an SVG helper is included for quick looks.
//!
//! The random source is always passed in, so seed a
//! [`rand::rngs::SmallRng`] if you want reproducible output.

/// Error type shared by everything in the crate
pub mod errors;

/// The random shape generator, its config and range helpers.
pub mod procgeo;

/// geo_types adjacent helpers, currently just SVG output.
pub mod geo_types;

/// Import prelude::* for the generator, its outputs and the SVG helpers.
pub mod prelude {
    pub use crate::errors::{ProcGeoError, Result};
    pub use crate::geo_types::svg::{create_svg_document, ToSvg};
    pub use crate::procgeo::bounds::get_min_max_bounds;
    pub use crate::procgeo::config::ProcGeoConfig;
    pub use crate::procgeo::shapes::{RectShape, RotatedRect, ShapePoints};
    pub use crate::procgeo::ProcGeo;
}
