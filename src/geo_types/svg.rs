use crate::procgeo::shapes::{RectShape, ShapePoints};
use geo_types::Point;
use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::Document;

/// Blank document whose viewBox is exactly the generator viewport, so shape
/// coordinates can be dropped in untransformed.
pub fn create_svg_document(width: u32, height: u32) -> Document {
    Document::new()
        .set("viewBox", (0.0, 0.0, f64::from(width), f64::from(height)))
        .set("width", format!("{}px", width))
        .set("height", format!("{}px", height))
}

fn to_f64(pt: &Point<i64>) -> (f64, f64) {
    (pt.x() as f64, pt.y() as f64)
}

/// Polyline path data through the given points.
fn polyline_data(points: &[Point<i64>], closed: bool) -> Data {
    let mut svg_data = Data::new();
    for point in points.iter().take(1) {
        svg_data = svg_data.move_to(to_f64(point));
    }
    for point in points.iter().skip(1) {
        svg_data = svg_data.line_to(to_f64(point));
    }
    if closed {
        svg_data = svg_data.close();
    }
    svg_data
}

pub trait ToSvg {
    /// Convert the shape into SVG path data
    fn to_path_data(&self) -> Data;

    /// Unfilled, black stroked path for the shape.
    fn to_path(&self) -> Path {
        Path::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1)
            .set("d", self.to_path_data())
    }
}

impl ToSvg for RectShape {
    fn to_path_data(&self) -> Data {
        polyline_data(&self.corners(), true)
    }
}

/// Lines.
impl ToSvg for ShapePoints<2> {
    fn to_path_data(&self) -> Data {
        polyline_data(&self.points(), false)
    }
}

/// Open triangles: pt0 -> center -> pt1, never closed.
impl ToSvg for ShapePoints<3> {
    fn to_path_data(&self) -> Data {
        polyline_data(&self.points(), false)
    }
}
