use geo::Rotate;
use geo_types::{coord, LineString, Point};
use serde::{Deserialize, Serialize};

/// An OpenCV style box: center, (width, height) and a rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Point<i64>,
    pub size: (i64, i64),
    pub angle: f64,
}

impl RotatedRect {
    pub fn new(center: Point<i64>, size: (i64, i64), angle: f64) -> RotatedRect {
        RotatedRect {
            center,
            size,
            angle,
        }
    }
}

/// Corners of a (possibly rotated) rectangle, in `boxPoints` order. For an
/// unrotated box that is bottom-left, top-left, top-right, bottom-right with
/// y growing downwards. Coordinates are left as floats; callers truncate.
pub fn rect_corners(rect: &RotatedRect) -> [Point<f64>; 4] {
    let cx = rect.center.x() as f64;
    let cy = rect.center.y() as f64;
    let hw = rect.size.0 as f64 / 2.0;
    let hh = rect.size.1 as f64 / 2.0;
    let outline = LineString::new(vec![
        coord! {x: cx - hw, y: cy + hh},
        coord! {x: cx - hw, y: cy - hh},
        coord! {x: cx + hw, y: cy - hh},
        coord! {x: cx + hw, y: cy + hh},
    ]);
    let outline = if rect.angle == 0.0 {
        outline
    } else {
        outline.rotate_around_point(rect.angle, Point::new(cx, cy))
    };
    let mut corners = [Point::new(0.0, 0.0); 4];
    for (corner, c) in corners.iter_mut().zip(outline.coords()) {
        *corner = Point::from(*c);
    }
    corners
}

/// Drop the fractional part of both coordinates (toward zero, not rounding).
pub fn truncate_point(pt: Point<f64>) -> Point<i64> {
    Point::new(pt.x() as i64, pt.y() as i64)
}

/// The two output flavours every generator supports: a homogeneous array of
/// points, or plain coordinate tuples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapePoints<const N: usize> {
    Array([Point<i64>; N]),
    Tuples([(i64, i64); N]),
}

impl<const N: usize> ShapePoints<N> {
    pub fn new(points: [Point<i64>; N], as_array: bool) -> Self {
        if as_array {
            ShapePoints::Array(points)
        } else {
            ShapePoints::Tuples(points.map(|pt| pt.x_y()))
        }
    }

    /// The points, whichever flavour this is.
    pub fn points(&self) -> [Point<i64>; N] {
        match self {
            ShapePoints::Array(points) => *points,
            ShapePoints::Tuples(tuples) => tuples.map(|(x, y)| Point::new(x, y)),
        }
    }

    pub fn tuples(&self) -> [(i64, i64); N] {
        self.points().map(|pt| pt.x_y())
    }
}

/// What [`crate::procgeo::ProcGeo::get_random_rect`] hands back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectShape {
    Corners([Point<i64>; 4]),
    Descriptor(RotatedRect),
}

impl RectShape {
    /// Corner points, deriving them from the descriptor if need be.
    pub fn corners(&self) -> [Point<i64>; 4] {
        match self {
            RectShape::Corners(corners) => *corners,
            RectShape::Descriptor(rect) => rect_corners(rect).map(truncate_point),
        }
    }
}
