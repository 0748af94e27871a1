//! Random rects, lines and open triangles that are guaranteed to land inside
//! a viewport.
//!
//! Every generator either hands back a shape whose points all satisfy
//! `0 <= x <= width` and `0 <= y <= height`, or fails. Nothing is silently
//! clamped and nothing is retried; if the random draw can't be placed, you get
//! a [`ProcGeoError`] and are free to try again.
//!
//! ```
//! use aoer_procgeo::prelude::*;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut rng = SmallRng::seed_from_u64(12345);
//! let procgeo = ProcGeo::new((500, 500), 10, 1).unwrap();
//! let line = procgeo.get_random_line(&mut rng, 43, 47, true).unwrap();
//! for pt in line.points() {
//!     assert!(pt.x() >= 0 && pt.x() <= 500);
//! }
//! ```

/// Range clamping and integer sampling helpers.
pub mod bounds;

/// RON loadable generator settings.
pub mod config;

/// Shape descriptors and the two output flavours.
pub mod shapes;

use crate::errors::{ProcGeoError, Result};
use bounds::{
    clamp_dual_offset, clamp_single_offset, sample_range, sample_range_or_fixed, truncate_range,
};
use config::{ProcGeoConfig, DEFAULT_MARGIN_SAFE_AREA, DEFAULT_MIN_PTS_DISTANCE};
use geo_types::Point;
use log::debug;
use rand::Rng;
use shapes::{rect_corners, truncate_point, RectShape, RotatedRect, ShapePoints};

/// Bounded random shape generator. Holds configuration only, so one instance
/// can be shared freely; the randomness comes from the `Rng` passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcGeo {
    width: u32,
    height: u32,
    min_pts_distance: u32,
    margin_safe_area: u32,
    max_arm_length: Option<u32>,
}

impl ProcGeo {
    pub fn new(bounds: (u32, u32), min_pts_distance: u32, margin_safe_area: u32) -> Result<ProcGeo> {
        let (width, height) = bounds;
        if width == 0 || height == 0 {
            return Err(ProcGeoError::InvalidViewport { width, height });
        }
        Ok(ProcGeo {
            width,
            height,
            min_pts_distance,
            margin_safe_area,
            max_arm_length: None,
        })
    }

    /// Viewport only, with a min distance of 10 and a 1 unit margin.
    pub fn with_bounds(bounds: (u32, u32)) -> Result<ProcGeo> {
        ProcGeo::new(bounds, DEFAULT_MIN_PTS_DISTANCE, DEFAULT_MARGIN_SAFE_AREA)
    }

    pub fn from_config(config: &ProcGeoConfig) -> Result<ProcGeo> {
        Ok(ProcGeo::new(
            (config.width, config.height),
            config.min_pts_distance,
            config.margin_safe_area,
        )?
        .with_max_arm_length(config.max_arm_length))
    }

    /// Decouple the open triangle arm length from the margin. `None` keeps the
    /// old behaviour of sampling arms from `[min_pts_distance, margin_safe_area)`.
    pub fn with_max_arm_length(mut self, max_arm_length: Option<u32>) -> ProcGeo {
        self.max_arm_length = max_arm_length;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn min_pts_distance(&self) -> u32 {
        self.min_pts_distance
    }

    pub fn margin_safe_area(&self) -> u32 {
        self.margin_safe_area
    }

    pub fn max_arm_length(&self) -> Option<u32> {
        self.max_arm_length
    }

    /// Fails with [`ProcGeoError::OutOfViewport`] unless `pt` is inside
    /// `[0, width] x [0, height]`.
    pub fn verify_inside_viewport(&self, pt: Point<i64>, label: &str) -> Result<()> {
        if pt.x() < 0
            || pt.y() < 0
            || pt.x() > i64::from(self.width)
            || pt.y() > i64::from(self.height)
        {
            return Err(ProcGeoError::OutOfViewport {
                label: label.to_string(),
                x: pt.x(),
                y: pt.y(),
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Axis aligned rectangle somewhere in the viewport.
    ///
    /// Width and height are drawn from `[min_pts_distance, dim - min_pts_distance)`
    /// and the center is placed so the corners can't leave the viewport. With
    /// `as_array` you get the four corners, otherwise the `(center, size, 0)`
    /// descriptor.
    pub fn get_random_rect<R>(&self, rng: &mut R, as_array: bool) -> Result<RectShape>
    where
        R: Rng + ?Sized,
    {
        let vw = i64::from(self.width);
        let vh = i64::from(self.height);
        let min_dist = i64::from(self.min_pts_distance);

        let width = sample_range(rng, "rect width", min_dist, vw - min_dist)?;
        let height = sample_range(rng, "rect height", min_dist, vh - min_dist)?;

        let (low, high) = truncate_range(width as f64 * 0.5, vw as f64 - width as f64 * 0.5);
        let center_x = sample_range(rng, "rect center x", low, high)?;
        let (low, high) = truncate_range(height as f64 * 0.5, vh as f64 - height as f64 * 0.5);
        let center_y = sample_range(rng, "rect center y", low, high)?;

        let rect = RotatedRect::new(Point::new(center_x, center_y), (width, height), 0.0);
        let corners = rect_corners(&rect).map(truncate_point);
        for (idx, pt) in corners.iter().enumerate() {
            self.verify_inside_viewport(*pt, &format!("Rect{}", idx))?;
        }
        debug!("rect: {:?}", rect);

        if as_array {
            Ok(RectShape::Corners(corners))
        } else {
            Ok(RectShape::Descriptor(rect))
        }
    }

    /// Straight line at an integer angle (degrees) picked from
    /// `[start_angle_range_degree, end_angle_range_degree)`. Equal bounds pin the
    /// angle exactly.
    pub fn get_random_line<R>(
        &self,
        rng: &mut R,
        start_angle_range_degree: i64,
        end_angle_range_degree: i64,
        as_array: bool,
    ) -> Result<ShapePoints<2>>
    where
        R: Rng + ?Sized,
    {
        let angle_degree = pick_line_angle(rng, start_angle_range_degree, end_angle_range_degree)?;
        let angle = (angle_degree as f64).to_radians();

        // How much of each axis the longest segment at this angle can cover.
        let x_projection = (1.0 / angle.tan()).abs().clamp(0.0, 1.0);
        let y_projection = angle.tan().abs().clamp(0.0, 1.0);

        let margin = f64::from(self.margin_safe_area);
        let vw = f64::from(self.width);
        let vh = f64::from(self.height);
        let max_length_x = x_projection * (vw - margin * 2.0);
        let max_length_y = y_projection * (vh - margin * 2.0);
        let max_length = max_length_x.hypot(max_length_y);

        let length = sample_range(
            rng,
            "line length",
            i64::from(self.min_pts_distance),
            max_length as i64,
        )? as f64;

        let pt1_rel = Point::new(angle.cos() * length, angle.sin() * length);

        let (x_low, x_high) =
            clamp_single_offset("line origin x", pt1_rel.x(), margin, vw - margin)?;
        let (y_low, y_high) =
            clamp_single_offset("line origin y", pt1_rel.y(), margin, vh - margin)?;

        let (x_low, x_high) = truncate_range(x_low, x_high);
        let (y_low, y_high) = truncate_range(y_low, y_high);
        let pt0 = Point::new(
            sample_range_or_fixed(rng, "line origin x", x_low, x_high)?,
            sample_range_or_fixed(rng, "line origin y", y_low, y_high)?,
        );
        let pt1 = truncate_point(Point::new(pt0.x() as f64, pt0.y() as f64) + pt1_rel);

        self.verify_inside_viewport(pt0, "Line0")?;
        self.verify_inside_viewport(pt1, "Line1")?;
        debug!(
            "line: {} deg, length {} of max {:.2}: {:?} -> {:?}",
            angle_degree, length, max_length, pt0, pt1
        );

        Ok(ShapePoints::new([pt0, pt1], as_array))
    }

    /// Two arms of equal length sharing a vertex, returned as
    /// `(pt0, center, pt1)`. The arm angles are integer degrees inside
    /// `[start_angle_degree, end_angle_degree)`, at least `min_angle_degree`
    /// apart. Arm length is drawn from `[min_pts_distance, margin_safe_area)`
    /// unless a max arm length was configured.
    pub fn get_random_open_triangles<R>(
        &self,
        rng: &mut R,
        start_angle_degree: i64,
        end_angle_degree: i64,
        min_angle_degree: i64,
        as_array: bool,
    ) -> Result<ShapePoints<3>>
    where
        R: Rng + ?Sized,
    {
        let (start_angle, end_angle) =
            pick_arm_angles(rng, start_angle_degree, end_angle_degree, min_angle_degree)?;
        let start_rad = (start_angle as f64).to_radians();
        let end_rad = (end_angle as f64).to_radians();

        let arm_limit = self.max_arm_length.unwrap_or(self.margin_safe_area);
        let length = sample_range(
            rng,
            "triangle arm length",
            i64::from(self.min_pts_distance),
            i64::from(arm_limit),
        )? as f64;

        let pt0_rel = Point::new(start_rad.cos() * length, start_rad.sin() * length);
        let pt1_rel = Point::new(end_rad.cos() * length, end_rad.sin() * length);

        let min_dist = f64::from(self.min_pts_distance);
        let margin = f64::from(self.margin_safe_area);
        let (x_low, x_high) = clamp_dual_offset(
            "triangle center x",
            pt0_rel.x(),
            pt1_rel.x(),
            min_dist,
            f64::from(self.width) - margin,
        )?;
        let (y_low, y_high) = clamp_dual_offset(
            "triangle center y",
            pt0_rel.y(),
            pt1_rel.y(),
            min_dist,
            f64::from(self.height) - margin,
        )?;

        let (x_low, x_high) = truncate_range(x_low, x_high);
        let (y_low, y_high) = truncate_range(y_low, y_high);
        let center = Point::new(
            sample_range(rng, "triangle center x", x_low, x_high)?,
            sample_range(rng, "triangle center y", y_low, y_high)?,
        );
        let center_f = Point::new(center.x() as f64, center.y() as f64);
        let pt0 = truncate_point(center_f + pt0_rel);
        let pt1 = truncate_point(center_f + pt1_rel);

        self.verify_inside_viewport(center, "OpenTriC")?;
        self.verify_inside_viewport(pt0, "OpenTri0")?;
        self.verify_inside_viewport(pt1, "OpenTri1")?;
        debug!(
            "open triangle: arms at {}/{} deg, length {}: {:?} {:?} {:?}",
            start_angle, end_angle, length, pt0, center, pt1
        );

        Ok(ShapePoints::new([pt0, center, pt1], as_array))
    }
}

/// Equal bounds are the exact-angle mode and never touch the rng.
fn pick_line_angle<R>(rng: &mut R, start: i64, end: i64) -> Result<i64>
where
    R: Rng + ?Sized,
{
    if start == end {
        return Ok(start);
    }
    sample_range(rng, "line angle", start, end)
}

/// Start angle first, then an end angle at least `min_angle` past it, both
/// inside `[start, end)`.
fn pick_arm_angles<R>(rng: &mut R, start: i64, end: i64, min_angle: i64) -> Result<(i64, i64)>
where
    R: Rng + ?Sized,
{
    if min_angle < 0 {
        return Err(ProcGeoError::InvalidRange {
            quantity: "triangle min angle".to_string(),
            low: 0.0,
            high: min_angle as f64,
        });
    }
    let overflow = || ProcGeoError::InvalidRange {
        quantity: format!("triangle angles ({}..{} with min {})", start, end, min_angle),
        low: start as f64,
        high: end as f64,
    };
    let start_high = end.checked_sub(min_angle).ok_or_else(overflow)?;
    let start_angle = sample_range(rng, "triangle start angle", start, start_high)?;
    let end_low = start_angle.checked_add(min_angle).ok_or_else(overflow)?;
    let end_angle = sample_range(rng, "triangle end angle", end_low, end)?;
    Ok((start_angle, end_angle))
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn assert_inside(procgeo: &ProcGeo, points: &[Point<i64>]) {
        for pt in points {
            assert!(
                pt.x() >= 0
                    && pt.y() >= 0
                    && pt.x() <= i64::from(procgeo.width())
                    && pt.y() <= i64::from(procgeo.height()),
                "{:?} outside {}x{}",
                pt,
                procgeo.width(),
                procgeo.height()
            );
        }
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let err = ProcGeo::with_bounds((0, 100)).unwrap_err();
        assert!(matches!(err, ProcGeoError::InvalidViewport { .. }));
    }

    #[test]
    fn test_from_config() {
        let cfg = ProcGeoConfig {
            margin_safe_area: 40,
            max_arm_length: Some(25),
            ..ProcGeoConfig::new(320, 240)
        };
        let procgeo = ProcGeo::from_config(&cfg).unwrap();
        assert_eq!(procgeo.width(), 320);
        assert_eq!(procgeo.height(), 240);
        assert_eq!(procgeo.min_pts_distance(), 10);
        assert_eq!(procgeo.margin_safe_area(), 40);
        assert_eq!(procgeo.max_arm_length(), Some(25));
    }

    #[test]
    fn test_verify_inside_viewport_edges() {
        let procgeo = ProcGeo::with_bounds((100, 50)).unwrap();
        assert!(procgeo.verify_inside_viewport(Point::new(0, 0), "a").is_ok());
        assert!(procgeo.verify_inside_viewport(Point::new(100, 50), "b").is_ok());
        let err = procgeo
            .verify_inside_viewport(Point::new(101, 3), "Line1")
            .unwrap_err();
        match err {
            ProcGeoError::OutOfViewport { label, x, .. } => {
                assert_eq!(label, "Line1");
                assert_eq!(x, 101);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(procgeo.verify_inside_viewport(Point::new(5, -1), "c").is_err());
    }

    #[test]
    fn test_rect_corners_inside() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let procgeo = ProcGeo::with_bounds((500, 500)).unwrap();
        for _ in 0..200 {
            let rect = procgeo.get_random_rect(&mut rng, true).unwrap();
            assert!(matches!(rect, RectShape::Corners(_)));
            assert_inside(&procgeo, &rect.corners());
        }
    }

    #[test]
    fn test_rect_descriptor_is_unrotated() {
        let mut rng = SmallRng::seed_from_u64(7);
        let procgeo = ProcGeo::with_bounds((300, 200)).unwrap();
        for _ in 0..100 {
            match procgeo.get_random_rect(&mut rng, false).unwrap() {
                RectShape::Descriptor(rect) => {
                    assert_eq!(rect.angle, 0.0);
                    assert!(rect.size.0 >= 10 && rect.size.0 < 290);
                    assert!(rect.size.1 >= 10 && rect.size.1 < 190);
                }
                other => panic!("expected a descriptor, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rect_viewport_too_small() {
        let mut rng = SmallRng::seed_from_u64(1);
        for size in [(15, 100), (100, 20), (5, 5)] {
            let procgeo = ProcGeo::with_bounds(size).unwrap();
            let err = procgeo.get_random_rect(&mut rng, true).unwrap_err();
            assert!(
                matches!(err, ProcGeoError::InvalidRange { .. }),
                "{:?}: {:?}",
                size,
                err
            );
        }
    }

    #[test]
    fn test_exact_angle_mode_does_not_sample() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(pick_line_angle(&mut rng, 45, 45).unwrap(), 45);
        }
        // An empty-but-unequal range is still an error.
        assert!(pick_line_angle(&mut rng, 50, 45).is_err());
    }

    #[test]
    fn test_line_exact_angles() {
        let mut rng = SmallRng::seed_from_u64(4242);
        let procgeo = ProcGeo::with_bounds((500, 500)).unwrap();
        for _ in 0..100 {
            let [pt0, pt1] = procgeo.get_random_line(&mut rng, 90, 90, true).unwrap().points();
            assert_eq!(pt0.x(), pt1.x());
            assert!(pt1.y() - pt0.y() >= 10);

            let [pt0, pt1] = procgeo.get_random_line(&mut rng, 0, 0, true).unwrap().points();
            assert_eq!(pt0.y(), pt1.y());
            assert!(pt1.x() - pt0.x() >= 10);

            let [pt0, pt1] = procgeo.get_random_line(&mut rng, 45, 45, false).unwrap().points();
            let dx = pt1.x() - pt0.x();
            let dy = pt1.y() - pt0.y();
            assert!((dx - dy).abs() <= 1, "{} vs {}", dx, dy);
        }
    }

    #[test]
    fn test_line_square_viewport_never_fails() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let procgeo = ProcGeo::with_bounds((500, 500)).unwrap();
        for (start, end) in [(0, 360), (43, 47), (-90, 90), (170, 190)] {
            for _ in 0..200 {
                let line = procgeo.get_random_line(&mut rng, start, end, true).unwrap();
                assert_inside(&procgeo, &line.points());
            }
        }
    }

    #[test]
    fn test_line_tuple_output() {
        let mut rng = SmallRng::seed_from_u64(3);
        let procgeo = ProcGeo::with_bounds((500, 500)).unwrap();
        let line = procgeo.get_random_line(&mut rng, 44, 44, false).unwrap();
        assert!(matches!(line, ShapePoints::Tuples(_)));
    }

    #[test]
    fn test_line_too_short_to_fit() {
        let mut rng = SmallRng::seed_from_u64(3);
        // 30 - 2*10 = 10 units of room, min length 10: nothing fits at 0 degrees.
        let procgeo = ProcGeo::new((30, 30), 10, 10).unwrap();
        let err = procgeo.get_random_line(&mut rng, 0, 0, true).unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_arm_angles_are_separated() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..1000 {
            let (start, end) = pick_arm_angles(&mut rng, 0, 360, 5).unwrap();
            assert!(end - start >= 5);
            assert!((0..360).contains(&start));
            assert!((0..360).contains(&end));
        }
        assert!(pick_arm_angles(&mut rng, 10, 15, 5).is_err());
        assert!(pick_arm_angles(&mut rng, 0, 90, -1).is_err());
    }

    #[test]
    fn test_arm_angles_extreme_bounds() {
        let mut rng = SmallRng::seed_from_u64(77);
        let err = pick_arm_angles(&mut rng, i64::MIN, i64::MIN + 3, i64::MAX).unwrap_err();
        assert!(matches!(err, ProcGeoError::InvalidRange { .. }), "{:?}", err);
        // Near the top of the range the arithmetic still works out.
        let (start, end) = pick_arm_angles(&mut rng, i64::MAX - 10, i64::MAX, 5).unwrap();
        assert!(end - start >= 5);
        let procgeo = ProcGeo::new((500, 500), 10, 60).unwrap();
        let err = procgeo
            .get_random_open_triangles(&mut rng, i64::MIN, i64::MIN + 3, i64::MAX, true)
            .unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_triangle_legacy_default_margin_is_infeasible() {
        // min_pts_distance 10, margin 1: arms sample from [10, 1).
        let mut rng = SmallRng::seed_from_u64(5);
        let procgeo = ProcGeo::with_bounds((500, 500)).unwrap();
        let err = procgeo
            .get_random_open_triangles(&mut rng, 0, 360, 5, true)
            .unwrap_err();
        assert!(matches!(err, ProcGeoError::InvalidRange { .. }));
    }

    #[test]
    fn test_triangles_inside() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let procgeo = ProcGeo::new((500, 500), 10, 60).unwrap();
        for _ in 0..500 {
            let tri = procgeo
                .get_random_open_triangles(&mut rng, 0, 360, 5, true)
                .unwrap();
            let [pt0, center, pt1] = tri.points();
            assert_inside(&procgeo, &[pt0, center, pt1]);
            assert!(center.x() < 440 && center.y() < 440);
        }
    }

    #[test]
    fn test_triangle_arm_override() {
        let mut rng = SmallRng::seed_from_u64(8);
        let procgeo = ProcGeo::new((500, 500), 10, 20)
            .unwrap()
            .with_max_arm_length(Some(100));
        let mut longest = 0.0f64;
        for _ in 0..200 {
            let tri = procgeo
                .get_random_open_triangles(&mut rng, 0, 180, 10, false)
                .unwrap();
            assert!(matches!(tri, ShapePoints::Tuples(_)));
            let [pt0, center, _] = tri.points();
            let arm = (((pt0.x() - center.x()).pow(2) + (pt0.y() - center.y()).pow(2)) as f64).sqrt();
            longest = longest.max(arm);
        }
        // Without the override arms would top out below 20.
        assert!(longest > 30.0);
    }

    #[test]
    fn test_long_arms_with_thin_margin_stay_inside() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let procgeo = ProcGeo::new((500, 500), 10, 0)
            .unwrap()
            .with_max_arm_length(Some(100));
        for _ in 0..5000 {
            match procgeo.get_random_open_triangles(&mut rng, 0, 360, 5, true) {
                Ok(tri) => assert_inside(&procgeo, &tri.points()),
                Err(err) => assert!(err.is_invalid_range(), "{}", err),
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_arm_override_never_leaves_viewport(
            seed in any::<u64>(),
            size in 50u32..800,
            min_pts_distance in 1u32..40,
            margin_gap in 1u32..40,
            max_arm_length in 41u32..200,
            start_angle in -360i64..360,
            span in 6i64..360,
        ) {
            // margin below min_pts_distance, arms free to outgrow the margin
            let margin_safe_area = min_pts_distance.saturating_sub(margin_gap);
            let mut rng = SmallRng::seed_from_u64(seed);
            let procgeo = ProcGeo::new((size, size), min_pts_distance, margin_safe_area)
                .unwrap()
                .with_max_arm_length(Some(max_arm_length));
            for _ in 0..20 {
                match procgeo.get_random_open_triangles(&mut rng, start_angle, start_angle + span, 5, true) {
                    Ok(tri) => assert_inside(&procgeo, &tri.points()),
                    Err(err) => prop_assert!(
                        matches!(err, ProcGeoError::InvalidRange { .. }),
                        "{:?}",
                        err
                    ),
                }
            }
        }

        #[test]
        fn prop_shapes_stay_in_viewport(
            seed in any::<u64>(),
            width in 1u32..800,
            height in 1u32..800,
            min_pts_distance in 0u32..40,
            margin_safe_area in 0u32..80,
            start_angle in -360i64..360,
            span in 0i64..360,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let procgeo = ProcGeo::new((width, height), min_pts_distance, margin_safe_area).unwrap();

            match procgeo.get_random_rect(&mut rng, true) {
                Ok(rect) => assert_inside(&procgeo, &rect.corners()),
                Err(err) => prop_assert!(err.is_invalid_range(), "{:?}", err),
            }
            match procgeo.get_random_line(&mut rng, start_angle, start_angle + span, true) {
                Ok(line) => assert_inside(&procgeo, &line.points()),
                Err(err) => prop_assert!(err.is_invalid_range(), "{:?}", err),
            }
            match procgeo.get_random_open_triangles(&mut rng, start_angle, start_angle + span, 5, true) {
                Ok(tri) => assert_inside(&procgeo, &tri.points()),
                Err(err) => prop_assert!(err.is_invalid_range(), "{:?}", err),
            }
        }
    }
}
