//! Range helpers shared by the generators.
//!
//! Everything in here works on "where can I put the origin of a shape so that
//! origin + offset stays inside [minimum, maximum]". Ranges are half-open,
//! `[low, high)`, to match the integer sampler.
use crate::errors::{ProcGeoError, Result};
use log::trace;
use rand::Rng;

/// Sampling range for an origin coordinate, given the offset `val` that will
/// be added to it later.
///
/// ```
/// use aoer_procgeo::procgeo::bounds::get_min_max_bounds;
///
/// assert_eq!(get_min_max_bounds(-5.0, 0.0, 10.0).unwrap(), (5.0, 10.0));
/// assert!(get_min_max_bounds(11.0, 0.0, 10.0).is_err());
/// ```
pub fn get_min_max_bounds(val: f64, minimum: f64, maximum: f64) -> Result<(f64, f64)> {
    clamp_single_offset("offset", val, minimum, maximum)
}

/// Labelled version of [`get_min_max_bounds`]; the label ends up in the error.
pub fn clamp_single_offset(
    quantity: &str,
    val: f64,
    minimum: f64,
    maximum: f64,
) -> Result<(f64, f64)> {
    if val > maximum {
        return Err(ProcGeoError::InvalidRange {
            quantity: format!("{} (value {} is out of bounds of {})", quantity, val, maximum),
            low: val,
            high: maximum,
        });
    }

    // A negative (or too small) offset pushes the low end up by the deficit.
    let (low, high) = if val >= minimum {
        (minimum, maximum - val)
    } else {
        (-val + minimum, maximum)
    };

    if low >= high {
        return Err(ProcGeoError::InvalidRange {
            quantity: format!("{} (val:{}, min:{}, max:{})", quantity, val, minimum, maximum),
            low,
            high,
        });
    }
    trace!("{}: val {} in [{}, {}] -> [{}, {})", quantity, val, minimum, maximum, low, high);
    Ok((low, high))
}

/// Sampling range for a shared vertex with two offsets hanging off it.
///
/// Each offset is clamped on its own with [`clamp_single_offset`] and the two
/// ranges are intersected. The high end is also pulled down by every positive
/// offset, so neither arm end can pass `maximum` (the single-offset clamp only
/// does that for offsets of at least `minimum`).
pub fn clamp_dual_offset(
    quantity: &str,
    offset_a: f64,
    offset_b: f64,
    minimum: f64,
    maximum: f64,
) -> Result<(f64, f64)> {
    let (low_a, high_a) = clamp_single_offset(quantity, offset_a, minimum, maximum)?;
    let (low_b, high_b) = clamp_single_offset(quantity, offset_b, minimum, maximum)?;
    let low = low_a.max(low_b);
    let high = high_a
        .min(high_b)
        .min(maximum - offset_a.max(0.0))
        .min(maximum - offset_b.max(0.0));
    if low >= high {
        return Err(ProcGeoError::InvalidRange {
            quantity: format!(
                "{} (offsets:{}/{}, min:{}, max:{})",
                quantity, offset_a, offset_b, minimum, maximum
            ),
            low,
            high,
        });
    }
    Ok((low, high))
}

/// Float range to integer sampler bounds, truncating toward zero.
pub fn truncate_range(low: f64, high: f64) -> (i64, i64) {
    (low as i64, high as i64)
}

/// Uniform integer in `[low, high)`. An empty range is an error, never a panic.
pub fn sample_range<R>(rng: &mut R, quantity: &str, low: i64, high: i64) -> Result<i64>
where
    R: Rng + ?Sized,
{
    if low >= high {
        return Err(ProcGeoError::InvalidRange {
            quantity: quantity.to_string(),
            low: low as f64,
            high: high as f64,
        });
    }
    Ok(rng.gen_range(low..high))
}

/// Like [`sample_range`], except a range that collapsed to a single value
/// (`low == high`) just returns that value.
pub fn sample_range_or_fixed<R>(rng: &mut R, quantity: &str, low: i64, high: i64) -> Result<i64>
where
    R: Rng + ?Sized,
{
    if low == high {
        return Ok(low);
    }
    sample_range(rng, quantity, low, high)
}
