use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Wrap an angle into [-π, π)
#[inline]
pub fn wrap_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Map `value` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`, holding the end values
/// outside the input range.
pub fn interp(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    if in_hi <= in_lo {
        return out_lo;
    }
    lerp(out_lo, out_hi, (value - in_lo) / (in_hi - in_lo))
}

/// Symmetric clamp that also reports whether the limit was hit.
#[inline]
pub fn saturate(value: f64, limit: f64) -> (f64, bool) {
    let clamped = value.clamp(-limit, limit);
    (clamped, clamped != value)
}

/// Root-mean-square of a sequence, `None` when it is empty
pub fn rms<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v * v, count + 1));
    if count == 0 {
        None
    } else {
        Some((sum / count as f64).sqrt())
    }
}
