//! Angle unit conversions.

/// Degrees to radians.
#[inline]
#[must_use]
pub fn radians(deg: f64) -> f64 {
    deg.to_radians()
}

/// Radians to degrees.
#[inline]
#[must_use]
pub fn degrees(rad: f64) -> f64 {
    rad.to_degrees()
}
