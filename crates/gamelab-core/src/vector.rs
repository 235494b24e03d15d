//! World-space vector helpers on top of [`glam::Vec2`].
//!
//! Angles are in degrees at the API boundary; headings follow screen
//! convention (0° points up, angles grow clockwise).

use glam::Vec2;

/// Convert degrees to radians.
#[inline]
pub fn to_radians(deg: f32) -> f32 {
    deg.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn to_degrees(rad: f32) -> f32 {
    rad.to_degrees()
}

/// Unit vector for `v`, or zero when `v` has no length.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Length of `v`.
#[inline]
pub fn length(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector for a screen heading in degrees.
#[inline]
pub fn heading_vector(deg: f32) -> Vec2 {
    let rad = to_radians(deg - 90.0);
    Vec2::new(rad.cos(), rad.sin())
}

/// Screen heading in degrees for `v`, in `[0, 360)`.
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    wrap_degrees(to_degrees(v.y.atan2(v.x)) + 90.0)
}

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let d = deg.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

/// Clamp the length of `v` to at most `max`.
#[inline]
pub fn truncate(v: Vec2, max: f32) -> Vec2 {
    v.clamp_length_max(max.max(0.0))
}
