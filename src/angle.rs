//! Angle utilities for segment growth and axis-alignment tests.

use std::f32::consts::{FRAC_PI_2, PI};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned difference between two orientations, treating
/// antipodal directions as equal. Result lies in `[0, π/2]`.
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Deviation (degrees) of a unit direction from the horizontal axis,
/// ignoring sign. `0` for horizontal, `90` for vertical.
#[inline]
pub fn deviation_from_horizontal_deg(dir: [f32; 2]) -> f32 {
    angular_difference(dir[1].atan2(dir[0]), 0.0).to_degrees()
}
