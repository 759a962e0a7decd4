use std::f64::consts::PI;

use super::tolerance::almost_equal;
use super::units::degrees_to_radians;
use super::{Vector3, TOLERANCE};

/// Rotates a vector about the Z axis by `angle_degrees`.
///
/// The Z component is carried over unchanged.
#[must_use]
pub fn rotate_2d(vector: &Vector3, angle_degrees: f64) -> Vector3 {
    let angle = degrees_to_radians(angle_degrees);
    let (sin, cos) = angle.sin_cos();
    Vector3::new(
        vector.x * cos - vector.y * sin,
        vector.x * sin + vector.y * cos,
        vector.z,
    )
}

/// Unsigned angle between two vectors in `[0, PI]`.
///
/// Returns `None` if either vector is zero-length.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> Option<f64> {
    let denom = a.norm() * b.norm();
    if denom < TOLERANCE {
        return None;
    }
    Some((a.dot(b) / denom).clamp(-1.0, 1.0).acos())
}

/// Whether two directions are parallel in either sense within `tolerance` radians.
#[must_use]
pub fn is_parallel(a: &Vector3, b: &Vector3, tolerance: f64) -> bool {
    angle_between(a, b).is_some_and(|angle| {
        almost_equal(angle, 0.0, tolerance) || almost_equal(angle, PI, tolerance)
    })
}

/// Horizontal direction perpendicular to `direction`: `direction × Z`.
///
/// For a horizontal ridge this points across the roof slope.
#[must_use]
pub fn crossed_horizontal(direction: &Vector3) -> Vector3 {
    direction.cross(&super::basis_z())
}
