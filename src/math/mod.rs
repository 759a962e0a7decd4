pub mod angle;
pub mod distance;
pub mod intersect_2d;
pub mod intersect_3d;
pub mod polygon_3d;
pub mod spacing;
pub mod tolerance;
pub mod units;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Kernel tolerance for floating-point arithmetic (parallel tests, denominators).
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance, in length units, for comparing coordinates coming from the host model.
pub const ROOF_TOLERANCE: f64 = 0.01;

/// Angular tolerance (radians) for treating two classified edges as collinear.
pub const ANGLE_TOLERANCE_MERGE: f64 = 0.02;

/// Angular tolerance (radians) for accepting a support element as parallel.
pub const ANGLE_TOLERANCE_SUPPORT: f64 = 0.05;

/// Unit vector along +Z.
#[must_use]
pub fn basis_z() -> Vector3 {
    Vector3::new(0.0, 0.0, 1.0)
}

/// Returns `point` with its Z coordinate replaced by `z`.
#[must_use]
pub fn with_z(point: &Point3, z: f64) -> Point3 {
    Point3::new(point.x, point.y, z)
}
