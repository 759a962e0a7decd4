//! Tolerant comparisons used instead of exact equality.
//!
//! Coordinates handed over by the host kernel carry noise well above
//! machine precision, so every equality test in the classifier goes through
//! these helpers with [`ROOF_TOLERANCE`] as the default.

use super::{Point3, ROOF_TOLERANCE};

/// Absolute-difference comparison: `|a - b| <= tolerance`.
#[must_use]
pub fn almost_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// [`almost_equal`] with the default [`ROOF_TOLERANCE`].
#[must_use]
pub fn almost_equal_default(a: f64, b: f64) -> bool {
    almost_equal(a, b, ROOF_TOLERANCE)
}

/// Two points are almost equal when their distance is within [`ROOF_TOLERANCE`].
#[must_use]
pub fn points_almost_equal(a: &Point3, b: &Point3) -> bool {
    (a - b).norm() <= ROOF_TOLERANCE
}

/// Undirected endpoint comparison of two curves given by their endpoints.
#[must_use]
pub fn endpoints_almost_equal(a: (&Point3, &Point3), b: (&Point3, &Point3)) -> bool {
    (points_almost_equal(a.0, b.0) && points_almost_equal(a.1, b.1))
        || (points_almost_equal(a.0, b.1) && points_almost_equal(a.1, b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexive_for_any_tolerance() {
        for x in [-1e6, -3.25, 0.0, 1e-12, 42.0] {
            assert!(almost_equal(x, x, 0.0));
            assert!(almost_equal(x, x, 0.5));
        }
    }

    #[test]
    fn symmetric() {
        assert_eq!(almost_equal(1.0, 1.005, 0.01), almost_equal(1.005, 1.0, 0.01));
        assert_eq!(almost_equal(1.0, 1.5, 0.01), almost_equal(1.5, 1.0, 0.01));
    }

    #[test]
    fn default_tolerance_is_one_hundredth() {
        assert!(almost_equal_default(10.0, 10.009));
        assert!(!almost_equal_default(10.0, 10.02));
    }

    #[test]
    fn curves_compare_undirected() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(5.0, 1.0, 2.0);
        let b_noisy = Point3::new(5.001, 1.0, 2.0);
        assert!(endpoints_almost_equal((&a, &b), (&b_noisy, &a)));
        assert!(endpoints_almost_equal((&a, &b), (&a, &b_noisy)));
        assert!(!endpoints_almost_equal((&a, &b), (&a, &Point3::new(5.0, 1.0, 3.0))));
    }
}
