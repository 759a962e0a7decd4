use super::{Point3, Vector3, TOLERANCE};

/// Parametric XY line-line intersection; Z is ignored.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point3,
    d1: &Vector3,
    p2: &Point3,
    d2: &Vector3,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Linear interpolation in XY at height `z`: `origin + dir * t`.
#[must_use]
pub fn point_at_height(origin: &Point3, dir: &Vector3, t: f64, z: f64) -> Point3 {
    Point3::new(origin.x + dir.x * t, origin.y + dir.y * t, z)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_lines_meet() {
        let (t, u) = line_line_intersect_2d(
            &Point3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &Point3::new(3.0, -2.0, 7.0),
            &Vector3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert!((t - 3.0).abs() < 1e-12);
        assert!((u - 2.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_lines_miss() {
        assert!(line_line_intersect_2d(
            &Point3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 1.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
            &Vector3::new(-2.0, -2.0, 5.0),
        )
        .is_none());
    }
}
