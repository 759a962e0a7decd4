use crate::geometry::surface::Plane;

use super::{Point3, Vector3, ROOF_TOLERANCE, TOLERANCE};

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// Line intersects the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of a line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(dir);

    let diff = plane.origin() - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        let point = origin + dir * t;
        LinePlaneRelation::Point { point, t }
    }
}

/// Intersection of two unbounded 3D lines `p1 + s * d1` and `p2 + t * d2`.
///
/// Returns the midpoint of the closest-approach segment when the lines
/// pass within [`ROOF_TOLERANCE`] of each other, `None` if they are
/// parallel or skew.
#[must_use]
pub fn line_line_intersect_3d(
    p1: &Point3,
    d1: &Vector3,
    p2: &Point3,
    d2: &Vector3,
) -> Option<Point3> {
    let w0 = p1 - p2;
    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = d1.dot(&w0);
    let e = d2.dot(&w0);
    let denom = a * c - b * b;
    if denom.abs() < TOLERANCE {
        return None;
    }
    let s = (b * e - c * d) / denom;
    let t = (a * e - b * d) / denom;
    let q1 = p1 + d1 * s;
    let q2 = p2 + d2 * t;
    if (q1 - q2).norm() > ROOF_TOLERANCE {
        return None;
    }
    Some(Point3::from((q1.coords + q2.coords) * 0.5))
}
