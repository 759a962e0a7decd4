use crate::geometry::surface::Plane;

use super::{Point3, TOLERANCE};

/// Projects a 3D point onto the UV coordinate system of a plane.
///
/// Returns `(u, v)` coordinates.
#[must_use]
fn project_to_uv(point: &Point3, plane: &Plane) -> (f64, f64) {
    let diff = point - plane.origin();
    let u = diff.dot(plane.u_dir());
    let v = diff.dot(plane.v_dir());
    (u, v)
}

/// Point-in-polygon test for a 3D point coplanar with the polygon.
///
/// Projects to the face's UV coordinate space and uses the winding number
/// algorithm. Points on the boundary (within `TOLERANCE * 100`) count as inside.
#[must_use]
pub fn point_in_polygon_3d(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (px, py) = project_to_uv(point, plane);
    let uvs: Vec<(f64, f64)> = polygon.iter().map(|p| project_to_uv(p, plane)).collect();

    winding_number_2d(px, py, &uvs) != 0 || on_boundary_2d(px, py, &uvs)
}

/// Winding number of point `(px, py)` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(px: f64, py: f64, verts: &[(f64, f64)]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = verts[i];
        let (x1, y1) = verts[(i + 1) % n];

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn on_boundary_2d(px: f64, py: f64, verts: &[(f64, f64)]) -> bool {
    let n = verts.len();
    let edge_tol = TOLERANCE * 100.0;
    (0..n).any(|i| {
        let (ax, ay) = verts[i];
        let (bx, by) = verts[(i + 1) % n];
        super::distance::point_to_segment_dist_2d(px, py, ax, ay, bx, by) < edge_tol
    })
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn xy_plane() -> Plane {
        Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)).unwrap()
    }

    fn unit_square() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn point_inside_square() {
        assert!(point_in_polygon_3d(&p(0.5, 0.5, 0.0), &unit_square(), &xy_plane()));
    }

    #[test]
    fn point_outside_square() {
        assert!(!point_in_polygon_3d(&p(1.5, 0.5, 0.0), &unit_square(), &xy_plane()));
    }

    #[test]
    fn point_on_edge_counts_as_inside() {
        assert!(point_in_polygon_3d(&p(1.0, 0.5, 0.0), &unit_square(), &xy_plane()));
    }

    #[test]
    fn sloped_trapezoid() {
        let trapezoid = vec![
            p(0.0, 0.0, 0.0),
            p(30.0, 0.0, 0.0),
            p(25.0, 5.0, 5.0),
            p(5.0, 5.0, 5.0),
        ];
        let plane = Plane::from_points(&trapezoid[0], &trapezoid[1], &trapezoid[2]).unwrap();
        assert!(point_in_polygon_3d(&p(15.0, 1.0, 1.0), &trapezoid, &plane));
        assert!(!point_in_polygon_3d(&p(2.0, 4.0, 4.0), &trapezoid, &plane));
    }
}
