use super::{Point3, TOLERANCE};

/// Returns the minimum distance from point `(px, py)` to the line segment
/// from `(ax, ay)` to `(bx, by)`.
#[must_use]
pub fn point_to_segment_dist_2d(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }

    let t = ((px - ax) * dx + (py - ay) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = ax + t * dx;
    let closest_y = ay + t * dy;

    ((px - closest_x).powi(2) + (py - closest_y).powi(2)).sqrt()
}

/// Closest point to `point` on the segment `a`-`b`, with its clamped parameter in `[0, 1]`.
#[must_use]
pub fn closest_point_on_segment(point: &Point3, a: &Point3, b: &Point3) -> (Point3, f64) {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return (*a, 0.0);
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}
