use crate::error::{GeometryError, Result};
use crate::math::distance::closest_point_on_segment;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at_height};
use crate::math::tolerance::{endpoints_almost_equal, points_almost_equal};
use crate::math::{with_z, Point3, Vector3, ROOF_TOLERANCE, TOLERANCE};

use super::Line;

/// A bounded straight curve between two points.
///
/// Parameterized by arc length: `P(t) = start + t * direction`, `t ∈ [0, length]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a segment between two distinct points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length segment".into()).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns endpoint `0` (start) or any other index (end).
    #[must_use]
    pub fn endpoint(&self, index: usize) -> &Point3 {
        if index == 0 {
            &self.start
        } else {
            &self.end
        }
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start) / self.length()
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        Point3::from((self.start.coords + self.end.coords) * 0.5)
    }

    /// Point at `distance` from the start along the segment direction.
    #[must_use]
    pub fn point_at_distance(&self, distance: f64) -> Point3 {
        self.start + self.direction() * distance
    }

    /// Closest point on the bounded segment and its distance to `point`.
    #[must_use]
    pub fn project(&self, point: &Point3) -> (Point3, f64) {
        let (closest, _) = closest_point_on_segment(point, &self.start, &self.end);
        let distance = (point - closest).norm();
        (closest, distance)
    }

    /// Orthogonal projection of `point` onto the segment's unbounded line.
    #[must_use]
    pub fn project_unbound(&self, point: &Point3) -> Point3 {
        let dir = self.direction();
        self.start + dir * (point - self.start).dot(&dir)
    }

    /// Copy of the segment with both endpoints moved to `height`.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is vertical, so its flattening collapses.
    pub fn flatten(&self, height: f64) -> Result<Self> {
        Self::new(with_z(&self.start, height), with_z(&self.end, height))
    }

    /// Extends the segment to an infinite line.
    #[must_use]
    pub fn unbound(&self) -> Line {
        Line::from_unit(self.start, self.direction())
    }

    /// Undirected comparison of the endpoints within the roof tolerance.
    #[must_use]
    pub fn almost_equal(&self, other: &Segment) -> bool {
        endpoints_almost_equal((&self.start, &self.end), (&other.start, &other.end))
    }

    /// Whether `point` matches either endpoint.
    #[must_use]
    pub fn touches(&self, point: &Point3) -> bool {
        points_almost_equal(&self.start, point) || points_almost_equal(&self.end, point)
    }

    /// Flattens both segments to `height`, extends them to infinite lines and
    /// returns their single intersection point.
    ///
    /// `None` if either flattening collapses or the lines are parallel.
    #[must_use]
    pub fn intersect_flattened_unbound(&self, other: &Segment, height: f64) -> Option<Point3> {
        let a = self.flatten(height).ok()?.unbound();
        let b = other.flatten(height).ok()?.unbound();
        a.intersect_flat(&b, height)
    }

    /// Intersection, in plan at `height`, of an unbounded `line` with this
    /// bounded segment. `None` when the crossing falls outside the segment.
    #[must_use]
    pub fn intersect_flattened_with(&self, line: &Line, height: f64) -> Option<Point3> {
        let dir = self.direction();
        let (_, u) = line_line_intersect_2d(line.origin(), line.direction(), &self.start, &dir)?;
        // `u` is measured along the 3D direction; compare in plan.
        let plan_len = (dir.x * dir.x + dir.y * dir.y).sqrt();
        let along = u * plan_len;
        let plan_total = self.length() * plan_len;
        if along < -ROOF_TOLERANCE || along > plan_total + ROOF_TOLERANCE {
            return None;
        }
        Some(point_at_height(&self.start, &dir, u, height))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(a: (f64, f64, f64), b: (f64, f64, f64)) -> Segment {
        Segment::new(Point3::new(a.0, a.1, a.2), Point3::new(b.0, b.1, b.2)).unwrap()
    }

    #[test]
    fn zero_length_is_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(Segment::new(p, p).is_err());
    }

    #[test]
    fn flatten_moves_both_endpoints() {
        let s = seg((0.0, 0.0, 0.0), (5.0, 5.0, 5.0)).flatten(10.0).unwrap();
        assert_relative_eq!(s.start().z, 10.0);
        assert_relative_eq!(s.end().z, 10.0);
        assert_relative_eq!(s.end().x, 5.0);
    }

    #[test]
    fn vertical_segment_cannot_flatten() {
        assert!(seg((1.0, 1.0, 0.0), (1.0, 1.0, 3.0)).flatten(0.0).is_err());
    }

    #[test]
    fn flattened_unbound_intersection_of_inclined_lines() {
        let hip = seg((0.0, 0.0, 10.0), (5.0, 5.0, 15.0));
        let crossing = seg((0.0, 8.0, 3.0), (1.0, 8.0, 3.0));
        let p = hip.intersect_flattened_unbound(&crossing, 10.0).unwrap();
        assert_relative_eq!(p.x, 8.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 8.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 10.0);
    }

    #[test]
    fn flattened_parallel_lines_miss() {
        let a = seg((0.0, 0.0, 0.0), (1.0, 0.0, 4.0));
        let b = seg((0.0, 1.0, 2.0), (3.0, 1.0, 2.0));
        assert!(a.intersect_flattened_unbound(&b, 0.0).is_none());
    }

    #[test]
    fn undirected_equality() {
        let a = seg((0.0, 0.0, 0.0), (4.0, 0.0, 0.0));
        let b = seg((4.0, 0.0, 0.005), (0.0, 0.0, 0.0));
        assert!(a.almost_equal(&b));
        assert!(!a.almost_equal(&seg((0.0, 0.0, 0.0), (4.1, 0.0, 0.0))));
    }

    #[test]
    fn bounded_crossing_respects_segment_extent() {
        let wall = seg((1.0, 1.0, 0.0), (29.0, 1.0, 0.0));
        let crossing = Line::new(Point3::new(15.0, 5.0, 10.0), Vector3::new(0.0, -1.0, 0.0)).unwrap();
        let p = wall.intersect_flattened_with(&crossing, 10.0).unwrap();
        assert_relative_eq!(p.x, 15.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 10.0);

        let outside = Line::new(Point3::new(35.0, 5.0, 10.0), Vector3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(wall.intersect_flattened_with(&outside, 10.0).is_none());
    }

    #[test]
    fn bounded_projection_clamps() {
        let s = seg((0.0, 0.0, 0.0), (10.0, 0.0, 0.0));
        let (q, d) = s.project(&Point3::new(12.0, 0.0, 0.0));
        assert_relative_eq!(q.x, 10.0);
        assert_relative_eq!(d, 2.0);
        let q = s.project_unbound(&Point3::new(12.0, 3.0, 0.0));
        assert_relative_eq!(q.x, 12.0);
        assert_relative_eq!(q.y, 0.0);
    }
}
