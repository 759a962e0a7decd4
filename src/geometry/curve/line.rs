use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at_height};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates a line from a direction already known to be unit length.
    pub(crate) fn from_unit(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Intersection of the XY projections of two unbounded lines, placed at `height`.
    ///
    /// Returns `None` for parallel (or coincident) lines, which have no
    /// single intersection point.
    #[must_use]
    pub fn intersect_flat(&self, other: &Line, height: f64) -> Option<Point3> {
        let (t, _) =
            line_line_intersect_2d(&self.origin, &self.direction, &other.origin, &other.direction)?;
        Some(point_at_height(&self.origin, &self.direction, t, height))
    }
}
