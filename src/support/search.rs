use tracing::trace;

use crate::math::angle::is_parallel;
use crate::math::{with_z, Point3, Vector3, ANGLE_TOLERANCE_SUPPORT};

use super::{Aabb, Category, ElementId, SupportIndex};

/// A resolved support location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPoint {
    /// Support location at roof base height.
    pub point: Point3,
    /// Element the point was projected on; `None` when nothing was found and
    /// the query point was kept.
    pub element: Option<ElementId>,
}

/// Finds the wall or beam line nearest to a query point.
///
/// Candidates are walls and structural framing whose bounds intersect a
/// cube of edge `extent` around the point. Framing hosted by a truss is
/// skipped so trusses never bear on each other. With a reference direction
/// only straight elements parallel to it (either sense) qualify.
pub struct FindSupport {
    point: Point3,
    direction: Option<Vector3>,
    extent: f64,
}

impl FindSupport {
    /// Searches around `point` with the default extent of 1.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            direction: None,
            extent: 1.0,
        }
    }

    /// Only accepts elements parallel to `direction`.
    #[must_use]
    pub fn along(mut self, direction: Vector3) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the search cube's edge length; non-positive values fall back to 1.
    #[must_use]
    pub fn extent(mut self, extent: f64) -> Self {
        self.extent = if extent > 0.0 { extent } else { 1.0 };
        self
    }

    /// Runs the search. The result is always placed at `roof_height`.
    #[must_use]
    pub fn execute(&self, index: &dyn SupportIndex, roof_height: f64) -> SupportPoint {
        let bounds = Aabb::around(&self.point, self.extent);
        let candidates = index.query(&bounds, &[Category::Wall, Category::StructuralFraming]);

        let mut best: Option<(ElementId, Point3, f64)> = None;
        for element in candidates {
            if element.category == Category::StructuralFraming
                && element.host == Some(Category::StructuralTruss)
            {
                continue;
            }
            let Some(location) = &element.location else {
                continue;
            };
            if let Some(direction) = &self.direction {
                let Some(line) = location.as_segment() else {
                    continue;
                };
                if !is_parallel(&line.direction(), direction, ANGLE_TOLERANCE_SUPPORT) {
                    continue;
                }
            }
            let projected = location.closest_point(&self.point);
            let distance = (projected - self.point).norm();
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((element.id, projected, distance));
            }
        }

        match best {
            Some((id, projected, distance)) => {
                trace!(element = id.0, distance, "support found");
                SupportPoint {
                    point: with_z(&projected, roof_height),
                    element: Some(id),
                }
            }
            None => {
                trace!(x = self.point.x, y = self.point.y, "no support near query point");
                SupportPoint {
                    point: with_z(&self.point, roof_height),
                    element: None,
                }
            }
        }
    }
}
