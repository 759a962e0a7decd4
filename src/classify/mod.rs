//! Structural classification of roof edges.
//!
//! Every boundary curve of one skin of the roof solid is tagged with a
//! [`RoofLineType`] from face adjacency, endpoint heights and, where the
//! topology is ambiguous, ray casts against the solid.

mod classify_curve;
mod classify_roof;
mod merge;
mod similar;

pub use classify_curve::ClassifyCurve;
pub use classify_roof::ClassifyRoof;
pub use similar::MostSimilarEdge;

use crate::error::Result;
use crate::geometry::curve::Segment;
use crate::roof::RoofId;
use crate::topology::{EdgeCurve, EdgeId, FaceId, FaceSide};

/// Structural role of a roof edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoofLineType {
    /// Sloped edge at a convex corner between two panels.
    Hip,
    /// Horizontal top edge between two opposing panels.
    Ridge,
    /// Horizontal top edge of a panel with no opposing panel.
    RidgeSinglePanel,
    /// Sloped edge at a concave corner between two panels.
    Valley,
    /// Lowest edge of a panel.
    Eave,
    /// Sloped edge bordering the outside of the roof at a ridge end.
    Gable,
    /// No matching edge was found.
    Undefined,
}

impl RoofLineType {
    /// Whether trusses can be distributed along this edge.
    #[must_use]
    pub fn is_ridge(self) -> bool {
        matches!(self, Self::Ridge | Self::RidgeSinglePanel)
    }
}

/// One classified boundary or ridge curve of a roof.
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    /// Underlying solid edges; more than one after collinear fragments merge.
    pub edges: Vec<EdgeId>,
    /// The curve, spanning all merged fragments.
    pub curve: EdgeCurve,
    /// Structural role.
    pub line_type: RoofLineType,
    /// Owning roof; `None` for [`RoofLineType::Undefined`].
    pub roof: Option<RoofId>,
    /// Skin the edge was classified against.
    pub side: FaceSide,
    /// Eaves sharing a panel with this edge.
    pub related_ridge_eaves: Vec<EdgeId>,
    /// Panels of the classified skin bounded by this edge (one or two).
    pub related_panel_faces: Vec<FaceId>,
}

impl EdgeInfo {
    /// Result for a curve that matches no edge of the skin.
    #[must_use]
    pub fn undefined(curve: EdgeCurve, side: FaceSide) -> Self {
        Self {
            edges: Vec::new(),
            curve,
            line_type: RoofLineType::Undefined,
            roof: None,
            side,
            related_ridge_eaves: Vec::new(),
            related_panel_faces: Vec::new(),
        }
    }

    /// The curve as a straight segment.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotStraight`](crate::error::PreconditionError::NotStraight)
    /// for curved edges.
    pub fn segment(&self) -> Result<&Segment> {
        self.curve.require_segment("roof edge")
    }

    /// Edges of `all` (other than this one) touching endpoint `index`.
    ///
    /// Only indices 0 and 1 exist; any other index yields nothing.
    #[must_use]
    pub fn end_conditions<'a>(&self, index: usize, all: &'a [EdgeInfo]) -> Vec<&'a EdgeInfo> {
        if index > 1 {
            return Vec::new();
        }
        let point = self.curve.endpoint(index);
        all.iter()
            .filter(|other| !other.curve.almost_equal(&self.curve) && other.curve.touches(&point))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeGableRoof, MakeHipRoof};

    #[test]
    fn ridge_end_conditions_on_hip_roof() {
        let roof = MakeHipRoof::new(Point3::new(0.0, 0.0, 10.0), 30.0, 10.0, 1.0)
            .execute()
            .unwrap();
        let edges = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let ridge = edges
            .iter()
            .find(|e| e.line_type == RoofLineType::Ridge)
            .unwrap();
        for index in 0..2 {
            let ends = ridge.end_conditions(index, &edges);
            assert_eq!(ends.len(), 2);
            assert!(ends.iter().all(|e| e.line_type == RoofLineType::Hip));
        }
        assert!(ridge.end_conditions(2, &edges).is_empty());
    }

    #[test]
    fn gable_ridge_ends_in_gables() {
        let roof = MakeGableRoof::new(Point3::new(0.0, 0.0, 10.0), 30.0, 10.0, 1.0)
            .execute()
            .unwrap();
        let edges = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let ridge = edges.iter().find(|e| e.line_type.is_ridge()).unwrap();
        let ends = ridge.end_conditions(0, &edges);
        assert_eq!(ends.len(), 2);
        assert!(ends.iter().all(|e| e.line_type == RoofLineType::Gable));
    }
}
