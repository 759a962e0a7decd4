use tracing::trace;

use crate::error::Result;
use crate::geometry::curve::Segment;
use crate::math::angle::crossed_horizontal;
use crate::math::tolerance::{almost_equal_default, points_almost_equal};
use crate::math::{basis_z, Point3};
use crate::roof::Roof;
use crate::topology::{EdgeData, EdgeId, FaceId, FaceSide};

use super::{EdgeInfo, RoofLineType};

/// Height above a sample point from which probing rays are cast downward.
const RAY_HEIGHT: f64 = 999.0;

/// Step past a hip or valley's lower corner along the adjoining eave.
const CORNER_STEP: f64 = 0.1;

/// Offsets across a ridge-height edge of the two slope samples.
const NEAR_SAMPLE: f64 = 0.02;
const FAR_SAMPLE: f64 = 0.1;

/// Classifies one curve against the faces of one skin of a roof.
///
/// The curve is matched (undirected, within tolerance) against the outer
/// loops of the skin's faces, in face order; the first face containing it
/// decides the base elevation used for the height tests. A curve found in
/// no face classifies as [`RoofLineType::Undefined`].
pub struct ClassifyCurve<'a> {
    roof: &'a Roof,
    side: FaceSide,
}

impl<'a> ClassifyCurve<'a> {
    /// Creates a new `ClassifyCurve` operation.
    #[must_use]
    pub fn new(roof: &'a Roof, side: FaceSide) -> Self {
        Self { roof, side }
    }

    /// Classifies `curve`.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof's topology references missing entities.
    pub fn execute(&self, curve: &crate::topology::EdgeCurve) -> Result<EdgeInfo> {
        let faces = self.roof.faces(self.side);
        for &face in &faces {
            let base = self.roof.face_base_elevation(face)?;
            for edge_id in self.roof.store().face_edges(face)? {
                let edge = self.roof.store().edge(edge_id)?;
                if !edge.curve.almost_equal(curve) {
                    continue;
                }
                return self.edge_info(edge_id, edge, base, &faces);
            }
        }
        trace!(side = ?self.side, "curve matches no roof edge");
        Ok(EdgeInfo::undefined(curve.clone(), self.side))
    }

    /// Classifies a known edge of the skin.
    pub(super) fn edge_info(
        &self,
        edge_id: EdgeId,
        edge: &EdgeData,
        base: f64,
        faces: &[FaceId],
    ) -> Result<EdgeInfo> {
        let line_type = self.line_type(edge, base, faces)?;
        trace!(?line_type, length = edge.curve.length(), "classified edge");
        Ok(EdgeInfo {
            edges: vec![edge_id],
            curve: edge.curve.clone(),
            line_type,
            roof: Some(self.roof.id()),
            side: self.side,
            related_ridge_eaves: Vec::new(),
            related_panel_faces: edge
                .faces
                .iter()
                .filter(|f| faces.contains(f))
                .copied()
                .collect(),
        })
    }

    fn line_type(&self, edge: &EdgeData, base: f64, faces: &[FaceId]) -> Result<RoofLineType> {
        let z0 = edge.curve.start_point().z;
        let z1 = edge.curve.end_point().z;
        let start_at_base = almost_equal_default(z0, base);
        let end_at_base = almost_equal_default(z1, base);
        let both_in_skin = edge.faces.len() == 2 && edge.faces.iter().all(|f| faces.contains(f));

        if start_at_base && end_at_base {
            return Ok(RoofLineType::Eave);
        }

        if start_at_base || end_at_base {
            if !both_in_skin {
                return Ok(RoofLineType::Gable);
            }
            for &face in &edge.faces {
                if self.roof.outer_loop_len(face)? == 3 {
                    return Ok(RoofLineType::Hip);
                }
            }
            return Ok(if self.occluded_past_lower_corner(edge)? {
                RoofLineType::Valley
            } else {
                RoofLineType::Hip
            });
        }

        if almost_equal_default(z0, z1) {
            if both_in_skin {
                Ok(RoofLineType::Ridge)
            } else if self.slopes_away_below(edge)? {
                Ok(RoofLineType::RidgeSinglePanel)
            } else {
                Ok(RoofLineType::Eave)
            }
        } else if both_in_skin {
            Ok(RoofLineType::Hip)
        } else {
            Ok(RoofLineType::Gable)
        }
    }

    /// Whether the roof covers the point just past the edge's lower corner,
    /// stepping out along the eave of the edge's first face. A valley's
    /// corner is re-entrant, so the step lands under the other wing; a hip's
    /// step leaves the roof.
    fn occluded_past_lower_corner(&self, edge: &EdgeData) -> Result<bool> {
        let (a, b) = (edge.curve.start_point(), edge.curve.end_point());
        let low = if a.z < b.z { a } else { b };

        let mut target = low;
        if let Some(face) = edge.face(0) {
            let base = self.roof.face_base_elevation(face)?;
            for eave_id in self.roof.store().face_edges(face)? {
                let eave = &self.roof.store().edge(eave_id)?.curve;
                let (p, q) = (eave.start_point(), eave.end_point());
                if !almost_equal_default(p.z, base)
                    || !almost_equal_default(q.z, base)
                    || !eave.touches(&low)
                {
                    continue;
                }
                let away = if points_almost_equal(&p, &low) { q } else { p };
                target = low - (away - low).normalize() * CORNER_STEP;
                break;
            }
        }

        Ok(self.cast_down(&target).is_some())
    }

    /// Samples the roof surface at two distances across a ridge-height edge;
    /// the edge is a single-panel ridge when the surface falls away from it.
    fn slopes_away_below(&self, edge: &EdgeData) -> Result<bool> {
        let chord = Segment::new(edge.curve.start_point(), edge.curve.end_point())?;
        let mid = edge.curve.midpoint();
        let across = crossed_horizontal(&chord.direction());

        let sample = |sign: f64| {
            let near = self.cast_down(&(mid + across * (NEAR_SAMPLE * sign)));
            let far = self.cast_down(&(mid + across * (FAR_SAMPLE * sign)));
            (near, far)
        };

        let (mut near, mut far) = sample(1.0);
        if far.is_none() {
            (near, far) = sample(-1.0);
        }
        Ok(match (near, far) {
            (Some(near), Some(far)) => far.z < near.z,
            _ => false,
        })
    }

    fn cast_down(&self, point: &Point3) -> Option<Point3> {
        let origin = Point3::new(point.x, point.y, point.z + RAY_HEIGHT);
        self.roof
            .cast_ray(&origin, &(-basis_z()))
            .map(|hit| hit.point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeLRoof, MakeShedRoof};
    use crate::roof::{RoofBuilder, RoofId};
    use crate::topology::EdgeCurve;

    fn segment(a: (f64, f64, f64), b: (f64, f64, f64)) -> EdgeCurve {
        EdgeCurve::Segment(
            Segment::new(Point3::new(a.0, a.1, a.2), Point3::new(b.0, b.1, b.2)).unwrap(),
        )
    }

    #[test]
    fn shed_high_edge_is_a_single_panel_ridge() {
        let roof = MakeShedRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 0.5)
            .execute()
            .unwrap();
        let op = ClassifyCurve::new(&roof, FaceSide::Bottom);

        let high = op.execute(&segment((0.0, 10.0, 15.0), (20.0, 10.0, 15.0))).unwrap();
        assert_eq!(high.line_type, RoofLineType::RidgeSinglePanel);
        assert_eq!(high.related_panel_faces.len(), 1);
        assert_eq!(high.edges.len(), 1);

        let low = op.execute(&segment((0.0, 0.0, 10.0), (20.0, 0.0, 10.0))).unwrap();
        assert_eq!(low.line_type, RoofLineType::Eave);

        let side = op.execute(&segment((20.0, 0.0, 10.0), (20.0, 10.0, 15.0))).unwrap();
        assert_eq!(side.line_type, RoofLineType::Gable);
    }

    #[test]
    fn ridge_height_edge_under_a_rising_slab_is_an_eave() {
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let roof = RoofBuilder::new(RoofId(1))
            .panel(vec![p(0.0, 0.0, 10.0), p(20.0, 0.0, 10.0), p(20.0, 10.0, 15.0), p(0.0, 10.0, 15.0)])
            .panel(vec![p(0.0, 10.0, 16.0), p(20.0, 10.0, 16.0), p(20.0, 20.0, 21.0), p(0.0, 20.0, 21.0)])
            .level(10.0)
            .slope(0.5)
            .build()
            .unwrap();
        let op = ClassifyCurve::new(&roof, FaceSide::Bottom);

        for curve in [
            segment((0.0, 10.0, 15.0), (20.0, 10.0, 15.0)),
            segment((20.0, 10.0, 15.0), (0.0, 10.0, 15.0)),
        ] {
            let info = op.execute(&curve).unwrap();
            assert_eq!(info.line_type, RoofLineType::Eave);
            assert_eq!(info.related_panel_faces.len(), 1);
        }
    }

    #[test]
    fn re_entrant_corner_is_a_valley() {
        let roof = MakeLRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 1.0)
            .execute()
            .unwrap();
        let op = ClassifyCurve::new(&roof, FaceSide::Bottom);
        let valley = op.execute(&segment((10.0, 10.0, 10.0), (5.0, 5.0, 15.0))).unwrap();
        assert_eq!(valley.line_type, RoofLineType::Valley);
        assert_eq!(valley.related_panel_faces.len(), 2);

        let hip = op.execute(&segment((0.0, 0.0, 10.0), (5.0, 5.0, 15.0))).unwrap();
        assert_eq!(hip.line_type, RoofLineType::Hip);
    }

    #[test]
    fn unknown_curve_is_undefined() {
        let roof = MakeShedRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 0.5)
            .execute()
            .unwrap();
        let info = ClassifyCurve::new(&roof, FaceSide::Bottom)
            .execute(&segment((0.0, 0.0, 10.0), (3.0, 0.0, 10.0)))
            .unwrap();
        assert_eq!(info.line_type, RoofLineType::Undefined);
        assert!(info.roof.is_none());
        assert!(info.edges.is_empty());
    }

    #[test]
    fn top_skin_is_classified_on_its_own_heights() {
        let roof = MakeShedRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 0.5)
            .execute()
            .unwrap();
        let info = ClassifyCurve::new(&roof, FaceSide::Top)
            .execute(&segment((20.0, 0.0, 10.5), (0.0, 0.0, 10.5)))
            .unwrap();
        assert_eq!(info.line_type, RoofLineType::Eave);
        assert_eq!(info.side, FaceSide::Top);
    }
}
