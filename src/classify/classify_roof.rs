use tracing::debug;

use crate::error::Result;
use crate::roof::Roof;
use crate::topology::{EdgeId, FaceSide};

use super::classify_curve::ClassifyCurve;
use super::merge::merge_collinear;
use super::{EdgeInfo, RoofLineType};

/// Classifies every distinct boundary curve of one skin of a roof.
///
/// Curves are collected from the skin's face loops in face order, each
/// classified against the face it was first found in. Ridge-type edges get
/// the eaves sharing a panel with them. Collinear fragments of the same type
/// are then merged.
pub struct ClassifyRoof<'a> {
    roof: &'a Roof,
    side: FaceSide,
}

impl<'a> ClassifyRoof<'a> {
    /// Creates a new `ClassifyRoof` operation.
    #[must_use]
    pub fn new(roof: &'a Roof, side: FaceSide) -> Self {
        Self { roof, side }
    }

    /// Executes the operation, returning the classified edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof's topology references missing entities.
    pub fn execute(&self) -> Result<Vec<EdgeInfo>> {
        let store = self.roof.store();
        let faces = self.roof.faces(self.side);
        let classify = ClassifyCurve::new(self.roof, self.side);

        let mut seen: Vec<EdgeId> = Vec::new();
        let mut infos: Vec<EdgeInfo> = Vec::new();
        for &face in &faces {
            let base = self.roof.face_base_elevation(face)?;
            for edge_id in store.face_edges(face)? {
                let edge = store.edge(edge_id)?;
                if seen.contains(&edge_id) || infos.iter().any(|i| i.curve.almost_equal(&edge.curve)) {
                    continue;
                }
                seen.push(edge_id);
                infos.push(classify.edge_info(edge_id, edge, base, &faces)?);
            }
        }

        let eaves: Vec<EdgeId> = infos
            .iter()
            .filter(|i| i.line_type == RoofLineType::Eave)
            .filter_map(|i| i.edges.first().copied())
            .collect();
        for info in infos.iter_mut().filter(|i| i.line_type.is_ridge()) {
            let Some(&own) = info.edges.first() else {
                continue;
            };
            let own = store.edge(own)?;
            for &eave in &eaves {
                if store.edge(eave)?.shares_face_with(own) {
                    info.related_ridge_eaves.push(eave);
                }
            }
        }

        let before = infos.len();
        let infos = merge_collinear(infos);
        debug!(
            roof = self.roof.id().0,
            side = ?self.side,
            edges = infos.len(),
            merged = before - infos.len(),
            "classified roof edges"
        );
        Ok(infos)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{
        MakeGableRoof, MakeHipRoof, MakeLRoof, MakeShedRoof, MakeTeeRoof,
    };

    fn count(infos: &[EdgeInfo], line_type: RoofLineType) -> usize {
        infos.iter().filter(|i| i.line_type == line_type).count()
    }

    fn origin() -> Point3 {
        Point3::new(0.0, 0.0, 10.0)
    }

    #[test]
    fn hip_roof_edges() {
        let roof = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0).execute().unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        assert_eq!(infos.len(), 9);
        assert_eq!(count(&infos, RoofLineType::Ridge), 1);
        assert_eq!(count(&infos, RoofLineType::Hip), 4);
        assert_eq!(count(&infos, RoofLineType::Eave), 4);

        let ridge = infos.iter().find(|i| i.line_type == RoofLineType::Ridge).unwrap();
        assert_eq!(ridge.related_ridge_eaves.len(), 2);
        assert_eq!(ridge.related_panel_faces.len(), 2);
        assert!((ridge.curve.length() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn gable_roof_edges() {
        let roof = MakeGableRoof::new(origin(), 30.0, 10.0, 1.0).execute().unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        assert_eq!(count(&infos, RoofLineType::Ridge), 1);
        assert_eq!(count(&infos, RoofLineType::Eave), 2);
        assert_eq!(count(&infos, RoofLineType::Gable), 4);
        assert_eq!(count(&infos, RoofLineType::Undefined), 0);
    }

    #[test]
    fn shed_roof_has_no_full_ridge() {
        let roof = MakeShedRoof::new(origin(), 20.0, 10.0, 0.5).execute().unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        assert_eq!(count(&infos, RoofLineType::Ridge), 0);
        assert_eq!(count(&infos, RoofLineType::RidgeSinglePanel), 1);
        assert_eq!(count(&infos, RoofLineType::Eave), 1);
        assert_eq!(count(&infos, RoofLineType::Gable), 2);

        let high = infos.iter().find(|i| i.line_type.is_ridge()).unwrap();
        assert_eq!(high.related_ridge_eaves.len(), 1);
    }

    #[test]
    fn l_roof_edges() {
        let roof = MakeLRoof::new(origin(), 20.0, 10.0, 1.0).execute().unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        assert_eq!(count(&infos, RoofLineType::Eave), 6);
        assert_eq!(count(&infos, RoofLineType::Hip), 5);
        assert_eq!(count(&infos, RoofLineType::Valley), 1);
        assert_eq!(count(&infos, RoofLineType::Ridge), 2);
    }

    #[test]
    fn tee_roof_edges() {
        let roof = MakeTeeRoof::new(origin(), 30.0, 10.0, 1.0)
            .wing(6.0, 10.0)
            .execute()
            .unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        assert_eq!(count(&infos, RoofLineType::Eave), 5);
        assert_eq!(count(&infos, RoofLineType::Gable), 6);
        assert_eq!(count(&infos, RoofLineType::Ridge), 2);
        assert_eq!(count(&infos, RoofLineType::Valley), 2);

        let main = infos
            .iter()
            .find(|i| i.line_type == RoofLineType::Ridge && (i.curve.length() - 30.0).abs() < 1e-9)
            .unwrap();
        assert_eq!(main.related_ridge_eaves.len(), 3);
    }

    #[test]
    fn top_skin_matches_bottom_counts() {
        let roof = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0).execute().unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Top).execute().unwrap();
        assert_eq!(count(&infos, RoofLineType::Ridge), 1);
        assert_eq!(count(&infos, RoofLineType::Hip), 4);
        assert_eq!(count(&infos, RoofLineType::Eave), 4);
        assert!(infos.iter().all(|i| i.side == FaceSide::Top));
    }

    #[test]
    fn merging_own_output_changes_nothing() {
        let roof = MakeLRoof::new(origin(), 20.0, 10.0, 1.0).execute().unwrap();
        let infos = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let again = merge_collinear(infos.clone());
        assert_eq!(again.len(), infos.len());
        for (a, b) in infos.iter().zip(&again) {
            assert!(a.curve.almost_equal(&b.curve));
            assert_eq!(a.edges, b.edges);
        }
    }
}
