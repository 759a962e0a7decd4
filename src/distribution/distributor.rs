use tracing::{debug, info, warn};

use crate::classify::{ClassifyRoof, EdgeInfo, MostSimilarEdge, RoofLineType};
use crate::error::Result;
use crate::geometry::curve::Segment;
use crate::math::angle::rotate_2d;
use crate::math::spacing::establish_iterations;
use crate::math::{with_z, Point3, TOLERANCE};
use crate::roof::Roof;
use crate::settings::DistributionSettings;
use crate::support::{FindSupport, SupportIndex};
use crate::topology::EdgeCurve;
use crate::truss::{TrussBuilder, TrussInfo};

use super::sink::TrussSink;

/// Lays trusses out along the ridges of one roof.
///
/// Each ridge is first shortened: an end closed by a gable is pulled back
/// to the wall under it, any other end is set back by the perimeter
/// setback. The remaining length is split into equal intervals no longer
/// than the truss spacing and a truss is built at every interval boundary.
pub struct TrussDistributor<'a> {
    roof: &'a Roof,
    supports: &'a dyn SupportIndex,
    settings: DistributionSettings,
}

impl<'a> TrussDistributor<'a> {
    /// Creates a distributor with default settings.
    #[must_use]
    pub fn new(roof: &'a Roof, supports: &'a dyn SupportIndex) -> Self {
        Self {
            roof,
            supports,
            settings: DistributionSettings::default(),
        }
    }

    /// Replaces the layout settings.
    #[must_use]
    pub fn settings(mut self, settings: DistributionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Classifies the roof and distributes trusses along every ridge.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, a roof without level, a
    /// curved ridge or a failing sink. The pass stops at the first error.
    pub fn distribute_roof(&self, sink: &mut dyn TrussSink) -> Result<Vec<TrussInfo>> {
        self.settings.validate()?;
        self.roof.base_height()?;
        let edges = ClassifyRoof::new(self.roof, self.settings.face_side).execute()?;

        let mut trusses = Vec::new();
        for ridge in edges.iter().filter(|e| e.line_type.is_ridge()) {
            trusses.extend(self.distribute_ridge(ridge, &edges, sink)?);
        }
        info!(roof = self.roof.id().0, trusses = trusses.len(), "roof distributed");
        Ok(trusses)
    }

    /// Distributes trusses along the ridge matching an edge picked on any
    /// skin of the roof.
    ///
    /// Returns no trusses when the pick has no counterpart or the
    /// counterpart is not a ridge.
    ///
    /// # Errors
    ///
    /// Same as [`TrussDistributor::distribute_roof`].
    pub fn distribute_picked(&self, picked: &EdgeCurve, sink: &mut dyn TrussSink) -> Result<Vec<TrussInfo>> {
        self.settings.validate()?;
        let edges = ClassifyRoof::new(self.roof, self.settings.face_side).execute()?;
        match MostSimilarEdge::among(picked, &edges) {
            Some(ridge) if ridge.line_type.is_ridge() => self.distribute_ridge(ridge, &edges, sink),
            Some(other) => {
                debug!(line_type = ?other.line_type, "picked edge is not a ridge");
                Ok(Vec::new())
            }
            None => {
                debug!("picked edge has no counterpart");
                Ok(Vec::new())
            }
        }
    }

    /// Distributes trusses along one classified ridge.
    ///
    /// `edges` is the full classification of the roof, used to find the
    /// ridge's end conditions. Stations without a truss are reported to
    /// the sink as debug points when enabled.
    ///
    /// # Errors
    ///
    /// Same as [`TrussDistributor::distribute_roof`].
    pub fn distribute_ridge(
        &self,
        ridge: &EdgeInfo,
        edges: &[EdgeInfo],
        sink: &mut dyn TrussSink,
    ) -> Result<Vec<TrussInfo>> {
        if !ridge.line_type.is_ridge() {
            return Ok(Vec::new());
        }
        let height = self.roof.base_height()?;
        let builder = TrussBuilder::new(self.roof, edges, self.supports)
            .search_extent(self.settings.support_search_extent)
            .end_condition_search_extent(self.settings.end_condition_search_extent);

        let mut trusses = Vec::new();
        for station in self.stations(ridge, edges)? {
            let Some(truss) = builder.build_at_ridge(&station, ridge, None)? else {
                debug!(x = station.x, y = station.y, z = station.z, "no truss at station");
                if self.settings.emit_debug_markers {
                    sink.mark_debug_point(station);
                }
                continue;
            };
            let base = [with_z(&truss.base[0], height), with_z(&truss.base[1], height)];
            sink.place_truss(base, truss.height, self.settings.truss_type)?;
            trusses.push(truss);
        }
        Ok(trusses)
    }

    /// Station points along the shortened ridge, both ends included.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, a curved ridge or a roof
    /// without level.
    #[allow(clippy::cast_precision_loss)]
    pub fn stations(&self, ridge: &EdgeInfo, edges: &[EdgeInfo]) -> Result<Vec<Point3>> {
        self.settings.validate()?;
        let Some(usable) = self.shortened_ridge(ridge, edges)? else {
            return Ok(Vec::new());
        };
        let iterations = establish_iterations(usable.length(), self.settings.truss_spacing);
        debug!(
            length = usable.length(),
            count = iterations.count,
            spacing = iterations.spacing,
            "ridge stations"
        );
        Ok((0..=iterations.count)
            .map(|i| usable.point_at_distance(iterations.spacing * i as f64))
            .collect())
    }

    /// The part of the ridge trusses are laid along.
    ///
    /// `None` when the trimmed ends meet or cross.
    ///
    /// # Errors
    ///
    /// Returns an error for a curved ridge or a roof without level.
    pub fn shortened_ridge(&self, ridge: &EdgeInfo, edges: &[EdgeInfo]) -> Result<Option<Segment>> {
        let line = ridge.segment()?;
        let dir = line.direction();
        let setback = self.settings.perimeter_setback();

        let start = self
            .trim_to_gable_support(ridge, line, 0, edges)?
            .unwrap_or_else(|| line.start() + dir * setback);
        let end = self
            .trim_to_gable_support(ridge, line, 1, edges)?
            .unwrap_or_else(|| line.end() - dir * setback);

        if (end - start).dot(&dir) <= TOLERANCE {
            warn!(length = line.length(), "ridge too short after shortening");
            return Ok(None);
        }
        Ok(Some(Segment::new(start, end)?))
    }

    /// Where endpoint `index` of the ridge is pulled back to when it ends
    /// in a gable: the wall under the gable, projected onto the ridge line.
    fn trim_to_gable_support(
        &self,
        ridge: &EdgeInfo,
        line: &Segment,
        index: usize,
        edges: &[EdgeInfo],
    ) -> Result<Option<Point3>> {
        let ends = ridge.end_conditions(index, edges);
        if !(1..=2).contains(&ends.len())
            || !ends.iter().any(|e| e.line_type == RoofLineType::Gable)
        {
            return Ok(None);
        }
        let height = self.roof.base_height()?;
        let end = with_z(line.endpoint(index), height);
        let support = FindSupport::new(end)
            .along(rotate_2d(&line.direction(), 90.0))
            .extent(self.settings.end_condition_search_extent)
            .execute(self.supports, height);
        if support.element.is_none() {
            return Ok(None);
        }
        let trimmed = line.project_unbound(&support.point);
        debug!(index, x = trimmed.x, y = trimmed.y, "ridge end trimmed to gable support");
        Ok(Some(trimmed))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::distribution::RecordingSink;
    use crate::error::{PreconditionError, RoofError};
    use crate::operations::creation::{MakeGableRoof, MakeHipRoof, MakeShedRoof};
    use crate::support::{ElementId, SupportCatalog, SupportElement};
    use crate::topology::FaceSide;
    use crate::truss::TrussKind;
    use approx::assert_relative_eq;

    fn origin() -> Point3 {
        Point3::new(0.0, 0.0, 10.0)
    }

    fn sorted_x(points: &[Point3]) -> Vec<f64> {
        let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        xs.sort_by(f64::total_cmp);
        xs
    }

    #[test]
    fn hip_roof_gets_three_common_trusses() {
        let op = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0);
        let roof = op.execute().unwrap();
        let walls: SupportCatalog = op.supporting_walls().unwrap().into_iter().collect();
        let mut sink = RecordingSink::new();

        let trusses = TrussDistributor::new(&roof, &walls)
            .settings(DistributionSettings::default().with_truss_spacing(8.22))
            .distribute_roof(&mut sink)
            .unwrap();
        assert_eq!(trusses.len(), 3);
        assert_eq!(sink.placed.len(), 3);
        assert!(sink.debug_points.is_empty());
        for truss in &trusses {
            assert_eq!(truss.kind, TrussKind::Common);
            assert_relative_eq!(truss.height, 4.0, epsilon = 1e-6);
        }
        let apexes: Vec<Point3> = trusses.iter().map(|t| t.apex).collect();
        let xs = sorted_x(&apexes);
        assert_relative_eq!(xs[0], 6.968_5, epsilon = 1e-3);
        assert_relative_eq!(xs[1], 15.0, epsilon = 1e-6);
        assert_relative_eq!(xs[2], 23.031_5, epsilon = 1e-3);
        for placed in &sink.placed {
            assert_relative_eq!(placed.base[0].z, 10.0);
            assert_relative_eq!(placed.base[1].z, 10.0);
            assert_relative_eq!(placed.height, 4.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn gable_ends_trim_the_ridge_to_the_walls() {
        let op = MakeGableRoof::new(origin(), 30.0, 10.0, 1.0);
        let roof = op.execute().unwrap();
        let walls: SupportCatalog = op.supporting_walls().unwrap().into_iter().collect();
        let distributor = TrussDistributor::new(&roof, &walls);
        let edges = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let ridge = edges.iter().find(|e| e.line_type == RoofLineType::Ridge).unwrap();

        let stations = distributor.stations(ridge, &edges).unwrap();
        let xs = sorted_x(&stations);
        assert_eq!(xs.len(), 5);
        for (x, expected) in xs.iter().zip([1.0, 8.0, 15.0, 22.0, 29.0]) {
            assert_relative_eq!(*x, expected, epsilon = 1e-6);
        }
        assert!(stations.iter().all(|p| (p.z - 15.0).abs() < 1e-9));

        let raw = ridge.segment().unwrap();
        assert!((stations[0] - raw.start()).norm() > 0.5);

        let mut sink = RecordingSink::new();
        let trusses = distributor.distribute_ridge(ridge, &edges, &mut sink).unwrap();
        assert_eq!(trusses.len(), 5);
    }

    #[test]
    fn vanishing_spacing_is_an_error_not_a_station_flood() {
        let op = MakeGableRoof::new(origin(), 30.0, 10.0, 1.0);
        let roof = op.execute().unwrap();
        let walls: SupportCatalog = op.supporting_walls().unwrap().into_iter().collect();
        let edges = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let ridge = edges.iter().find(|e| e.line_type == RoofLineType::Ridge).unwrap();

        let distributor = TrussDistributor::new(&roof, &walls)
            .settings(DistributionSettings::default().with_truss_spacing(1e-300));
        assert!(matches!(
            distributor.stations(ridge, &edges),
            Err(RoofError::Precondition(PreconditionError::InvalidSettings(_)))
        ));
        let mut sink = RecordingSink::new();
        assert!(distributor.distribute_ridge(ridge, &edges, &mut sink).is_err());
        assert!(sink.placed.is_empty());
    }

    #[test]
    fn shed_roof_gets_mono_pitch_trusses() {
        let op = MakeShedRoof::new(origin(), 20.0, 10.0, 0.5);
        let roof = op.execute().unwrap();
        let walls: SupportCatalog = op.supporting_walls().unwrap().into_iter().collect();
        let mut sink = RecordingSink::new();

        let trusses = TrussDistributor::new(&roof, &walls)
            .distribute_roof(&mut sink)
            .unwrap();
        assert_eq!(trusses.len(), 4);
        assert!(trusses.iter().all(|t| t.kind == TrussKind::MonoPitch));
        let apexes: Vec<Point3> = trusses.iter().map(|t| t.apex).collect();
        let xs = sorted_x(&apexes);
        for (x, expected) in xs.iter().zip([1.0, 7.0, 13.0, 19.0]) {
            assert_relative_eq!(*x, expected, epsilon = 1e-6);
        }
        for truss in &trusses {
            assert_relative_eq!(truss.height, 4.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn failed_stations_become_debug_points() {
        let roof = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0).execute().unwrap();
        let spine = Segment::new(Point3::new(0.0, 5.0, 7.0), Point3::new(30.0, 5.0, 7.0)).unwrap();
        let walls: SupportCatalog = [SupportElement::wall(ElementId(1), spine, 0.5, 3.0)]
            .into_iter()
            .collect();
        let settings = DistributionSettings::default().with_support_search_extent(10.0);

        let mut sink = RecordingSink::new();
        let trusses = TrussDistributor::new(&roof, &walls)
            .settings(settings.clone())
            .distribute_roof(&mut sink)
            .unwrap();
        assert!(trusses.is_empty());
        assert!(sink.placed.is_empty());
        assert_eq!(sink.debug_points.len(), 3);
        assert!(sink.debug_points.iter().all(|p| (p.z - 15.0).abs() < 1e-9));

        let mut quiet = RecordingSink::new();
        TrussDistributor::new(&roof, &walls)
            .settings(settings.with_debug_markers(false))
            .distribute_roof(&mut quiet)
            .unwrap();
        assert!(quiet.debug_points.is_empty());
    }

    #[test]
    fn non_ridges_are_skipped() {
        let roof = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0).execute().unwrap();
        let walls = SupportCatalog::new();
        let edges = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let eave = edges.iter().find(|e| e.line_type == RoofLineType::Eave).unwrap();
        let mut sink = RecordingSink::new();
        assert!(TrussDistributor::new(&roof, &walls)
            .distribute_ridge(eave, &edges, &mut sink)
            .unwrap()
            .is_empty());
        assert!(sink.debug_points.is_empty());
    }

    #[test]
    fn short_ridge_has_no_stations() {
        let roof = MakeHipRoof::new(origin(), 12.0, 10.0, 1.0).execute().unwrap();
        let walls = SupportCatalog::new();
        let edges = ClassifyRoof::new(&roof, FaceSide::Bottom).execute().unwrap();
        let ridge = edges.iter().find(|e| e.line_type == RoofLineType::Ridge).unwrap();
        let distributor = TrussDistributor::new(&roof, &walls);
        assert!(distributor.shortened_ridge(ridge, &edges).unwrap().is_none());
        assert!(distributor.stations(ridge, &edges).unwrap().is_empty());
    }

    #[test]
    fn missing_level_aborts_the_pass() {
        let roof = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0)
            .builder()
            .unwrap()
            .clear_level()
            .build()
            .unwrap();
        let walls = SupportCatalog::new();
        let mut sink = RecordingSink::new();
        assert!(matches!(
            TrussDistributor::new(&roof, &walls).distribute_roof(&mut sink),
            Err(RoofError::Precondition(PreconditionError::MissingLevel))
        ));
        assert!(sink.placed.is_empty());
    }

    #[test]
    fn invalid_settings_are_rejected_before_classification() {
        let roof = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0).execute().unwrap();
        let walls = SupportCatalog::new();
        let mut sink = RecordingSink::new();
        assert!(TrussDistributor::new(&roof, &walls)
            .settings(DistributionSettings::default().with_truss_spacing(-2.0))
            .distribute_roof(&mut sink)
            .is_err());
    }

    #[test]
    fn picked_top_ridge_distributes_on_bottom_ridge() {
        let op = MakeHipRoof::new(origin(), 30.0, 10.0, 1.0);
        let roof = op.execute().unwrap();
        let walls: SupportCatalog = op.supporting_walls().unwrap().into_iter().collect();
        let picked = EdgeCurve::Segment(
            Segment::new(Point3::new(5.0, 5.0, 15.5), Point3::new(25.0, 5.0, 15.5)).unwrap(),
        );
        let mut sink = RecordingSink::new();
        let trusses = TrussDistributor::new(&roof, &walls)
            .distribute_picked(&picked, &mut sink)
            .unwrap();
        assert_eq!(trusses.len(), 3);
    }
}
