use tracing::trace;

use crate::classify::{EdgeInfo, RoofLineType};
use crate::error::{PreconditionError, Result};
use crate::geometry::curve::{Line, Segment};
use crate::math::angle::crossed_horizontal;
use crate::math::tolerance::points_almost_equal;
use crate::math::{basis_z, with_z, Point3, Vector3, TOLERANCE};
use crate::roof::Roof;
use crate::support::{FindSupport, SupportIndex, SupportPoint};

/// Distance below the roof base from which rays are cast up to the roof.
const RAY_DROP: f64 = 1.0;

/// Projects stations of one ridge onto its eaves, supports and roof.
///
/// Each step builds on the previous one, so the public methods form a
/// pipeline: eave points, points under the overhang, support points and
/// finally points on the roof underside.
pub struct RidgeProjector<'a> {
    roof: &'a Roof,
    ridge: &'a EdgeInfo,
    line: &'a Segment,
    supports: &'a dyn SupportIndex,
    search_extent: f64,
}

impl<'a> RidgeProjector<'a> {
    /// Creates a projector for a ridge-type edge of `roof`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotARidge`] for other edge types and
    /// [`PreconditionError::NotStraight`] for a curved ridge.
    pub fn new(roof: &'a Roof, ridge: &'a EdgeInfo, supports: &'a dyn SupportIndex) -> Result<Self> {
        if !ridge.line_type.is_ridge() {
            return Err(PreconditionError::NotARidge(ridge.line_type).into());
        }
        Ok(Self {
            roof,
            ridge,
            line: ridge.curve.require_segment("ridge")?,
            supports,
            search_extent: 1.0,
        })
    }

    /// Sets the edge of the support search cube (default 1).
    #[must_use]
    pub fn search_extent(mut self, extent: f64) -> Self {
        self.search_extent = extent;
        self
    }

    /// Crossings of the ridge's related eaves, at roof base height, with the
    /// horizontal line through `station` perpendicular to the ridge.
    ///
    /// Coincident crossings are reported once. A ridge without related
    /// eaves yields no points.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof has no level or an eave is missing.
    pub fn project_on_eaves(&self, station: &Point3) -> Result<Vec<Point3>> {
        let height = self.roof.base_height()?;
        let crossing = Line::new(with_z(station, height), crossed_horizontal(&self.line.direction()))?;

        let mut points: Vec<Point3> = Vec::new();
        for &eave in &self.ridge.related_ridge_eaves {
            let Some(eave) = self.roof.store().edge(eave)?.curve.as_segment() else {
                continue;
            };
            let Some(point) = eave.intersect_flattened_with(&crossing, height) else {
                continue;
            };
            if !points.iter().any(|p| points_almost_equal(p, &point)) {
                points.push(point);
            }
        }
        trace!(count = points.len(), "station projected on eaves");
        Ok(points)
    }

    /// Eave points moved inward by the overhang of their nearest profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof has no level or an eave is missing.
    pub fn eave_points_on_overhang(&self, station: &Point3) -> Result<Vec<Point3>> {
        let height = self.roof.base_height()?;
        let flat_station = with_z(station, height);
        Ok(self
            .project_on_eaves(station)?
            .into_iter()
            .map(|point| match self.roof.nearest_profile(&point, height) {
                Some((profile, foot)) => {
                    let inward = (flat_station - foot)
                        .try_normalize(TOLERANCE)
                        .unwrap_or_else(Vector3::zeros);
                    point + inward * profile.overhang
                }
                None => point,
            })
            .collect())
    }

    /// Overhang points snapped to the nearest wall or beam running along
    /// the ridge.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof has no level or an eave is missing.
    pub fn eave_points_on_supports(&self, station: &Point3) -> Result<Vec<SupportPoint>> {
        let height = self.roof.base_height()?;
        let along = self.line.direction();
        Ok(self
            .eave_points_on_overhang(station)?
            .into_iter()
            .map(|point| {
                FindSupport::new(point)
                    .along(along)
                    .extent(self.search_extent)
                    .execute(self.supports, height)
            })
            .collect())
    }

    /// Support points lifted onto the roof underside.
    ///
    /// Points under no part of the roof are dropped. A full ridge left with
    /// a single point on a roof with one common slope gets the point
    /// mirrored across the ridge as its second support. The slope check is
    /// roof-wide; the two panels at this ridge are assumed symmetric.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof has no level or an eave is missing.
    pub fn support_points_on_roof(&self, station: &Point3) -> Result<Vec<Point3>> {
        let height = self.roof.base_height()?;
        let mut points: Vec<Point3> = self
            .eave_points_on_supports(station)?
            .into_iter()
            .filter_map(|support| {
                let origin = with_z(&support.point, height - RAY_DROP);
                self.roof.cast_ray(&origin, &basis_z()).map(|hit| hit.point)
            })
            .collect();

        if let &[single] = points.as_slice() {
            if self.ridge.line_type == RoofLineType::Ridge && self.roof.has_same_slopes() {
                let under_ridge = with_z(station, single.z);
                let mirrored = single + (under_ridge - single) * 2.0;
                trace!(x = mirrored.x, y = mirrored.y, "mirrored single support across ridge");
                points.push(mirrored);
            }
        }
        Ok(points)
    }
}
