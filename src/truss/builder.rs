use tracing::{debug, trace};

use crate::classify::{EdgeInfo, RoofLineType};
use crate::error::Result;
use crate::geometry::curve::{Line, Segment};
use crate::math::angle::crossed_horizontal;
use crate::math::intersect_3d::line_line_intersect_3d;
use crate::math::{basis_z, with_z, Point3, TOLERANCE};
use crate::projection::RidgeProjector;
use crate::roof::Roof;
use crate::support::{FindSupport, SupportIndex};

use super::{TrussInfo, TrussKind};

/// Offset off the ridge used to sample the roof slope.
const SLOPE_SAMPLE: f64 = 0.1;

/// Distance below the roof base from which rays are cast up to the roof.
const RAY_DROP: f64 = 1.0;

/// Builds trusses at stations of a classified roof.
///
/// The number of resolved supports decides the truss shape:
///
/// | edge             | supports | truss                                   |
/// |------------------|----------|-----------------------------------------|
/// | Ridge            | 2        | common truss over both supports         |
/// | RidgeSinglePanel | 1        | mono-pitch truss                        |
/// | Ridge            | 0        | common truss on valley or gable ends    |
/// | anything else    |          | none                                    |
pub struct TrussBuilder<'a> {
    roof: &'a Roof,
    edges: &'a [EdgeInfo],
    supports: &'a dyn SupportIndex,
    search_extent: f64,
    end_search_extent: f64,
}

impl<'a> TrussBuilder<'a> {
    /// Creates a builder over the classified `edges` of `roof`.
    #[must_use]
    pub fn new(roof: &'a Roof, edges: &'a [EdgeInfo], supports: &'a dyn SupportIndex) -> Self {
        Self {
            roof,
            edges,
            supports,
            search_extent: 1.0,
            end_search_extent: 20.0,
        }
    }

    /// Sets the support search cube used under the eaves (default 1).
    #[must_use]
    pub fn search_extent(mut self, extent: f64) -> Self {
        self.search_extent = extent;
        self
    }

    /// Sets the support search cube used at valley and gable ends (default 20).
    #[must_use]
    pub fn end_condition_search_extent(mut self, extent: f64) -> Self {
        self.end_search_extent = extent;
        self
    }

    /// Builds the truss at `station` on a ridge.
    ///
    /// `supports` overrides support resolution when non-empty; otherwise
    /// the supports are projected from the ridge's eaves.
    ///
    /// # Errors
    ///
    /// Returns an error for a curved ridge, a roof without level or broken
    /// topology. A station without a truss is `Ok(None)`.
    pub fn build_at_ridge(
        &self,
        station: &Point3,
        ridge: &EdgeInfo,
        supports: Option<&[Point3]>,
    ) -> Result<Option<TrussInfo>> {
        if !ridge.line_type.is_ridge() {
            return Ok(None);
        }
        ridge.segment()?;

        let supports = match supports {
            Some(points) if !points.is_empty() => points.to_vec(),
            _ => RidgeProjector::new(self.roof, ridge, self.supports)?
                .search_extent(self.search_extent)
                .support_points_on_roof(station)?,
        };

        let truss = match (ridge.line_type, supports.as_slice()) {
            (RoofLineType::Ridge, []) => return self.build_from_end_conditions(station, ridge),
            (RoofLineType::RidgeSinglePanel, &[support]) => {
                let apex = self.adjust_apex_to_roof_angle(station, &[support], ridge)?;
                TrussInfo::mono_pitch(apex, support)
            }
            (RoofLineType::Ridge, &[first, second]) => {
                let apex = self.adjust_apex_to_roof_angle(station, &[first, second], ridge)?;
                TrussInfo::between(apex, first, second, TrussKind::Common)
            }
            (line_type, points) => {
                debug!(?line_type, supports = points.len(), "no truss shape for support count");
                None
            }
        };
        if truss.is_none() {
            trace!(x = station.x, y = station.y, "degenerate truss rejected");
        }
        Ok(truss)
    }

    /// Builds a truss at a ridge station no eave reaches, bearing on the
    /// supports found where the ridge's far end conditions cross the
    /// station.
    ///
    /// The far end must meet exactly two valleys or gables. A valley's
    /// support sits under the roof, so the truss is lowered by the largest
    /// gap between a valley support and the roof above it.
    ///
    /// # Errors
    ///
    /// Returns an error for a curved ridge or a roof without level.
    pub fn build_from_end_conditions(&self, station: &Point3, ridge: &EdgeInfo) -> Result<Option<TrussInfo>> {
        if ridge.line_type != RoofLineType::Ridge {
            return Ok(None);
        }
        let ends = ridge.end_conditions(1, self.edges);
        if ends.len() != 2
            || !ends
                .iter()
                .all(|e| matches!(e.line_type, RoofLineType::Valley | RoofLineType::Gable))
        {
            debug!(count = ends.len(), "ridge end does not bound a truss");
            return Ok(None);
        }

        let height = self.roof.base_height()?;
        let line = ridge.segment()?;
        let flat_station = with_z(station, height);

        let mut supports = Vec::with_capacity(2);
        let mut valley_drop = 0.0_f64;
        for end in ends {
            let Some(end_line) = end.curve.as_segment() else {
                return Ok(None);
            };
            let Some(crossing) = crossing_at_end(line, &flat_station, end_line, height) else {
                return Ok(None);
            };
            let support = FindSupport::new(crossing)
                .along(line.direction())
                .extent(self.end_search_extent)
                .execute(self.supports, height)
                .point;
            if end.line_type == RoofLineType::Valley {
                if let Some(hit) = self
                    .roof
                    .cast_ray(&with_z(&support, height - RAY_DROP), &basis_z())
                {
                    valley_drop = valley_drop.max(hit.point.z - support.z);
                }
            }
            supports.push(support);
        }

        let apex = self.adjust_apex_to_roof_angle(station, &supports, ridge)?;
        let Some(mut truss) = TrussInfo::between(apex, supports[0], supports[1], TrussKind::Common)
        else {
            return Ok(None);
        };
        truss.height -= valley_drop;
        if truss.height <= 0.0 {
            debug!(valley_drop, "valley supports leave no truss height");
            return Ok(None);
        }
        Ok(Some(truss))
    }

    /// Moves `apex` along the vertical until the line from the nearest
    /// support at the true roof slope reaches it.
    ///
    /// The slope is sampled by projecting a point just off the ridge onto
    /// the ridge's first panel. The apex is returned unchanged whenever the
    /// sample or the intersection fails.
    ///
    /// # Errors
    ///
    /// Returns an error for a curved ridge.
    pub fn adjust_apex_to_roof_angle(
        &self,
        apex: &Point3,
        supports: &[Point3],
        ridge: &EdgeInfo,
    ) -> Result<Point3> {
        let line = ridge.segment()?;
        let Some(&face) = ridge.related_panel_faces.first() else {
            return Ok(*apex);
        };
        let across = crossed_horizontal(&line.direction()) * SLOPE_SAMPLE;
        let sample = [apex + across, apex - across].into_iter().find_map(|offset| {
            self.roof
                .project_onto_face(face, &offset)
                .map(|foot| (offset, foot))
        });
        let Some((offset, foot)) = sample else {
            return Ok(*apex);
        };

        let Some(slope) = (line.project_unbound(apex) - foot).try_normalize(TOLERANCE) else {
            return Ok(*apex);
        };
        let Some(nearest) = supports
            .iter()
            .min_by(|a, b| (*a - offset).norm().total_cmp(&(*b - offset).norm()))
        else {
            return Ok(*apex);
        };

        let adjusted = line_line_intersect_3d(nearest, &slope, apex, &basis_z()).unwrap_or(*apex);
        trace!(from = apex.z, to = adjusted.z, "apex adjusted to roof slope");
        Ok(adjusted)
    }

    /// Builds the truss at `station` bearing on user-chosen support lines.
    ///
    /// Each line contributes the point where the horizontal crossing of the
    /// ridge at `station` meets it. Without any such point the supports are
    /// projected from the eaves as usual.
    ///
    /// # Errors
    ///
    /// Returns an error for a curved ridge or a roof without level.
    pub fn build_with_support_lines(
        &self,
        station: &Point3,
        ridge: &EdgeInfo,
        lines: &[Segment],
    ) -> Result<Option<TrussInfo>> {
        let height = self.roof.base_height()?;
        let flat_ridge = ridge.segment()?.flatten(height)?;
        let crossing = Line::new(
            with_z(station, height),
            crossed_horizontal(&flat_ridge.direction()),
        )?;
        let points: Vec<Point3> = lines
            .iter()
            .filter_map(|support| support.intersect_flattened_with(&crossing, height))
            .collect();
        self.build_at_ridge(station, ridge, Some(&points))
    }

    /// Builds a truss with its apex at `point` on a hip, bearing on two
    /// support lines crossed square to the hip in plan.
    ///
    /// # Errors
    ///
    /// Returns an error for a curved hip or a roof without level.
    pub fn build_at_hip(
        &self,
        point: &Point3,
        hip: &EdgeInfo,
        first: &Segment,
        second: &Segment,
    ) -> Result<Option<TrussInfo>> {
        if hip.line_type != RoofLineType::Hip {
            return Ok(None);
        }
        let height = self.roof.base_height()?;
        let flat_hip = hip.segment()?.flatten(height)?;
        let crossing = Line::new(
            with_z(point, height),
            crossed_horizontal(&flat_hip.direction()),
        )?;
        let cross = |support: &Segment| {
            support
                .flatten(height)
                .ok()
                .and_then(|flat| flat.unbound().intersect_flat(&crossing, height))
        };
        let (Some(a), Some(b)) = (cross(first), cross(second)) else {
            return Ok(None);
        };
        Ok(TrussInfo::between(*point, a, b, TrussKind::Hip))
    }
}

/// Where the horizontal crossing of `ridge` through `flat_station` meets
/// the unbounded plan line of `end`, at `height`.
fn crossing_at_end(ridge: &Segment, flat_station: &Point3, end: &Segment, height: f64) -> Option<Point3> {
    let across = crossed_horizontal(&ridge.flatten(height).ok()?.direction());
    let crossing = Line::new(*flat_station, across).ok()?;
    end.flatten(height)
        .ok()?
        .unbound()
        .intersect_flat(&crossing, height)
}
