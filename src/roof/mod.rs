//! Immutable snapshot of a footprint roof as handed over by the host.
//!
//! A [`Roof`] owns the closed solid (bottom, top and side faces in a
//! [`TopologyStore`]) together with the element parameters the truss layout
//! reads: level elevation, base offset, slope and the sketch profiles with
//! their overhangs. It also answers the two geometric queries the host
//! kernel provides, ray casting and face projection.

mod builder;

pub use builder::RoofBuilder;

use crate::error::{PreconditionError, Result};
use crate::geometry::curve::Segment;
use crate::geometry::surface::Plane;
use crate::math::intersect_3d::{line_plane_intersect, LinePlaneRelation};
use crate::math::polygon_3d::point_in_polygon_3d;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{FaceId, FaceSide, TopologyStore};

/// Host element id of a roof.
///
/// Classified edges hold this as a lookup-only handle; they never own the roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoofId(pub u64);

/// One sketch line of the roof footprint and the overhang configured on it.
#[derive(Debug, Clone)]
pub struct EaveProfile {
    /// Footprint line, usually the wall line under the eave.
    pub line: Segment,
    /// Horizontal distance the roof extends past `line`.
    pub overhang: f64,
}

impl EaveProfile {
    /// Creates a profile line with its overhang.
    #[must_use]
    pub fn new(line: Segment, overhang: f64) -> Self {
        Self { line, overhang }
    }
}

/// Nearest forward intersection of a ray with the roof solid.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Intersection point.
    pub point: Point3,
    /// Face that was hit.
    pub face: FaceId,
    /// Ray parameter of the hit (distance for a unit direction).
    pub distance: f64,
}

/// A footprint roof: its solid and the element parameters used for layout.
#[derive(Debug, Clone)]
pub struct Roof {
    id: RoofId,
    store: TopologyStore,
    level_elevation: Option<f64>,
    base_offset: f64,
    slope: f64,
    profiles: Vec<EaveProfile>,
}

impl Roof {
    /// Host id of the roof element.
    #[must_use]
    pub fn id(&self) -> RoofId {
        self.id
    }

    /// The roof solid.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// Roof-wide slope parameter (rise over run); zero when slopes differ per edge.
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Footprint sketch lines with their overhangs.
    #[must_use]
    pub fn profiles(&self) -> &[EaveProfile] {
        &self.profiles
    }

    /// Elevation of the roof base: level elevation plus base offset.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingLevel`] if the roof has no level.
    pub fn base_height(&self) -> Result<f64> {
        let level = self.level_elevation.ok_or(PreconditionError::MissingLevel)?;
        Ok(level + self.base_offset)
    }

    /// Whether every panel shares the roof-wide slope.
    ///
    /// Only the slope parameter is consulted; the two panels at a given
    /// ridge are not compared.
    #[must_use]
    pub fn has_same_slopes(&self) -> bool {
        self.slope > 0.0
    }

    /// Faces of one skin, in insertion order.
    #[must_use]
    pub fn faces(&self, side: FaceSide) -> Vec<FaceId> {
        self.store
            .faces()
            .filter(|(_, f)| f.side == side)
            .map(|(id, _)| id)
            .collect()
    }

    /// Plane of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing.
    pub fn face_plane(&self, face: FaceId) -> Result<&Plane> {
        Ok(&self.store.face(face)?.plane)
    }

    /// Corner points of a face's outer loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its loop is missing.
    pub fn face_points(&self, face: FaceId) -> Result<Vec<Point3>> {
        Ok(self.store.face_points(face)?)
    }

    /// Lowest Z of a face's outer loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its loop is missing.
    pub fn face_base_elevation(&self, face: FaceId) -> Result<f64> {
        Ok(self
            .face_points(face)?
            .iter()
            .map(|p| p.z)
            .fold(f64::INFINITY, f64::min))
    }

    /// Number of sides of a face's outer loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its loop is missing.
    pub fn outer_loop_len(&self, face: FaceId) -> Result<usize> {
        let outer = self.store.face(face)?.outer_wire;
        Ok(self.store.wire(outer)?.len())
    }

    /// Nearest forward hit of the ray `origin + t * direction`, `t > 0`,
    /// against every face of the solid.
    ///
    /// Faces the ray runs parallel to, or lies in, are ignored.
    #[must_use]
    pub fn cast_ray(&self, origin: &Point3, direction: &Vector3) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for (id, face) in self.store.faces() {
            let LinePlaneRelation::Point { point, t } =
                line_plane_intersect(origin, direction, &face.plane)
            else {
                continue;
            };
            if t <= TOLERANCE || best.is_some_and(|b| b.distance <= t) {
                continue;
            }
            let Ok(polygon) = self.store.face_points(id) else {
                continue;
            };
            if point_in_polygon_3d(&point, &polygon, &face.plane) {
                best = Some(RayHit {
                    point,
                    face: id,
                    distance: t,
                });
            }
        }
        best
    }

    /// Orthogonal projection of `point` onto a face.
    ///
    /// `None` if the face is missing or the foot of the projection lies
    /// outside the face.
    #[must_use]
    pub fn project_onto_face(&self, face: FaceId, point: &Point3) -> Option<Point3> {
        let plane = self.face_plane(face).ok()?;
        let polygon = self.face_points(face).ok()?;
        let foot = plane.project(point);
        point_in_polygon_3d(&foot, &polygon, plane).then_some(foot)
    }

    /// Profile line closest to `point` once flattened to `height`, with the
    /// closest point on it.
    #[must_use]
    pub fn nearest_profile(&self, point: &Point3, height: f64) -> Option<(&EaveProfile, Point3)> {
        self.profiles
            .iter()
            .filter_map(|profile| {
                let flat = profile.line.flatten(height).ok()?;
                let (closest, distance) = flat.project(point);
                Some((profile, closest, distance))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(profile, closest, _)| (profile, closest))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::basis_z;
    use crate::operations::creation::{MakeHipRoof, MakeShedRoof};
    use approx::assert_relative_eq;

    fn hip_roof() -> Roof {
        MakeHipRoof::new(Point3::new(0.0, 0.0, 10.0), 30.0, 10.0, 1.0)
            .execute()
            .unwrap()
    }

    #[test]
    fn base_height_adds_offset_to_level() {
        let roof = MakeShedRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 0.5)
            .builder()
            .unwrap()
            .level(8.0)
            .base_offset(2.0)
            .build()
            .unwrap();
        assert_relative_eq!(roof.base_height().unwrap(), 10.0);
    }

    #[test]
    fn missing_level_is_a_precondition_error() {
        let roof = MakeShedRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 0.5)
            .builder()
            .unwrap()
            .clear_level()
            .build()
            .unwrap();
        assert!(matches!(
            roof.base_height(),
            Err(crate::error::RoofError::Precondition(PreconditionError::MissingLevel))
        ));
    }

    #[test]
    fn upward_ray_hits_bottom_panel_first() {
        let roof = hip_roof();
        let hit = roof
            .cast_ray(&Point3::new(15.0, 1.0, 9.0), &basis_z())
            .unwrap();
        assert_relative_eq!(hit.point.z, 11.0, epsilon = 1e-9);
        assert_eq!(roof.store().face(hit.face).unwrap().side, FaceSide::Bottom);
    }

    #[test]
    fn downward_ray_from_above_hits_top_panel() {
        let roof = hip_roof();
        let hit = roof
            .cast_ray(&Point3::new(15.0, 1.0, 999.0), &(-basis_z()))
            .unwrap();
        assert_eq!(roof.store().face(hit.face).unwrap().side, FaceSide::Top);
        assert_relative_eq!(hit.point.z, 11.5, epsilon = 1e-9);
    }

    #[test]
    fn ray_outside_footprint_misses() {
        let roof = hip_roof();
        assert!(roof
            .cast_ray(&Point3::new(-0.1, 0.0, 999.0), &(-basis_z()))
            .is_none());
    }

    #[test]
    fn face_projection_inside_and_outside() {
        let roof = hip_roof();
        let south = roof.faces(FaceSide::Bottom)[0];
        let foot = roof
            .project_onto_face(south, &Point3::new(15.0, 4.9, 15.0))
            .unwrap();
        assert_relative_eq!(foot.y, 4.95, epsilon = 1e-9);
        assert_relative_eq!(foot.z, 14.95, epsilon = 1e-9);
        assert!(roof
            .project_onto_face(south, &Point3::new(15.0, 5.1, 15.0))
            .is_none());
    }

    #[test]
    fn face_queries() {
        let roof = hip_roof();
        let bottom = roof.faces(FaceSide::Bottom);
        assert_eq!(bottom.len(), 4);
        assert_eq!(roof.faces(FaceSide::Top).len(), 4);
        assert_eq!(roof.faces(FaceSide::Side).len(), 4);
        assert_eq!(roof.outer_loop_len(bottom[0]).unwrap(), 4);
        assert_eq!(roof.outer_loop_len(bottom[1]).unwrap(), 3);
        assert_relative_eq!(roof.face_base_elevation(bottom[0]).unwrap(), 10.0);
    }

    #[test]
    fn nearest_profile_is_flattened() {
        let roof = hip_roof();
        let (profile, closest) = roof
            .nearest_profile(&Point3::new(7.0, 0.0, 10.0), 10.0)
            .unwrap();
        assert_relative_eq!(profile.overhang, 1.0);
        assert_relative_eq!(closest.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(closest.z, 10.0);
    }
}
