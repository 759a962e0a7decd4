use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::geometry::curve::Segment;
use crate::geometry::surface::Plane;
use crate::math::tolerance::points_almost_equal;
use crate::math::{Point3, Vector3};
use crate::topology::{
    EdgeCurve, EdgeData, FaceData, FaceId, FaceSide, OrientedEdge, TopologyStore, VertexData,
    VertexId, WireData,
};

use super::{EaveProfile, Roof, RoofId};

/// Assembles a closed roof solid from its bottom panels.
///
/// Each panel is a planar polygon of the roof's underside. The top skin is
/// the same panels raised by `thickness`; every panel side not shared with
/// another panel gets a vertical side face joining the two skins.
#[derive(Debug, Clone)]
pub struct RoofBuilder {
    id: RoofId,
    panels: Vec<Vec<Point3>>,
    thickness: f64,
    level_elevation: Option<f64>,
    base_offset: f64,
    slope: f64,
    profiles: Vec<EaveProfile>,
}

impl RoofBuilder {
    /// Starts a roof with no panels, a thickness of 0.5 and no level.
    #[must_use]
    pub fn new(id: RoofId) -> Self {
        Self {
            id,
            panels: Vec::new(),
            thickness: 0.5,
            level_elevation: None,
            base_offset: 0.0,
            slope: 0.0,
            profiles: Vec::new(),
        }
    }

    /// Adds a bottom panel polygon.
    #[must_use]
    pub fn panel(mut self, points: Vec<Point3>) -> Self {
        self.panels.push(points);
        self
    }

    /// Sets the vertical thickness between bottom and top skins.
    #[must_use]
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the elevation of the roof's level.
    #[must_use]
    pub fn level(mut self, elevation: f64) -> Self {
        self.level_elevation = Some(elevation);
        self
    }

    /// Detaches the roof from its level.
    #[must_use]
    pub fn clear_level(mut self) -> Self {
        self.level_elevation = None;
        self
    }

    /// Sets the roof's base offset from its level.
    #[must_use]
    pub fn base_offset(mut self, offset: f64) -> Self {
        self.base_offset = offset;
        self
    }

    /// Sets the roof-wide slope parameter.
    #[must_use]
    pub fn slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self
    }

    /// Adds a footprint sketch line with its overhang.
    #[must_use]
    pub fn profile(mut self, profile: EaveProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Builds the solid.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no panels, the thickness is not
    /// positive, a panel is degenerate, or the resulting solid has an edge
    /// that does not bound exactly two faces.
    pub fn build(self) -> Result<Roof> {
        if self.panels.is_empty() {
            return Err(TopologyError::InvalidTopology("roof has no panels".into()).into());
        }
        if self.thickness <= 0.0 {
            return Err(
                TopologyError::InvalidTopology("roof thickness must be positive".into()).into(),
            );
        }

        let lift = Vector3::new(0.0, 0.0, self.thickness);
        let mut store = TopologyStore::new();

        for panel in &self.panels {
            add_face(&mut store, panel, FaceSide::Bottom)?;
        }
        for panel in &self.panels {
            let raised: Vec<Point3> = panel.iter().rev().map(|p| p + lift).collect();
            add_face(&mut store, &raised, FaceSide::Top)?;
        }
        for (a, b) in boundary_sides(&self.panels) {
            add_face(&mut store, &[b, a, a + lift, b + lift], FaceSide::Side)?;
        }

        if let Some((_, edge)) = store.edges().find(|(_, e)| e.faces.len() != 2) {
            return Err(TopologyError::OpenEdge {
                faces: edge.faces.len(),
            }
            .into());
        }

        debug!(
            roof = self.id.0,
            panels = self.panels.len(),
            faces = store.faces().count(),
            edges = store.edges().count(),
            "built roof solid"
        );

        Ok(Roof {
            id: self.id,
            store,
            level_elevation: self.level_elevation,
            base_offset: self.base_offset,
            slope: self.slope,
            profiles: self.profiles,
        })
    }
}

/// Panel sides used by exactly one panel, oriented as in that panel.
fn boundary_sides(panels: &[Vec<Point3>]) -> Vec<(Point3, Point3)> {
    let sides: Vec<(Point3, Point3)> = panels
        .iter()
        .flat_map(|panel| {
            (0..panel.len()).map(move |i| (panel[i], panel[(i + 1) % panel.len()]))
        })
        .collect();
    sides
        .iter()
        .filter(|(a, b)| {
            sides
                .iter()
                .filter(|(c, d)| {
                    (points_almost_equal(a, c) && points_almost_equal(b, d))
                        || (points_almost_equal(a, d) && points_almost_equal(b, c))
                })
                .count()
                == 1
        })
        .copied()
        .collect()
}

fn vertex_at(store: &mut TopologyStore, point: &Point3) -> VertexId {
    store
        .find_vertex(point)
        .unwrap_or_else(|| store.add_vertex(VertexData::new(*point)))
}

/// Adds a planar face, reusing vertices and edges already in the store.
fn add_face(store: &mut TopologyStore, points: &[Point3], side: FaceSide) -> Result<FaceId> {
    let plane = Plane::from_polygon(points)?;
    let vertices: Vec<VertexId> = points.iter().map(|p| vertex_at(store, p)).collect();

    let mut oriented = Vec::with_capacity(vertices.len());
    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        if start == end {
            return Err(TopologyError::InvalidTopology("panel has a zero-length side".into()).into());
        }
        let edge = match store.find_edge(start, end) {
            Some(edge) => edge,
            None => {
                let curve = Segment::new(store.vertex(start)?.point, store.vertex(end)?.point)?;
                store.add_edge(EdgeData {
                    start,
                    end,
                    curve: EdgeCurve::Segment(curve),
                    faces: Vec::new(),
                })
            }
        };
        let forward = store.edge(edge)?.start == start;
        oriented.push(OrientedEdge::new(edge, forward));
    }

    let edges: Vec<_> = oriented.iter().map(|oe| oe.edge).collect();
    let outer_wire = store.add_wire(WireData { edges: oriented });
    let face = store.add_face(FaceData {
        plane,
        outer_wire,
        side,
    });
    for edge in edges {
        store.edge_mut(edge)?.faces.push(face);
    }
    Ok(face)
}
