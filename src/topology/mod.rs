pub mod edge;
pub mod face;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId, FaceSide};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns all topological entities of a roof solid.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
/// Iteration follows insertion order as long as nothing is removed.
#[derive(Debug, Default, Clone)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    /// Finds the vertex sitting at `point` within the roof tolerance.
    #[must_use]
    pub fn find_vertex(&self, point: &Point3) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|(_, v)| v.is_at(point))
            .map(|(id, _)| id)
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Finds the edge joining two vertices, in either direction.
    #[must_use]
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edges
            .iter()
            .find(|(_, e)| (e.start == a && e.end == b) || (e.start == b && e.end == a))
            .map(|(id, _)| id)
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    // --- Wire operations ---

    /// Inserts a wire and returns its ID.
    pub fn add_wire(&mut self, data: WireData) -> WireId {
        self.wires.insert(data)
    }

    /// Returns a reference to the wire data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wire(&self, id: WireId) -> Result<&WireData, TopologyError> {
        self.wires
            .get(id)
            .ok_or(TopologyError::EntityNotFound("wire"))
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or(TopologyError::EntityNotFound("face"))
    }

    /// Iterates over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    // --- Traversal ---

    /// Edges of a face's outer loop, in loop order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its wire is missing.
    pub fn face_edges(&self, face: FaceId) -> Result<Vec<EdgeId>, TopologyError> {
        let wire = self.wire(self.face(face)?.outer_wire)?;
        Ok(wire.edges.iter().map(|oe| oe.edge).collect())
    }

    /// Corner points of a face's outer loop, in loop order.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn face_points(&self, face: FaceId) -> Result<Vec<Point3>, TopologyError> {
        let wire = self.wire(self.face(face)?.outer_wire)?;
        wire.edges
            .iter()
            .map(|oe| {
                let edge = self.edge(oe.edge)?;
                let start = if oe.forward { edge.start } else { edge.end };
                Ok(self.vertex(start)?.point)
            })
            .collect()
    }
}
