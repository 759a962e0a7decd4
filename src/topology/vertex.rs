use crate::math::tolerance::points_almost_equal;
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// A roof corner shared by the faces and edges meeting there.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex.
    pub point: Point3,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }

    /// Whether the vertex sits at `point` within the roof tolerance.
    #[must_use]
    pub fn is_at(&self, point: &Point3) -> bool {
        points_almost_equal(&self.point, point)
    }
}
