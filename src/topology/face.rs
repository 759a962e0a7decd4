use crate::geometry::surface::Plane;

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Which skin of the roof solid a face belongs to.
///
/// Top and bottom faces are the sloped panels; side faces are the vertical
/// fascia and gable-end faces joining them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceSide {
    /// Upper, weather-facing panels.
    Top,
    /// Lower, ceiling-facing panels.
    Bottom,
    /// Vertical faces around the roof perimeter.
    Side,
}

/// A planar face of the roof solid.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The plane on which this face lies.
    pub plane: Plane,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Skin the face belongs to.
    pub side: FaceSide,
}
