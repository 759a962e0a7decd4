use crate::error::{PreconditionError, Result};
use crate::geometry::curve::{Arc, Segment};
use crate::math::tolerance::{endpoints_almost_equal, points_almost_equal};
use crate::math::Point3;

use super::face::FaceId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// The geometric curve associated with an edge.
#[derive(Debug, Clone)]
pub enum EdgeCurve {
    /// A straight segment.
    Segment(Segment),
    /// A circular arc.
    Arc(Arc),
}

impl EdgeCurve {
    /// First endpoint.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        match self {
            Self::Segment(s) => *s.start(),
            Self::Arc(a) => a.start_point(),
        }
    }

    /// Second endpoint.
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        match self {
            Self::Segment(s) => *s.end(),
            Self::Arc(a) => a.end_point(),
        }
    }

    /// Endpoint `0` (start) or any other index (end).
    #[must_use]
    pub fn endpoint(&self, index: usize) -> Point3 {
        if index == 0 {
            self.start_point()
        } else {
            self.end_point()
        }
    }

    /// Point halfway along the curve.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        match self {
            Self::Segment(s) => s.midpoint(),
            Self::Arc(a) => a.midpoint(),
        }
    }

    /// Curve length.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Segment(s) => s.length(),
            Self::Arc(a) => a.length(),
        }
    }

    /// Closest point on the bounded curve to `point`.
    #[must_use]
    pub fn closest_point(&self, point: &Point3) -> Point3 {
        match self {
            Self::Segment(s) => s.project(point).0,
            Self::Arc(a) => a.closest_point(point),
        }
    }

    /// The straight segment, if this curve is one.
    #[must_use]
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::Segment(s) => Some(s),
            Self::Arc(_) => None,
        }
    }

    /// The straight segment, or a fatal error naming `what` for curved input.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotStraight`] for arcs.
    pub fn require_segment(&self, what: &'static str) -> Result<&Segment> {
        self.as_segment()
            .ok_or_else(|| PreconditionError::NotStraight(what).into())
    }

    /// Undirected comparison within the roof tolerance.
    ///
    /// Arcs must also agree at their midpoints, so a chord never matches its arc.
    #[must_use]
    pub fn almost_equal(&self, other: &EdgeCurve) -> bool {
        let (a0, a1) = (self.start_point(), self.end_point());
        let (b0, b1) = (other.start_point(), other.end_point());
        if !endpoints_almost_equal((&a0, &a1), (&b0, &b1)) {
            return false;
        }
        match (self, other) {
            (Self::Segment(_), Self::Segment(_)) => true,
            (Self::Arc(_), Self::Arc(_)) => points_almost_equal(&self.midpoint(), &other.midpoint()),
            _ => false,
        }
    }

    /// Whether `point` matches either endpoint.
    #[must_use]
    pub fn touches(&self, point: &Point3) -> bool {
        points_almost_equal(&self.start_point(), point) || points_almost_equal(&self.end_point(), point)
    }
}

/// Data associated with a topological edge.
///
/// An edge connects two vertices, carries the curve between them and
/// records the faces it bounds. A closed roof solid has exactly two.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The geometric curve defining this edge's shape.
    pub curve: EdgeCurve,
    /// Faces bounded by this edge.
    pub faces: Vec<FaceId>,
}

impl EdgeData {
    /// Face `index` of the edge, if bounded by that many faces.
    #[must_use]
    pub fn face(&self, index: usize) -> Option<FaceId> {
        self.faces.get(index).copied()
    }

    /// Whether the edge and `other` share at least one bounding face.
    #[must_use]
    pub fn shares_face_with(&self, other: &EdgeData) -> bool {
        self.faces.iter().any(|f| other.faces.contains(f))
    }
}
