use thiserror::Error;

use crate::classify::RoofLineType;

/// Top-level error type for roof analysis and truss layout.
///
/// Only conditions that must abort the pass for a roof end up here.
/// Geometric misses (no face, no ray hit, no support) are plain `None`s.
#[derive(Debug, Error)]
pub enum RoofError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the roof solid's topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("edge is bounded by {faces} face(s), expected 2")]
    OpenEdge { faces: usize },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Fatal precondition violations for a roof or a station.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("roof level not found")]
    MissingLevel,

    #[error("{0} is not a straight line")]
    NotStraight(&'static str),

    #[error("edge is not a ridge (found {0:?})")]
    NotARidge(RoofLineType),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors raised by host collaborators while applying results.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`RoofError`].
pub type Result<T> = std::result::Result<T, RoofError>;
