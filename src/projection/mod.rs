//! Resolution of truss support points for a station on a ridge.
//!
//! A station is carried across the roof slope to the ridge's eaves, moved
//! back under the overhang onto the supporting wall line, snapped to the
//! nearest wall or beam and finally lifted onto the underside of the roof.

mod ridge_projector;

pub use ridge_projector::RidgeProjector;
