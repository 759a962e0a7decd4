//! Truss layout along the ridges of a classified roof.
//!
//! [`TrussDistributor`] drives a pass: it classifies the roof, picks the
//! stations on every ridge and hands each built truss to a [`TrussSink`].

mod distributor;
mod sink;

pub use distributor::TrussDistributor;
pub use sink::{PlacedTruss, RecordingSink, TrussSink};
