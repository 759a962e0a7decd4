//! Roof edge classification and truss layout for footprint roofs.
//!
//! A [`roof::Roof`] is a closed solid of planar panels. Its edges are tagged
//! by structural role in [`classify`], trusses are built at stations along
//! every ridge in [`truss`] and laid out and handed to the host in
//! [`distribution`].

pub mod classify;
pub mod distribution;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod projection;
pub mod roof;
pub mod settings;
pub mod support;
pub mod topology;
pub mod truss;

pub use error::{Result, RoofError};
