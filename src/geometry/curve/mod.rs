//! Straight and circular curves of roof edges.

mod arc;
mod line;
mod segment;

pub use arc::Arc;
pub use line::Line;
pub use segment::Segment;
