pub mod curve;
pub mod surface;

pub use curve::{Arc, Line, Segment};
pub use surface::Plane;
