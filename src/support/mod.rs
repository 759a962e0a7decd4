//! Walls and structural framing that trusses can bear on.
//!
//! The host's element query is abstracted as [`SupportIndex`]; an in-memory
//! [`SupportCatalog`] implements it for tests and offline use.

mod catalog;
mod search;

pub use catalog::SupportCatalog;
pub use search::{FindSupport, SupportPoint};

use crate::geometry::curve::Segment;
use crate::math::Point3;
use crate::topology::EdgeCurve;

/// Host element id of a support candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Element categories relevant to support search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Walls.
    Wall,
    /// Beams and other structural framing.
    StructuralFraming,
    /// Trusses; only meaningful as the host of framing members.
    StructuralTruss,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Cube of edge `extent` centered on `center`.
    #[must_use]
    pub fn around(center: &Point3, extent: f64) -> Self {
        let half = extent * 0.5;
        Self {
            min: Point3::new(center.x - half, center.y - half, center.z - half),
            max: Point3::new(center.x + half, center.y + half, center.z + half),
        }
    }

    /// Box enclosing a segment, grown by `pad` horizontally and spanning
    /// `height` upward from the segment's lower end.
    #[must_use]
    pub fn around_segment(line: &Segment, pad: f64, height: f64) -> Self {
        let (a, b) = (line.start(), line.end());
        Self {
            min: Point3::new(a.x.min(b.x) - pad, a.y.min(b.y) - pad, a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x) + pad, a.y.max(b.y) + pad, a.z.max(b.z) + height),
        }
    }

    /// Whether the boxes overlap; touching counts.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// A wall or framing element as seen by the support search.
#[derive(Debug, Clone)]
pub struct SupportElement {
    /// Host element id.
    pub id: ElementId,
    /// Element category.
    pub category: Category,
    /// Location curve; elements placed by point have none.
    pub location: Option<EdgeCurve>,
    /// Bounding box of the element's geometry.
    pub bounds: Aabb,
    /// Category of the hosting element, for hosted framing.
    pub host: Option<Category>,
}

impl SupportElement {
    /// A wall standing on `base_line`, `thickness` wide and `height` tall.
    #[must_use]
    pub fn wall(id: ElementId, base_line: Segment, thickness: f64, height: f64) -> Self {
        Self {
            id,
            category: Category::Wall,
            bounds: Aabb::around_segment(&base_line, thickness * 0.5, height),
            location: Some(EdgeCurve::Segment(base_line)),
            host: None,
        }
    }

    /// A beam along `line`, `width` wide and `depth` deep below the line.
    #[must_use]
    pub fn beam(id: ElementId, line: Segment, width: f64, depth: f64) -> Self {
        let mut bounds = Aabb::around_segment(&line, width * 0.5, 0.0);
        bounds.min.z -= depth;
        Self {
            id,
            category: Category::StructuralFraming,
            bounds,
            location: Some(EdgeCurve::Segment(line)),
            host: None,
        }
    }

    /// Marks the element as hosted by an element of `category`.
    #[must_use]
    pub fn hosted_by(mut self, category: Category) -> Self {
        self.host = Some(category);
        self
    }
}

/// Spatial query over the host model's support candidates.
pub trait SupportIndex {
    /// Elements of the given categories whose bounds intersect `bounds`.
    fn query(&self, bounds: &Aabb, categories: &[Category]) -> Vec<&SupportElement>;
}
