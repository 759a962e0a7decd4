use super::{Aabb, Category, SupportElement, SupportIndex};

/// In-memory list of support candidates, queried by linear scan.
#[derive(Debug, Clone, Default)]
pub struct SupportCatalog {
    elements: Vec<SupportElement>,
}

impl SupportCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element.
    pub fn push(&mut self, element: SupportElement) {
        self.elements.push(element);
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<SupportElement> for SupportCatalog {
    fn from_iter<I: IntoIterator<Item = SupportElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<SupportElement> for SupportCatalog {
    fn extend<I: IntoIterator<Item = SupportElement>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl SupportIndex for SupportCatalog {
    fn query(&self, bounds: &Aabb, categories: &[Category]) -> Vec<&SupportElement> {
        self.elements
            .iter()
            .filter(|e| categories.contains(&e.category) && e.bounds.intersects(bounds))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Segment;
    use crate::math::Point3;
    use crate::support::ElementId;

    #[test]
    fn query_filters_by_category_and_bounds() {
        let line = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)).unwrap();
        let catalog: SupportCatalog = [
            SupportElement::wall(ElementId(1), line.clone(), 0.5, 3.0),
            SupportElement::beam(ElementId(2), line.clone(), 0.3, 0.6),
            SupportElement::wall(ElementId(3), line.flatten(50.0).unwrap(), 0.5, 3.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 3);

        let bounds = Aabb::around(&Point3::new(5.0, 0.0, 1.0), 1.0);
        let walls = catalog.query(&bounds, &[Category::Wall]);
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].id, ElementId(1));

        let both = catalog.query(&bounds, &[Category::Wall, Category::StructuralFraming]);
        assert_eq!(both.len(), 1);
        let beams = catalog.query(&Aabb::around(&Point3::new(5.0, 0.0, -0.2), 0.2), &[Category::StructuralFraming]);
        assert_eq!(beams.len(), 1);
    }
}
