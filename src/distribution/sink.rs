use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::settings::TrussTypeId;
use crate::support::ElementId;

/// Host side of a distribution pass: persists trusses and diagnostics.
///
/// All reads for a station happen before the station's writes, so a sink
/// may mutate the document the roof was read from.
pub trait TrussSink {
    /// Creates a truss of `truss_type` on the base line `base` with the
    /// given height parameter, returning the new element's id.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the element.
    fn place_truss(&mut self, base: [Point3; 2], height: f64, truss_type: TrussTypeId) -> Result<ElementId>;

    /// Marks a station where no truss could be built.
    fn mark_debug_point(&mut self, point: Point3);
}

/// A persisted truss as seen by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTruss {
    /// Id handed back to the caller.
    pub id: ElementId,
    /// Base line endpoints at roof base height.
    pub base: [Point3; 2],
    /// Height parameter of the element.
    pub height: f64,
    /// Family type of the element.
    pub truss_type: TrussTypeId,
}

/// In-memory sink that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Trusses in placement order.
    pub placed: Vec<PlacedTruss>,
    /// Stations reported without a truss.
    pub debug_points: Vec<Point3>,
    next_id: u64,
}

impl RecordingSink {
    /// Creates an empty sink; element ids start at 1000.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }
}

impl TrussSink for RecordingSink {
    fn place_truss(&mut self, base: [Point3; 2], height: f64, truss_type: TrussTypeId) -> Result<ElementId> {
        if !height.is_finite() || height <= 0.0 {
            return Err(OperationError::InvalidInput(format!("truss height {height}")).into());
        }
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.placed.push(PlacedTruss {
            id,
            base,
            height,
            truss_type,
        });
        Ok(id)
    }

    fn mark_debug_point(&mut self, point: Point3) {
        self.debug_points.push(point);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn records_trusses_with_fresh_ids() {
        let mut sink = RecordingSink::new();
        let base = [Point3::new(0.0, 1.0, 10.0), Point3::new(0.0, 9.0, 10.0)];
        let first = sink.place_truss(base, 4.0, TrussTypeId(7)).unwrap();
        let second = sink.place_truss(base, 3.0, TrussTypeId(7)).unwrap();
        assert_ne!(first, second);
        assert_eq!(sink.placed.len(), 2);
        assert_eq!(sink.placed[0].truss_type, TrussTypeId(7));
    }

    #[test]
    fn rejects_non_positive_height() {
        let mut sink = RecordingSink::new();
        let base = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(sink.place_truss(base, 0.0, TrussTypeId::default()).is_err());
        sink.mark_debug_point(Point3::origin());
        assert!(sink.placed.is_empty());
        assert_eq!(sink.debug_points.len(), 1);
    }
}
