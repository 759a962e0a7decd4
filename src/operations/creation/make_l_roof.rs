use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::roof::{Roof, RoofBuilder, RoofId};
use crate::support::SupportElement;

use super::footprint::{at, check_positive, roof_builder, Footprint, RoofParams};

/// Creates an L-shaped hip roof from two equal wings.
///
/// The footprint is the `size` × `size` square from `origin` minus the
/// corner beyond `(wing_width, wing_width)`. Both wings end in hips; the
/// re-entrant corner produces one valley running up to where the two
/// ridges meet.
pub struct MakeLRoof {
    origin: Point3,
    size: f64,
    wing_width: f64,
    pitch: f64,
    params: RoofParams,
}

impl MakeLRoof {
    /// Creates a new `MakeLRoof` operation.
    #[must_use]
    pub fn new(origin: Point3, size: f64, wing_width: f64, pitch: f64) -> Self {
        Self {
            origin,
            size,
            wing_width,
            pitch,
            params: RoofParams::default(),
        }
    }

    /// Sets the overhang past the walls (default 1).
    #[must_use]
    pub fn overhang(mut self, overhang: f64) -> Self {
        self.params.overhang = overhang;
        self
    }

    /// Sets the roof thickness (default 0.5).
    #[must_use]
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.params.thickness = thickness;
        self
    }

    /// Sets the roof element id (default 1).
    #[must_use]
    pub fn id(mut self, id: RoofId) -> Self {
        self.params.id = id;
        self
    }

    fn footprint(&self) -> Result<Footprint> {
        check_positive("wing width", self.wing_width)?;
        check_positive("pitch", self.pitch)?;
        if self.size <= self.wing_width {
            return Err(OperationError::InvalidInput(
                "L roof wings must be longer than they are wide".into(),
            )
            .into());
        }
        let (a, w) = (self.size, self.wing_width);
        Ok(Footprint::new(
            &self.origin,
            &[(0.0, 0.0), (a, 0.0), (a, w), (w, w), (w, a), (0.0, a)],
            self.params.overhang,
        ))
    }

    /// Roof builder prepared with the panels and element parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid.
    pub fn builder(&self) -> Result<RoofBuilder> {
        let footprint = self.footprint()?;
        let (a, w) = (self.size, self.wing_width);
        let h = w * 0.5;
        let top = self.pitch * h;
        let o = &self.origin;
        let r0 = at(o, h, h, top);
        let r1 = at(o, a - h, h, top);
        let r2 = at(o, h, a - h, top);
        let panels = vec![
            vec![at(o, 0.0, 0.0, 0.0), at(o, a, 0.0, 0.0), r1, r0],
            vec![at(o, a, 0.0, 0.0), at(o, a, w, 0.0), r1],
            vec![at(o, a, w, 0.0), at(o, w, w, 0.0), r0, r1],
            vec![at(o, w, w, 0.0), at(o, w, a, 0.0), r2, r0],
            vec![at(o, w, a, 0.0), at(o, 0.0, a, 0.0), r2],
            vec![at(o, 0.0, a, 0.0), at(o, 0.0, 0.0, 0.0), r0, r2],
        ];
        roof_builder(&self.params, o, self.pitch, &footprint, panels)
    }

    /// Executes the operation, building the roof.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid.
    pub fn execute(&self) -> Result<Roof> {
        self.builder()?.build()
    }

    /// Walls under the roof's sketch lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid.
    pub fn supporting_walls(&self) -> Result<Vec<SupportElement>> {
        self.footprint()?.walls()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::FaceSide;

    #[test]
    fn l_roof_has_six_panels() {
        let roof = MakeLRoof::new(Point3::new(0.0, 0.0, 10.0), 20.0, 10.0, 1.0)
            .execute()
            .unwrap();
        assert_eq!(roof.faces(FaceSide::Bottom).len(), 6);
        assert_eq!(roof.faces(FaceSide::Side).len(), 6);
        assert_eq!(roof.profiles().len(), 6);
    }
}
