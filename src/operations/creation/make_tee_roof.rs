use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::roof::{Roof, RoofBuilder, RoofId};
use crate::support::SupportElement;

use super::footprint::{at, check_positive, roof_builder, Footprint, RoofParams};

/// Creates a T-shaped gable roof: a main gable along the length with a
/// narrower gabled wing rising off its back at mid-length.
///
/// The wing ridge is lower than the main ridge and runs into the main
/// back panel, where two valleys meet it. The wing's inner ridge end is
/// bounded only by those valleys.
pub struct MakeTeeRoof {
    origin: Point3,
    length: f64,
    width: f64,
    pitch: f64,
    wing_width: f64,
    wing_length: f64,
    params: RoofParams,
}

impl MakeTeeRoof {
    /// Creates a new `MakeTeeRoof` operation with a wing `0.6 * width`
    /// wide and `width` long.
    #[must_use]
    pub fn new(origin: Point3, length: f64, width: f64, pitch: f64) -> Self {
        Self {
            origin,
            length,
            width,
            pitch,
            wing_width: width * 0.6,
            wing_length: width,
            params: RoofParams::default(),
        }
    }

    /// Sets the wing's width and how far it projects past the main eave.
    #[must_use]
    pub fn wing(mut self, width: f64, length: f64) -> Self {
        self.wing_width = width;
        self.wing_length = length;
        self
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
        check_positive("width", self.width)?;
        check_positive("pitch", self.pitch)?;
        check_positive("wing width", self.wing_width)?;
        check_positive("wing length", self.wing_length)?;
        if self.wing_width >= self.width || self.wing_width >= self.length {
            return Err(OperationError::InvalidInput(
                "T roof wing must be narrower than the main roof".into(),
            )
            .into());
        }
        let (l, w) = (self.length, self.width);
        let c = l * 0.5;
        let hw = self.wing_width * 0.5;
        let far = w + self.wing_length;
        Ok(Footprint::new(
            &self.origin,
            &[
                (0.0, 0.0),
                (l, 0.0),
                (l, w),
                (c + hw, w),
                (c + hw, far),
                (c - hw, far),
                (c - hw, w),
                (0.0, w),
            ],
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
        let (l, w) = (self.length, self.width);
        let h = w * 0.5;
        let top = self.pitch * h;
        let c = l * 0.5;
        let hw = self.wing_width * 0.5;
        let wing_top = self.pitch * hw;
        let far = w + self.wing_length;
        let o = &self.origin;
        let junction = at(o, c, w - hw, wing_top);
        let wing_end = at(o, c, far, wing_top);
        let panels = vec![
            vec![at(o, 0.0, 0.0, 0.0), at(o, l, 0.0, 0.0), at(o, l, h, top), at(o, 0.0, h, top)],
            vec![
                at(o, l, w, 0.0),
                at(o, c + hw, w, 0.0),
                junction,
                at(o, c - hw, w, 0.0),
                at(o, 0.0, w, 0.0),
                at(o, 0.0, h, top),
                at(o, l, h, top),
            ],
            vec![at(o, c - hw, w, 0.0), at(o, c - hw, far, 0.0), wing_end, junction],
            vec![at(o, c + hw, far, 0.0), at(o, c + hw, w, 0.0), junction, wing_end],
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
    fn tee_roof_panels_and_walls() {
        let op = MakeTeeRoof::new(Point3::new(0.0, 0.0, 10.0), 30.0, 10.0, 1.0).wing(6.0, 10.0);
        let roof = op.execute().unwrap();
        assert_eq!(roof.faces(FaceSide::Bottom).len(), 4);
        assert_eq!(roof.outer_loop_len(roof.faces(FaceSide::Bottom)[1]).unwrap(), 7);
        assert_eq!(op.supporting_walls().unwrap().len(), 8);
    }

    #[test]
    fn wing_as_wide_as_the_main_roof_is_rejected() {
        assert!(MakeTeeRoof::new(Point3::origin(), 30.0, 10.0, 1.0)
            .wing(10.0, 10.0)
            .execute()
            .is_err());
    }
}
