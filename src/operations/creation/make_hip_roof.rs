use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::roof::{Roof, RoofBuilder, RoofId};
use crate::support::SupportElement;

use super::footprint::{at, check_positive, roof_builder, Footprint, RoofParams};

/// Creates a rectangular hip roof: two trapezoidal panels along the length,
/// two triangular end panels and one ridge.
///
/// The outer roof edge spans `length` × `width` from `origin`, at
/// `origin.z`. Every panel rises at `pitch` (rise over run), so the ridge
/// sits half the width in from each eave.
pub struct MakeHipRoof {
    origin: Point3,
    length: f64,
    width: f64,
    pitch: f64,
    params: RoofParams,
}

impl MakeHipRoof {
    /// Creates a new `MakeHipRoof` operation.
    #[must_use]
    pub fn new(origin: Point3, length: f64, width: f64, pitch: f64) -> Self {
        Self {
            origin,
            length,
            width,
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
        check_positive("width", self.width)?;
        check_positive("pitch", self.pitch)?;
        if self.length <= self.width {
            return Err(OperationError::InvalidInput(
                "hip roof length must exceed its width".into(),
            )
            .into());
        }
        Ok(Footprint::new(
            &self.origin,
            &[
                (0.0, 0.0),
                (self.length, 0.0),
                (self.length, self.width),
                (0.0, self.width),
            ],
            self.params.overhang,
        ))
    }

    /// Roof builder prepared with the panels and element parameters, for
    /// callers that tweak the parameters before building.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid.
    pub fn builder(&self) -> Result<RoofBuilder> {
        let footprint = self.footprint()?;
        let (l, w) = (self.length, self.width);
        let h = w * 0.5;
        let top = self.pitch * h;
        let o = &self.origin;
        let panels = vec![
            vec![at(o, 0.0, 0.0, 0.0), at(o, l, 0.0, 0.0), at(o, l - h, h, top), at(o, h, h, top)],
            vec![at(o, l, 0.0, 0.0), at(o, l, w, 0.0), at(o, l - h, h, top)],
            vec![at(o, l, w, 0.0), at(o, 0.0, w, 0.0), at(o, h, h, top), at(o, l - h, h, top)],
            vec![at(o, 0.0, w, 0.0), at(o, 0.0, 0.0, 0.0), at(o, h, h, top)],
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
