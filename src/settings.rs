//! Layout parameters for one distribution pass.

use crate::error::{PreconditionError, Result};
use crate::math::units::cm_to_feet;
use crate::math::ROOF_TOLERANCE;
use crate::topology::FaceSide;

/// Host id of the truss family type placed at each station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrussTypeId(pub u64);

/// Parameters of a truss distribution pass. Lengths are in feet.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSettings {
    /// Maximum distance between consecutive trusses (2.5 m).
    pub truss_spacing: f64,
    /// Setback from a free ridge end, in centimetres.
    pub perimeter_setback_cm: f64,
    /// Edge of the search cube around an overhang point.
    pub support_search_extent: f64,
    /// Edge of the search cube used at ridge ends.
    pub end_condition_search_extent: f64,
    /// Skin the edges are classified on.
    pub face_side: FaceSide,
    /// Report failed stations to the sink.
    pub emit_debug_markers: bool,
    /// Truss type handed to the sink.
    pub truss_type: TrussTypeId,
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            truss_spacing: 8.202_099_737_5,
            perimeter_setback_cm: 60.0,
            support_search_extent: 1.0,
            end_condition_search_extent: 20.0,
            face_side: FaceSide::Bottom,
            emit_debug_markers: true,
            truss_type: TrussTypeId::default(),
        }
    }
}

impl DistributionSettings {
    /// Sets the maximum truss spacing (default 8.2 ft, 2.5 m).
    #[must_use]
    pub fn with_truss_spacing(mut self, spacing: f64) -> Self {
        self.truss_spacing = spacing;
        self
    }

    /// Sets the free ridge end setback in centimetres (default 60).
    #[must_use]
    pub fn with_perimeter_setback_cm(mut self, setback: f64) -> Self {
        self.perimeter_setback_cm = setback;
        self
    }

    /// Sets the support search cube under the eaves (default 1).
    #[must_use]
    pub fn with_support_search_extent(mut self, extent: f64) -> Self {
        self.support_search_extent = extent;
        self
    }

    /// Sets the support search cube at ridge ends (default 20).
    #[must_use]
    pub fn with_end_condition_search_extent(mut self, extent: f64) -> Self {
        self.end_condition_search_extent = extent;
        self
    }

    /// Sets which skin edges are classified on (default bottom).
    #[must_use]
    pub fn with_face_side(mut self, side: FaceSide) -> Self {
        self.face_side = side;
        self
    }

    /// Enables debug markers at failed stations (default on).
    #[must_use]
    pub fn with_debug_markers(mut self, emit: bool) -> Self {
        self.emit_debug_markers = emit;
        self
    }

    /// Sets the truss type handed to the sink.
    #[must_use]
    pub fn with_truss_type(mut self, truss_type: TrussTypeId) -> Self {
        self.truss_type = truss_type;
        self
    }

    /// Perimeter setback converted to feet.
    #[must_use]
    pub fn perimeter_setback(&self) -> f64 {
        cm_to_feet(self.perimeter_setback_cm)
    }

    /// Checks that search extents are positive, the truss spacing is at
    /// least [`ROOF_TOLERANCE`] and the setback is not negative.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::InvalidSettings`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.truss_spacing < ROOF_TOLERANCE || !self.truss_spacing.is_finite() {
            return Err(PreconditionError::InvalidSettings(format!(
                "truss spacing must be at least {ROOF_TOLERANCE}, got {}",
                self.truss_spacing
            ))
            .into());
        }
        let positive = [
            ("support search extent", self.support_search_extent),
            ("end condition search extent", self.end_condition_search_extent),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(PreconditionError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                ))
                .into());
            }
        }
        if self.perimeter_setback_cm < 0.0 || self.perimeter_setback_cm.is_nan() {
            return Err(PreconditionError::InvalidSettings(format!(
                "perimeter setback must not be negative, got {}",
                self.perimeter_setback_cm
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let s = DistributionSettings::default();
        assert_relative_eq!(s.truss_spacing, 8.202_099_737_5);
        assert_relative_eq!(s.perimeter_setback(), 1.968_503_937, epsilon = 1e-6);
        assert_eq!(s.face_side, FaceSide::Bottom);
        assert!(s.emit_debug_markers);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let s = DistributionSettings::default().with_truss_spacing(0.0);
        assert!(matches!(
            s.validate(),
            Err(crate::error::RoofError::Precondition(PreconditionError::InvalidSettings(_)))
        ));
        assert!(DistributionSettings::default()
            .with_support_search_extent(-1.0)
            .validate()
            .is_err());
        assert!(DistributionSettings::default()
            .with_perimeter_setback_cm(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn spacing_below_tolerance_is_rejected() {
        for spacing in [1e-300, 0.005, f64::INFINITY] {
            assert!(matches!(
                DistributionSettings::default()
                    .with_truss_spacing(spacing)
                    .validate(),
                Err(crate::error::RoofError::Precondition(PreconditionError::InvalidSettings(_)))
            ));
        }
        assert!(DistributionSettings::default()
            .with_truss_spacing(ROOF_TOLERANCE)
            .validate()
            .is_ok());
    }
}
