//! Conversions between the host's internal length unit (feet) and metric units.

const FEET_PER_METRE: f64 = 3.280_84;

#[must_use]
pub fn m_to_feet(x: f64) -> f64 {
    x * FEET_PER_METRE
}

#[must_use]
pub fn feet_to_m(x: f64) -> f64 {
    x / FEET_PER_METRE
}

#[must_use]
pub fn cm_to_feet(x: f64) -> f64 {
    x / 30.48
}

#[must_use]
pub fn feet_to_cm(x: f64) -> f64 {
    x * 30.48
}

#[must_use]
pub fn mm_to_feet(x: f64) -> f64 {
    x / 304.8
}

#[must_use]
pub fn degrees_to_radians(x: f64) -> f64 {
    x.to_radians()
}
