//! Truss geometry synthesized at a station.
//!
//! A [`TrussInfo`] always stores the apex and the two base points the host
//! persists the truss between, whatever the number of supports it was
//! built from.

mod builder;

pub use builder::TrussBuilder;

use crate::geometry::curve::Segment;
use crate::math::Point3;

/// Minimum distance between any two defining points of a truss.
pub const MIN_TRUSS_SPAN: f64 = 0.5;

/// How a truss was supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrussKind {
    /// Apex over a full ridge, bearing on a support at each side.
    Common,
    /// Apex over a single-panel ridge, bearing on one support.
    MonoPitch,
    /// Apex on a hip, bearing on two support lines.
    Hip,
}

/// One synthesized truss.
#[derive(Debug, Clone)]
pub struct TrussInfo {
    /// Highest joint.
    pub apex: Point3,
    /// Base line endpoints. For a mono-pitch truss the second point sits
    /// under the apex at the support's height.
    pub base: [Point3; 2],
    /// Vertical distance from the apex to the base.
    pub height: f64,
    /// Sloped chords from the apex.
    pub top_chords: Vec<Segment>,
    /// Chord between the base points.
    pub bottom_chords: Vec<Segment>,
    /// Support configuration.
    pub kind: TrussKind,
}

impl TrussInfo {
    /// A truss from `apex` down to two supports.
    ///
    /// `None` when any two of the three points are closer than
    /// [`MIN_TRUSS_SPAN`] or the apex is not above the first support.
    #[must_use]
    pub fn between(apex: Point3, first: Point3, second: Point3, kind: TrussKind) -> Option<Self> {
        let height = apex.z - first.z;
        if height <= 0.0 || !spans_apart(&[apex, first, second]) {
            return None;
        }
        Some(Self {
            apex,
            base: [first, second],
            height,
            top_chords: vec![Segment::new(apex, first).ok()?, Segment::new(apex, second).ok()?],
            bottom_chords: vec![Segment::new(first, second).ok()?],
            kind,
        })
    }

    /// A mono-pitch truss from `apex` down to one support.
    ///
    /// `None` under the same rules as [`TrussInfo::between`].
    #[must_use]
    pub fn mono_pitch(apex: Point3, support: Point3) -> Option<Self> {
        let heel = Point3::new(apex.x, apex.y, support.z);
        let height = apex.z - heel.z;
        if height <= 0.0 || !spans_apart(&[apex, support, heel]) {
            return None;
        }
        Some(Self {
            apex,
            base: [support, heel],
            height,
            top_chords: vec![Segment::new(apex, support).ok()?],
            bottom_chords: vec![Segment::new(heel, support).ok()?],
            kind: TrussKind::MonoPitch,
        })
    }
}

fn spans_apart(points: &[Point3]) -> bool {
    points.iter().enumerate().all(|(i, a)| {
        points[i + 1..]
            .iter()
            .all(|b| (b - a).norm() >= MIN_TRUSS_SPAN)
    })
}
