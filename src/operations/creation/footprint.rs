use crate::error::{OperationError, Result};
use crate::geometry::curve::Segment;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at_height};
use crate::math::{Point3, Vector3};
use crate::roof::{EaveProfile, RoofBuilder, RoofId};
use crate::support::{ElementId, SupportElement};

/// Height of the generated supporting walls; their tops sit at the roof level.
const WALL_HEIGHT: f64 = 3.0;

/// Thickness of the generated supporting walls.
const WALL_THICKNESS: f64 = 0.5;

/// Host ids of generated walls start here so they never clash with roof ids.
const FIRST_WALL_ID: u64 = 100;

/// Parameters shared by every roof fixture.
#[derive(Debug, Clone, Copy)]
pub(super) struct RoofParams {
    pub id: RoofId,
    pub overhang: f64,
    pub thickness: f64,
}

impl Default for RoofParams {
    fn default() -> Self {
        Self {
            id: RoofId(1),
            overhang: 1.0,
            thickness: 0.5,
        }
    }
}

/// Outer roof edge as a counter-clockwise loop at level height.
///
/// Walls and sketch lines run along the loop inset by the overhang.
pub(super) struct Footprint {
    outline: Vec<Point3>,
    overhang: f64,
}

impl Footprint {
    pub fn new(origin: &Point3, corners: &[(f64, f64)], overhang: f64) -> Self {
        Self {
            outline: corners
                .iter()
                .map(|&(x, y)| Point3::new(origin.x + x, origin.y + y, origin.z))
                .collect(),
            overhang,
        }
    }

    /// The outline moved inward by the overhang.
    fn wall_lines(&self) -> Result<Vec<Segment>> {
        let n = self.outline.len();
        let offset: Vec<(Point3, Vector3)> = (0..n)
            .map(|i| {
                let a = self.outline[i];
                let dir = (self.outline[(i + 1) % n] - a).normalize();
                let inward = Vector3::new(-dir.y, dir.x, 0.0);
                (a + inward * self.overhang, dir)
            })
            .collect();

        let mut corners = Vec::with_capacity(n);
        for i in 0..n {
            let (p0, d0) = &offset[(i + n - 1) % n];
            let (p1, d1) = &offset[i];
            let (t, _) = line_line_intersect_2d(p0, d0, p1, d1).ok_or_else(|| {
                OperationError::InvalidInput("footprint has collinear consecutive sides".into())
            })?;
            corners.push(point_at_height(p0, d0, t, p0.z));
        }

        (0..n)
            .map(|i| Segment::new(corners[i], corners[(i + 1) % n]))
            .collect()
    }

    /// Sketch lines with their overhang, in outline order.
    pub fn profiles(&self) -> Result<Vec<EaveProfile>> {
        Ok(self
            .wall_lines()?
            .into_iter()
            .map(|line| EaveProfile::new(line, self.overhang))
            .collect())
    }

    /// One wall per sketch line, standing below the level with its top at
    /// level height.
    pub fn walls(&self) -> Result<Vec<SupportElement>> {
        self.wall_lines()?
            .into_iter()
            .zip(FIRST_WALL_ID..)
            .map(|(line, id)| {
                let base = line.flatten(line.start().z - WALL_HEIGHT)?;
                Ok(SupportElement::wall(ElementId(id), base, WALL_THICKNESS, WALL_HEIGHT))
            })
            .collect()
    }
}

/// Rejects non-positive dimensions.
pub(super) fn check_positive(what: &str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(OperationError::InvalidInput(format!("{what} must be positive, got {value}")).into())
    }
}

/// Builder carrying the roof element parameters every fixture shares.
pub(super) fn roof_builder(
    params: &RoofParams,
    origin: &Point3,
    pitch: f64,
    footprint: &Footprint,
    panels: Vec<Vec<Point3>>,
) -> Result<RoofBuilder> {
    check_positive("overhang", params.overhang)?;
    let mut builder = RoofBuilder::new(params.id)
        .thickness(params.thickness)
        .level(origin.z)
        .slope(pitch);
    for panel in panels {
        builder = builder.panel(panel);
    }
    for profile in footprint.profiles()? {
        builder = builder.profile(profile);
    }
    Ok(builder)
}

/// Shifts plan coordinates by `origin` and sets Z to `origin.z + rise`.
pub(super) fn at(origin: &Point3, x: f64, y: f64, rise: f64) -> Point3 {
    Point3::new(origin.x + x, origin.y + y, origin.z + rise)
}
