use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A circular arc in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero-angle. The arc sweeps counter-clockwise about the normal
/// from angle `0` to `sweep` (radians).
///
/// Roof outlines authored with curved sketch lines produce arc edges; the
/// classifier carries them through but refuses to build trusses on them.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    sweep: f64,
}

impl Arc {
    /// Creates the arc starting at `start`, passing through `through` and
    /// ending at `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the three points are collinear.
    pub fn through_points(start: &Point3, through: &Point3, end: &Point3) -> Result<Self> {
        let a = start - through;
        let b = end - through;
        let normal = a.cross(&b);
        let normal_sq = normal.norm_squared();
        if normal_sq < TOLERANCE * TOLERANCE {
            return Err(GeometryError::Degenerate("arc points are collinear".into()).into());
        }

        // Circumcenter of the triangle (start, through, end).
        let offset = (b * a.norm_squared() - a * b.norm_squared()).cross(&normal) / (2.0 * normal_sq);
        let center = through + offset;
        let radius = (start - center).norm();

        // Orient the normal so the sweep start -> through -> end is counter-clockwise.
        let normal = -normal / normal_sq.sqrt();
        let ref_dir = (start - center) / radius;
        let binormal = normal.cross(&ref_dir);
        let angle_of = |p: &Point3| {
            let d = p - center;
            d.dot(&binormal).atan2(d.dot(&ref_dir)).rem_euclid(std::f64::consts::TAU)
        };

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            sweep: angle_of(end),
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Point at the start of the sweep.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        self.point_at(0.0)
    }

    /// Point at the end of the sweep.
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        self.point_at(self.sweep)
    }

    /// Point halfway along the sweep.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        self.point_at(self.sweep * 0.5)
    }

    /// Arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep
    }

    /// Closest point on the arc to `point`, clamped to the sweep.
    #[must_use]
    pub fn closest_point(&self, point: &Point3) -> Point3 {
        let binormal = self.normal.cross(&self.ref_dir);
        let d = point - self.center;
        let (u, v) = (d.dot(&self.ref_dir), d.dot(&binormal));
        if u.hypot(v) < TOLERANCE {
            return self.start_point();
        }
        let angle = v.atan2(u).rem_euclid(std::f64::consts::TAU);
        if angle <= self.sweep {
            return self.point_at(angle);
        }
        let (start, end) = (self.start_point(), self.end_point());
        if (point - start).norm() <= (point - end).norm() {
            start
        } else {
            end
        }
    }

    fn point_at(&self, angle: f64) -> Point3 {
        let binormal = self.normal.cross(&self.ref_dir);
        let (sin, cos) = angle.sin_cos();
        self.center + (self.ref_dir * cos + binormal * sin) * self.radius
    }
}
