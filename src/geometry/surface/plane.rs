use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space.
///
/// Defined by an origin point, and two orthogonal direction vectors
/// (`u_dir`, `v_dir`). The normal is `u_dir × v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        // Choose a reference vector not parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };

        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Creates the plane through three points, with the normal following
    /// the winding `a -> b -> c`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("plane points are collinear".into()).into());
        }
        Self::from_normal(*a, normal)
    }

    /// Creates the best-fit plane of a closed polygon using Newell's method.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon has fewer than 3 points or zero area.
    pub fn from_polygon(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate("polygon needs 3 points".into()).into());
        }
        let mut normal = Vector3::zeros();
        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("polygon has zero area".into()).into());
        }
        Self::from_normal(points[0], normal)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from `point` to the plane along the normal.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Orthogonal projection of `point` onto the plane.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Whether the plane is vertical (its normal has no Z component).
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.normal.z.abs() < TOLERANCE
    }
}
