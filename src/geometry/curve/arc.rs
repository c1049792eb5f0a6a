use crate::error::{GeometryError, Result};
use crate::math::circumcircle_3d::circumcircle_3d;
use crate::math::{angle_on_plane, plane_basis, Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded circular arc in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction for
/// the zero-angle. The parametric form sweeps from `start_angle` to
/// `end_angle` (in radians) counter-clockwise about the normal. The sweep is
/// strictly between zero and a full turn; a full revolution is a
/// [`Circle`](super::Circle), never an arc.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the arc plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians (must exceed the start angle)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is
    /// zero-length, the reference direction is not perpendicular to the
    /// normal, or the sweep is outside `(0, 2*pi)`.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        if end_angle - start_angle < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be positive".into()).into());
        }
        if end_angle - start_angle > std::f64::consts::TAU - TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc sweep must stay below a full turn".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
        })
    }

    /// Reconstructs an arc from three points on the curve: the start point,
    /// the end point, and an interior point that selects which side of the
    /// chord the arc bulges toward.
    ///
    /// The unique circle through the points fixes center, radius and plane;
    /// its normal is oriented so the traversal start -> interior -> end is
    /// counter-clockwise. Start and end angles are then measured against the
    /// carrying plane's reference axis, so the reconstructed sweep runs from
    /// the start point to the end point through the interior point, never the
    /// complementary arc.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CollinearPoints`] if the points are collinear
    /// or coincident.
    pub fn from_three_points(start: &Point3, end: &Point3, point_on_arc: &Point3) -> Result<Self> {
        let circ =
            circumcircle_3d(start, point_on_arc, end).ok_or(GeometryError::CollinearPoints)?;

        // Re-base the construction's angles onto the plane's own reference
        // axis: the angle of the center-to-start direction measured on the
        // plane is the offset between the two frames.
        let (u_axis, _) = plane_basis(&circ.normal);
        let start_angle = angle_on_plane(&circ.normal, &(start - circ.center));
        let mut end_angle = angle_on_plane(&circ.normal, &(end - circ.center));
        if end_angle <= start_angle + TOLERANCE {
            end_angle += std::f64::consts::TAU;
        }

        Self::new(
            circ.center,
            circ.radius,
            circ.normal,
            u_axis,
            start_angle,
            end_angle,
        )
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

    /// Returns the reference direction (t=0 direction).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle in radians.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Returns the swept angle in radians, in `(0, 2*pi)`.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns the start point of the arc.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        self.point_at(self.start_angle)
    }

    /// Returns the end point of the arc.
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        self.point_at(self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Point3 {
        let binormal = self.binormal();
        self.center + self.ref_dir * (self.radius * angle.cos()) + binormal * (self.radius * angle.sin())
    }

    /// Computes the second axis direction (perpendicular to both normal and `ref_dir`).
    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let binormal = self.binormal();
        let dx = -self.radius * t.sin();
        let dy = self.radius * t.cos();
        let tangent = self.ref_dir * dx + binormal * dy;
        let len = tangent.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(tangent / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn is_closed(&self) -> bool {
        // The constructor caps the sweep below a full turn.
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-9;

    #[test]
    fn semicircle_from_three_points() {
        // Semicircle in the XY plane bulging toward +Y.
        let s = Point3::new(0.0, 0.0, 0.0);
        let e = Point3::new(10.0, 0.0, 0.0);
        let p = Point3::new(5.0, 5.0, 0.0);

        let arc = Arc::from_three_points(&s, &e, &p).unwrap();
        assert!((arc.center() - Point3::new(5.0, 0.0, 0.0)).norm() < TOL);
        assert!((arc.radius() - 5.0).abs() < TOL);
        // Normal is +/-Z.
        assert!(arc.normal().cross(&Vector3::z()).norm() < TOL);
        assert!((arc.sweep_angle() - PI).abs() < TOL);

        // The sweep starts at S, ends at E and passes through P.
        assert!((arc.start_point() - s).norm() < TOL);
        assert!((arc.end_point() - e).norm() < TOL);
        let mid = arc
            .evaluate((arc.start_angle() + arc.end_angle()) / 2.0)
            .unwrap();
        assert!((mid - p).norm() < TOL);
    }

    #[test]
    fn minor_arc_not_complement() {
        // A quarter arc; the reconstruction must not produce the 3/4 sweep.
        let s = Point3::new(1.0, 0.0, 0.0);
        let e = Point3::new(0.0, 1.0, 0.0);
        let p = Point3::new(std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2, 0.0);

        let arc = Arc::from_three_points(&s, &e, &p).unwrap();
        assert!((arc.radius() - 1.0).abs() < TOL);
        assert!((arc.sweep_angle() - PI / 2.0).abs() < TOL);
        assert!((arc.start_point() - s).norm() < TOL);
        assert!((arc.end_point() - e).norm() < TOL);
    }

    #[test]
    fn major_arc_preserved() {
        // Interior point on the far side forces the 3/4 sweep.
        let s = Point3::new(1.0, 0.0, 0.0);
        let e = Point3::new(0.0, 1.0, 0.0);
        let p = Point3::new(0.0, -1.0, 0.0);

        let arc = Arc::from_three_points(&s, &e, &p).unwrap();
        assert!((arc.sweep_angle() - 3.0 * PI / 2.0).abs() < TOL);
        assert!((arc.start_point() - s).norm() < TOL);
        assert!((arc.end_point() - e).norm() < TOL);
    }

    #[test]
    fn tilted_plane_round_trip() {
        let normal = Vector3::new(1.0, 1.0, 1.0).normalize();
        let (u, _) = crate::math::plane_basis(&normal);
        let original = Arc::new(
            Point3::new(2.0, -1.0, 4.0),
            3.0,
            normal,
            u,
            0.3,
            0.3 + 2.0,
        )
        .unwrap();

        let s = original.start_point();
        let e = original.end_point();
        let mid = original
            .evaluate((original.start_angle() + original.end_angle()) / 2.0)
            .unwrap();

        let rebuilt = Arc::from_three_points(&s, &e, &mid).unwrap();
        assert!((rebuilt.center() - original.center()).norm() < TOL);
        assert!((rebuilt.radius() - original.radius()).abs() < TOL);
        assert!((rebuilt.sweep_angle() - original.sweep_angle()).abs() < TOL);
        assert!((rebuilt.start_point() - s).norm() < TOL);
        assert!((rebuilt.end_point() - e).norm() < TOL);
    }

    #[test]
    fn collinear_points_rejected() {
        let r = Arc::from_three_points(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn zero_sweep_rejected() {
        let r = Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), 1.0, 1.0);
        assert!(r.is_err());
    }

    #[test]
    fn full_revolution_rejected() {
        // A full turn would encode with coincident start and end points,
        // which no three-point reconstruction can invert.
        let r = Arc::new(
            Point3::origin(),
            1.0,
            Vector3::z(),
            Vector3::x(),
            0.0,
            std::f64::consts::TAU,
        );
        assert!(r.is_err());
    }

    #[test]
    fn over_full_sweep_rejected() {
        // A 3*pi sweep would alias to a pi sweep after a round trip.
        let r = Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), 0.0, 3.0 * PI);
        assert!(r.is_err());
    }

    #[test]
    fn near_full_sweep_allowed() {
        let arc = Arc::new(
            Point3::origin(),
            1.0,
            Vector3::z(),
            Vector3::x(),
            0.0,
            std::f64::consts::TAU - 0.05,
        )
        .unwrap();
        assert!(!arc.is_closed());
    }
}
