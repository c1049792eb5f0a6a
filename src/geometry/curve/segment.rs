use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded straight segment between two distinct endpoints.
///
/// The parametric form is `P(t) = start + t * (end - start)` over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(
                GeometryError::Degenerate("segment endpoints must be distinct".into()).into(),
            );
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl Curve for Segment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.start + (self.end - self.start) * t)
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        Ok((self.end - self.start).normalize())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_endpoints() {
        let s = Segment::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 3.0)).unwrap();
        assert!((s.evaluate(0.0).unwrap() - Point3::new(1.0, 2.0, 3.0)).norm() < TOLERANCE);
        assert!((s.evaluate(1.0).unwrap() - Point3::new(4.0, 6.0, 3.0)).norm() < TOLERANCE);
        assert!((s.length() - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn coincident_endpoints_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(Segment::new(p, p).is_err());
    }
}
