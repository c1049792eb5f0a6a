//! Uniform curve sampling.
//!
//! The encoder uses a 3-point tessellation of a bounded arc and takes the
//! middle sample as the guaranteed-interior point written to the wire.

use crate::error::{GeometryError, Result};
use crate::geometry::Curve;
use crate::math::Point3;

/// Samples a bounded curve at `count` uniformly spaced parameters across its
/// domain, endpoints included.
///
/// # Errors
///
/// Returns an error if `count < 2`, the curve's domain is unbounded, or
/// evaluation fails.
pub fn sample_curve<C: Curve + ?Sized>(curve: &C, count: usize) -> Result<Vec<Point3>> {
    if count < 2 {
        return Err(GeometryError::Degenerate(
            "tessellation needs at least two samples".into(),
        )
        .into());
    }

    let domain = curve.domain();
    if !domain.is_bounded() {
        return Err(GeometryError::Degenerate(
            "cannot tessellate an unbounded curve".into(),
        )
        .into());
    }

    let step = (domain.t_max - domain.t_min) / (count - 1) as f64;
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        points.push(curve.evaluate(domain.t_min + step * i as f64)?);
    }
    Ok(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Ray, Segment};
    use crate::math::Vector3;

    #[test]
    fn three_samples_of_a_segment() {
        let s = Segment::new(Point3::origin(), Point3::new(4.0, 0.0, 0.0)).unwrap();
        let pts = sample_curve(&s, 3).unwrap();
        assert_eq!(pts.len(), 3);
        assert!((pts[1] - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn unbounded_curve_rejected() {
        let r = Ray::new(Point3::origin(), Vector3::x()).unwrap();
        assert!(sample_curve(&r, 3).is_err());
    }

    #[test]
    fn too_few_samples_rejected() {
        let s = Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(sample_curve(&s, 1).is_err());
    }
}
