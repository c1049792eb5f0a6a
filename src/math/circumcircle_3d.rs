//! Circumcircle of three points in 3D.
//!
//! This is the geometric inverse behind three-point arc decoding: the unique
//! circle through three non-collinear points, found by intersecting the
//! perpendicular bisector planes of two chords within the common plane.

use crate::math::{Point3, Vector3, TOLERANCE};

/// The circle through three non-collinear 3D points.
#[derive(Debug, Clone, Copy)]
pub struct Circumcircle {
    pub center: Point3,
    pub radius: f64,
    /// Unit normal of the carrying plane, oriented so the traversal
    /// `a -> b -> c` is counter-clockwise about it.
    pub normal: Vector3,
}

/// Computes the circumcircle through `a`, `b`, `c`.
///
/// Returns `None` when the points are collinear or coincident, in which case
/// no unique circle exists.
#[must_use]
pub fn circumcircle_3d(a: &Point3, b: &Point3, c: &Point3) -> Option<Circumcircle> {
    let u = b - a;
    let v = c - a;
    let w = u.cross(&v);

    let w_norm2 = w.norm_squared();
    if w_norm2 < TOLERANCE * TOLERANCE {
        return None;
    }

    // Closed form of the bisector-plane intersection; both terms lie in the
    // plane spanned by u and v.
    let offset = (w.cross(&u) * v.norm_squared() + v.cross(&w) * u.norm_squared())
        / (2.0 * w_norm2);
    let center = a + offset;
    let radius = (a - center).norm();

    Some(Circumcircle {
        center,
        radius,
        normal: w / w_norm2.sqrt(),
    })
}
