pub mod circumcircle_3d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Builds an orthonormal in-plane basis `(u, v)` for the plane with the given
/// normal, such that `u x v = normal`.
///
/// The basis is deterministic: `u` is derived from the world axis least
/// aligned with the normal, so every caller measuring angles on the same
/// plane agrees on the zero direction.
#[must_use]
pub fn plane_basis(normal: &Vector3) -> (Vector3, Vector3) {
    let ax = normal.x.abs();
    let ay = normal.y.abs();
    let az = normal.z.abs();

    let pick = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let u = pick.cross(normal).normalize();
    let v = normal.cross(&u);
    (u, v)
}

/// Angle of `v` measured on the plane with the given normal, in `(-pi, pi]`,
/// counter-clockwise about the normal from the plane's reference axis.
#[must_use]
pub fn angle_on_plane(normal: &Vector3, v: &Vector3) -> f64 {
    let (u_axis, v_axis) = plane_basis(normal);
    v.dot(&v_axis).atan2(v.dot(&u_axis))
}
