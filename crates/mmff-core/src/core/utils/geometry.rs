use nalgebra::{Point3, Vector3};

/// Reads the coordinates of `atom` from a flat `[x0, y0, z0, x1, ...]` buffer.
#[inline]
pub fn point_at(positions: &[f64], atom: usize) -> Point3<f64> {
    let base = 3 * atom;
    Point3::new(positions[base], positions[base + 1], positions[base + 2])
}

/// Adds `force` into the gradient slot of `atom`.
#[inline]
pub fn accumulate(gradient: &mut [f64], atom: usize, force: &Vector3<f64>) {
    let base = 3 * atom;
    gradient[base] += force.x;
    gradient[base + 1] += force.y;
    gradient[base + 2] += force.z;
}

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Cosine of the angle between two vectors, clamped to `[-1, 1]`.
#[inline]
pub fn cos_between(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let denom = u.norm() * v.norm();
    if denom < f64::EPSILON {
        return 1.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0)
}

/// Angle `a-b-c` at vertex `b`, in radians.
#[inline]
pub fn bend_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    cos_between(&(a - b), &(c - b)).acos()
}

/// Derivative of `cos(angle(u, v))` with respect to `u`.
///
/// With `û` and `v̂` the unit vectors and `c = û·v̂`, this is `(v̂ - c·û) / |u|`.
#[inline]
pub fn cos_gradient(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    let (u_len, v_len) = (u.norm(), v.norm());
    let (u_hat, v_hat) = (u / u_len, v / v_len);
    let c = u_hat.dot(&v_hat).clamp(-1.0, 1.0);
    (v_hat - u_hat * c) / u_len
}

/// Dihedral angle `a-b-c-d` in radians, in `(-π, π]`.
pub fn dihedral_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;
    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let m1 = n1.cross(&b2.normalize());
    let x = n1.dot(&n2);
    let y = m1.dot(&n2);
    y.atan2(x)
}
