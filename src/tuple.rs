use std::ops::{ Add, Sub, Neg, Mul };

use crate::feq;

/// A three dimensional vector, used for both points and directions.
///
/// There is no separate point type; whether a `Tuple3D` is a position or a
/// direction is decided by how it is used.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple3D {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl PartialEq for Tuple3D {
    fn eq(&self, other: &Tuple3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

/// Conversion from a vector to a `Tuple3D`.
///
/// Missing components default to zero and extra components are ignored.
/// Callers which need an exact length should check it beforehand (see
/// `scene::SceneJson`).
impl From<&Vec<f64>> for Tuple3D {
    fn from(v: &Vec<f64>) -> Tuple3D {
        let at = |i: usize| v.get(i).copied().unwrap_or(0.0);
        Tuple3D { x: at(0), y: at(1), z: at(2) }
    }
}

impl Tuple3D {
    pub fn new(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    pub fn zero() -> Tuple3D {
        Tuple3D { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    pub fn normalize(&self) -> Tuple3D {
        let mag = self.magnitude();

        Tuple3D {
            x: self.x * (1.0 / mag),
            y: self.y * (1.0 / mag),
            z: self.z * (1.0 / mag),
        }
    }

    pub fn dot(&self, other: &Tuple3D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Multiplies two tuples component by component.
    pub fn hadamard(&self, other: &Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Rotates a tuple about the vertical (Y) axis.
    ///
    /// A positive angle turns +Z toward +X, which is the direction the
    /// camera orbits in.
    pub fn rotate_y(&self, angle: f64) -> Tuple3D {
        let (sin, cos) = angle.sin_cos();

        Tuple3D {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Tuple3D) -> Tuple3D {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

impl Add for Tuple3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Tuple3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Tuple3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a 3D tuple.
///
/// ```
/// use orbit_tracer::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
/// assert_eq!(t * 5.0, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Tuple3D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/* Tests */

#[test]
fn add_tuples() {
    let a1 = Tuple3D::new(3.0, -2.0, 5.0);
    let a2 = Tuple3D::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Tuple3D::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_tuples() {
    let p1 = Tuple3D::new(3.0, 2.0, 1.0);
    let p2 = Tuple3D::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple3D::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Tuple3D::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_scalar() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(a * 3.5, Tuple3D::new(3.5, -7.0, 10.5));
    assert_eq!(a * 0.5, Tuple3D::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Tuple3D::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple3D::new(1.0, 2.0, 3.0);
    let e = Tuple3D::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
    assert!(feq(v.normalize().magnitude(), 1.0));
}

#[test]
fn dot_vectors() {
    let a = Tuple3D::new(1.0, 2.0, 3.0);
    let b = Tuple3D::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple3D::new(1.0, 2.0, 3.0);
    let b = Tuple3D::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple3D::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple3D::new(1.0, -2.0, 1.0));
}

#[test]
fn hadamard_product() {
    let a = Tuple3D::new(1.0, 2.0, 3.0);
    let b = Tuple3D::new(0.5, 0.0, -1.0);

    assert_eq!(a.hadamard(&b), Tuple3D::new(0.5, 0.0, -3.0));
}

#[test]
fn rotate_quarter_turn_about_y() {
    let v = Tuple3D::new(0.0, 1.0, 1.0);
    let r = v.rotate_y(std::f64::consts::FRAC_PI_2);

    assert_eq!(r, Tuple3D::new(1.0, 1.0, 0.0));
    assert!(feq(r.magnitude(), v.magnitude()));
}

#[test]
fn rotate_full_turn_is_identity() {
    let v = Tuple3D::new(3.0, -2.0, 7.0);

    assert_eq!(v.rotate_y(2.0 * std::f64::consts::PI), v);
}

#[test]
fn reflect_45() {
    let v = Tuple3D::new(1.0, -1.0, 0.0);
    let n = Tuple3D::new(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple3D::new(1.0, 1.0, 0.0));
}

#[test]
fn from_short_vec_pads_with_zero() {
    let v = vec![1.0, 2.0];

    assert_eq!(Tuple3D::from(&v), Tuple3D::new(1.0, 2.0, 0.0));
}
