use crate::tuple::Tuple3D;

/// A ray with an origin and a direction.
///
/// Directions are not required to be normalized, but `Shape::intersect`
/// reports distances in units of the direction's length.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray3D {
    pub origin: Tuple3D,
    pub direction: Tuple3D,
}

impl Ray3D {
    pub fn new(origin: Tuple3D, direction: Tuple3D) -> Ray3D {
        Ray3D { origin, direction }
    }

    pub fn position(&self, t: f64) -> Tuple3D {
        self.origin + (self.direction * t)
    }

    /// Returns the same ray with a unit-length direction.
    pub fn normalized(&self) -> Ray3D {
        Ray3D { origin: self.origin, direction: self.direction.normalize() }
    }
}

#[test]
fn ray_position() {
    let r = Ray3D::new(
                Tuple3D::new(2.0, 3.0, 4.0),
                Tuple3D::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple3D::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple3D::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple3D::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple3D::new(4.5, 3.0, 4.0));
}

#[test]
fn normalized_keeps_origin() {
    let r = Ray3D::new(
                Tuple3D::new(1.0, 2.0, 3.0),
                Tuple3D::new(0.0, 4.0, 0.0)
            ).normalized();

    assert_eq!(r.origin, Tuple3D::new(1.0, 2.0, 3.0));
    assert_eq!(r.direction, Tuple3D::new(0.0, 1.0, 0.0));
}
