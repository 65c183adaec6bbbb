use crate::consts::FIELD_OF_VIEW;
use crate::ray::Ray3D;
use crate::tuple::Tuple3D;

/// A viewport for generating camera rays.
///
/// The viewport sits at `origin` and looks along `forward`. An image plane one
/// unit in front of the origin is spanned by `right` and `up`, and its extent
/// is chosen from the field of view so that `width` by `height` pixels cover
/// it.
///
/// A viewport is never changed after construction. Moving the camera means
/// asking for a moved copy (`rotate_yaw`), so a viewport can be read by any
/// number of render threads at once.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    pub origin: Tuple3D,
    pub forward: Tuple3D,
    pub right: Tuple3D,
    pub up: Tuple3D,

    /// The horizontal size of the image, in pixels.
    pub width: usize,

    /// The vertical size of the image, in pixels.
    pub height: usize,

    pub half_width: f64,
    pub half_height: f64,

    /// The angle describing "how much" the camera can see.
    pub field_of_view: f64,
}

impl Viewport {
    /// Creates a viewport with the default field of view.
    ///
    /// `up` is only a hint; it is corrected to be perpendicular to `forward`.
    pub fn new(origin: Tuple3D, forward: Tuple3D, up: Tuple3D, width: usize,
        height: usize) -> Viewport {
        Viewport::with_field_of_view(origin, forward, up, width, height,
            FIELD_OF_VIEW)
    }

    pub fn with_field_of_view(origin: Tuple3D, forward: Tuple3D, up: Tuple3D,
        width: usize, height: usize, field_of_view: f64) -> Viewport {
        let forward = forward.normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward);

        let half_view = (field_of_view / 2.0).tan();
        let aspect = (width as f64) / (height as f64);

        let half_width: f64;
        let half_height: f64;

        if aspect >= 1.0 {
            half_width = half_view;
            half_height = half_view / aspect;
        } else {
            half_width = half_view * aspect;
            half_height = half_view;
        }

        Viewport {
            origin,
            forward,
            right,
            up,
            width,
            height,
            half_width,
            half_height,
            field_of_view,
        }
    }

    /// Computes the unit direction through a point on the image.
    ///
    /// Coordinates are in pixels and may be fractional: `(0, 0)` is the top
    /// left corner of the image, `(width, height)` the bottom right, and the
    /// center of pixel `(x, y)` is at `(x + 0.5, y + 0.5)`.
    pub fn ray_direction(&self, x: f64, y: f64) -> Tuple3D {
        let u = (x / self.width as f64) * 2.0 - 1.0;
        let v = 1.0 - (y / self.height as f64) * 2.0;

        (self.forward
            + self.right * (u * self.half_width)
            + self.up * (v * self.half_height)).normalize()
    }

    /// The camera ray through a point on the image.
    pub fn ray_for(&self, x: f64, y: f64) -> Ray3D {
        Ray3D::new(self.origin, self.ray_direction(x, y))
    }

    /// Returns a copy of this viewport orbited about the vertical axis.
    ///
    /// The origin and the whole basis turn by `angle` radians around the world
    /// Y axis, so a camera looking at the Y axis keeps looking at it.
    pub fn rotate_yaw(&self, angle: f64) -> Viewport {
        Viewport {
            origin: self.origin.rotate_y(angle),
            forward: self.forward.rotate_y(angle),
            right: self.right.rotate_y(angle),
            up: self.up.rotate_y(angle),
            ..*self
        }
    }
}

#[test]
fn basis_is_orthonormal() {
    use crate::feq;

    let v = Viewport::new(Tuple3D::new(0.0, 100.0, -300.0),
        Tuple3D::new(0.0, -0.25, 1.0), Tuple3D::new(0.0, 1.0, 0.0), 640, 480);

    assert!(feq(v.forward.magnitude(), 1.0));
    assert!(feq(v.right.magnitude(), 1.0));
    assert!(feq(v.up.magnitude(), 1.0));
    assert!(feq(v.forward.dot(&v.right), 0.0));
    assert!(feq(v.forward.dot(&v.up), 0.0));
    assert!(feq(v.right.dot(&v.up), 0.0));

    assert_eq!(v.right, Tuple3D::new(-1.0, 0.0, 0.0));
    assert!(v.up.y > 0.0);
}

#[test]
fn ray_through_center() {
    let v = Viewport::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 1.0, 0.0), 201, 101);
    let r = v.ray_for(100.5, 50.5);

    assert_eq!(r.origin, Tuple3D::zero());
    assert_eq!(r.direction, Tuple3D::new(0.0, 0.0, 1.0));
}

#[test]
fn ray_through_corner() {
    let v = Viewport::with_field_of_view(Tuple3D::zero(),
        Tuple3D::new(0.0, 0.0, 1.0), Tuple3D::new(0.0, 1.0, 0.0), 200, 100,
        std::f64::consts::PI / 2.0);

    // forward + (-right) * 1.0 + up * 0.5 = (1, 0.5, 1), normalized
    assert_eq!(v.ray_direction(0.0, 0.0),
        Tuple3D::new(2.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0));
}

#[test]
fn tall_image_keeps_vertical_field_of_view() {
    use crate::feq;

    let v = Viewport::with_field_of_view(Tuple3D::zero(),
        Tuple3D::new(0.0, 0.0, 1.0), Tuple3D::new(0.0, 1.0, 0.0), 100, 200,
        std::f64::consts::PI / 2.0);

    assert!(feq(v.half_height, 1.0));
    assert!(feq(v.half_width, 0.5));
}

#[test]
fn rotate_yaw_leaves_original_untouched() {
    let v = Viewport::new(Tuple3D::new(0.0, 100.0, -300.0),
        Tuple3D::new(0.0, -0.25, 1.0), Tuple3D::new(0.0, 1.0, 0.0), 640, 480);
    let before = v;

    let turned = v.rotate_yaw(std::f64::consts::FRAC_PI_2);

    assert_eq!(v, before);
    assert_eq!(turned.origin, Tuple3D::new(-300.0, 100.0, 0.0));
    assert_eq!(turned.ray_direction(320.0, 240.0),
        v.ray_direction(320.0, 240.0).rotate_y(std::f64::consts::FRAC_PI_2));
}

#[test]
fn rotate_yaw_full_turn_returns_home() {
    let v = Viewport::new(Tuple3D::new(0.0, 100.0, -300.0),
        Tuple3D::new(0.0, -0.25, 1.0), Tuple3D::new(0.0, 1.0, 0.0), 640, 480);

    assert_eq!(v.rotate_yaw(2.0 * std::f64::consts::PI), v);
}
