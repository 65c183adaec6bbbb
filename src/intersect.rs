use crate::ray::Ray3D;
use crate::shape::Shape;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin), and `what`
/// is the shape that was hit.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if the underlying *pointers* of the
/// intersections are equivalent.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

/// Finds the closest shape a ray hits.
///
/// Shapes are scanned in order. A later shape replaces the current hit only if
/// it is strictly closer, so among shapes at the same distance the first one
/// wins.
pub fn nearest<'a, I>(shapes: I, ray: &Ray3D) -> Option<Intersection<'a>>
    where I: IntoIterator<Item = &'a Shape> {
    let mut hit: Option<Intersection<'a>> = None;

    for shape in shapes {
        let t = match shape.intersect(ray) {
            Some(t) if t >= 0.0 => t,
            _ => continue,
        };

        let closer = match hit {
            Some(ref i) => t < i.t,
            None => true,
        };

        if closer {
            hit = Some(Intersection { t, what: shape });
        }
    }

    hit
}

/// Checks whether any shape is hit anywhere ahead of the ray origin.
///
/// Stops at the first hit; the occluder found is not necessarily the closest.
pub fn any_hit<'a, I>(shapes: I, ray: &Ray3D) -> bool
    where I: IntoIterator<Item = &'a Shape> {
    shapes.into_iter().any(|shape| match shape.intersect(ray) {
        Some(t) => t >= 0.0,
        None => false,
    })
}

#[cfg(test)]
fn three_spheres_along_z() -> Vec<Shape> {
    use crate::tuple::Tuple3D;

    vec![
        Shape::sphere(Tuple3D::new(0.0, 0.0, 10.0), 1.0),
        Shape::sphere(Tuple3D::new(0.0, 0.0, 5.0), 1.0),
        Shape::sphere(Tuple3D::new(0.0, 0.0, 20.0), 1.0),
    ]
}

#[test]
fn nearest_picks_closest_shape() {
    use crate::tuple::Tuple3D;

    let shapes = three_spheres_along_z();
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    let i = nearest(&shapes, &r).expect("Ray along +z should hit.");
    assert_eq!(i, Intersection { t: 4.0, what: &shapes[1] });
}

#[test]
fn nearest_first_shape_wins_ties() {
    use crate::tuple::Tuple3D;

    let shapes = vec![
        Shape::sphere(Tuple3D::new(0.0, 0.0, 5.0), 1.0),
        Shape::sphere(Tuple3D::new(0.0, 0.0, 5.0), 1.0),
    ];
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    let i = nearest(&shapes, &r).expect("Ray along +z should hit.");
    assert!(std::ptr::eq(i.what, &shapes[0]));
}

#[test]
fn nearest_with_no_shapes() {
    use crate::tuple::Tuple3D;

    let shapes: Vec<Shape> = Vec::new();
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(nearest(&shapes, &r), None);
}

#[test]
fn any_hit_sees_shapes_at_any_distance() {
    use crate::tuple::Tuple3D;

    let far = vec![Shape::sphere(Tuple3D::new(0.0, 0.0, 1e6), 1.0)];
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    assert!(any_hit(&three_spheres_along_z(), &r));
    assert!(any_hit(&far, &r));
}

#[test]
fn any_hit_ignores_shapes_behind_origin() {
    use crate::tuple::Tuple3D;

    let shapes = three_spheres_along_z();
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));

    let none: Vec<Shape> = Vec::new();

    assert!(!any_hit(&shapes, &r));
    assert!(!any_hit(&none, &r));
}
