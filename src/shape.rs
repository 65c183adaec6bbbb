use crate::consts::FEQ_EPSILON;
use crate::tuple::Tuple3D;
use crate::ray::Ray3D;
use crate::color::Color;
use crate::light::Material;
use crate::pattern::Pattern;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeType {
    /// A sphere with a world-space center and radius.
    Sphere { center: Tuple3D, radius: f64 },

    /// An infinite plane through `point`, facing along a unit `normal`.
    Plane { point: Tuple3D, normal: Tuple3D },
}

/// A primitive in the scene.
///
/// Shapes carry their geometry, their material and their surface pattern.
/// They are built once, handed to a `World`, and never modified afterward;
/// every query here takes `&self`, so a `World` can be shared between render
/// threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,
    pub pattern: Pattern,
}

impl Shape {
    /// Creates a sphere with a white surface and an empty material.
    ///
    /// The radius is not checked. A zero or negative radius produces
    /// meaningless normals.
    pub fn sphere(center: Tuple3D, radius: f64) -> Shape {
        Shape {
            ty: ShapeType::Sphere { center, radius },
            material: Default::default(),
            pattern: Default::default(),
        }
    }

    /// Creates a plane through `point` with the given normal.
    ///
    /// The normal is normalized here, so any non-zero vector works.
    pub fn plane(point: Tuple3D, normal: Tuple3D) -> Shape {
        Shape {
            ty: ShapeType::Plane { point, normal: normal.normalize() },
            material: Default::default(),
            pattern: Default::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    pub fn with_color(self, color: Color) -> Shape {
        self.with_pattern(Pattern::Solid(color))
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Shape {
        self.pattern = pattern;
        self
    }

    /// Intersects a ray with this shape.
    ///
    /// Returns the distance to the nearest intersection in front of the ray
    /// origin, or `None` if the ray misses, runs parallel to a plane, or only
    /// meets the surface behind its origin. Distances are measured in units of
    /// `ray.direction`, so they are true distances for unit directions.
    pub fn intersect(&self, ray: &Ray3D) -> Option<f64> {
        match self.ty {
            ShapeType::Sphere { center, radius }
                => Self::intersect_sphere(center, radius, ray),
            ShapeType::Plane { point, normal }
                => Self::intersect_plane(point, normal, ray),
        }
    }

    /// Obtains the normal vector of a shape at a point on its surface.
    ///
    /// Points off the surface give a vector that is not unit length (for a
    /// sphere) or simply the plane's normal.
    pub fn normal_at(&self, at: Tuple3D) -> Tuple3D {
        match self.ty {
            ShapeType::Sphere { center, radius } => (at - center) * (1.0 / radius),
            ShapeType::Plane { normal, .. } => normal,
        }
    }

    /// The surface color at a world-space point.
    pub fn color_at(&self, at: Tuple3D) -> Color {
        self.pattern.color_at(at)
    }

    /// Solves the quadratic formed by substituting the ray into the implicit
    /// sphere equation.
    ///
    /// A discriminant of zero (the ray grazes the sphere) counts as a miss.
    fn intersect_sphere(center: Tuple3D, radius: f64, ray: &Ray3D)
        -> Option<f64> {
        let sphere_to_ray = ray.origin - center;

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - radius.powi(2);

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant <= 0.0 {
            return None;
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        // t1 <= t2 since a > 0; the far root only matters from inside.
        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }

    /// Intersects a ray with a plane.
    fn intersect_plane(point: Tuple3D, normal: Tuple3D, ray: &Ray3D)
        -> Option<f64> {
        let denom = ray.direction.dot(&normal);

        // Parallel (or nearly parallel) rays never meet the plane.
        if denom.abs() <= FEQ_EPSILON {
            return None;
        }

        let t = (point - ray.origin).dot(&normal) / denom;

        if t > 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
fn unit_ray(origin: Tuple3D, direction: Tuple3D) -> Ray3D {
    Ray3D::new(origin, direction).normalized()
}

#[test]
fn ray_through_sphere_center() {
    use crate::feq;

    let center = Tuple3D::new(3.0, -2.0, 10.0);
    let s = Shape::sphere(center, 2.5);
    let origin = Tuple3D::new(-4.0, 1.0, -6.0);
    let r = unit_ray(origin, center - origin);

    let t = s.intersect(&r).expect("Ray through the center should hit.");
    assert!(feq(t, (center - origin).magnitude() - 2.5));
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere(Tuple3D::new(0.0, 0.0, 0.0), 1.0);

    // Perpendicular distance 2 from the center.
    let r = unit_ray(Tuple3D::new(0.0, 2.0, -5.0), Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_tangent_to_sphere_is_a_miss() {
    let s = Shape::sphere(Tuple3D::new(0.0, 0.0, 0.0), 1.0);
    let r = unit_ray(Tuple3D::new(0.0, 1.0, -5.0), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_inside_sphere_hits_far_side() {
    let s = Shape::sphere(Tuple3D::new(0.0, 0.0, 0.0), 1.0);
    let r = unit_ray(Tuple3D::new(0.0, 0.0, 0.0), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), Some(1.0));
}

#[test]
fn sphere_behind_ray() {
    let s = Shape::sphere(Tuple3D::new(0.0, 0.0, 0.0), 1.0);
    let r = unit_ray(Tuple3D::new(0.0, 0.0, 5.0), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn sphere_normal_points_outward() {
    let s = Shape::sphere(Tuple3D::new(1.0, 1.0, 1.0), 2.0);

    assert_eq!(s.normal_at(Tuple3D::new(1.0, 3.0, 1.0)),
        Tuple3D::new(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple3D::new(-1.0, 1.0, 1.0)),
        Tuple3D::new(-1.0, 0.0, 0.0));
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));
    let r = unit_ray(Tuple3D::new(0.0, 10.0, 0.0), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(p.intersect(&r), None);
}

#[test]
fn ray_coplanar_with_plane() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));
    let r = unit_ray(Tuple3D::zero(), Tuple3D::new(1.0, 0.0, 0.0));

    assert_eq!(p.intersect(&r), None);
}

#[test]
fn ray_hits_ground_plane_at_closed_form_distance() {
    use crate::feq;

    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));
    let r = unit_ray(Tuple3D::new(0.0, 100.0, -300.0),
        Tuple3D::new(0.0, -0.25, 1.0));

    // The ray drops 0.25 per unit of z, so it lands at z = 100 after
    // travelling sqrt(400^2 + 100^2).
    let expected = (400.0f64.powi(2) + 100.0f64.powi(2)).sqrt();
    let t = p.intersect(&r).expect("Ray pointing down should hit the ground.");

    assert!(feq(t, expected));
    assert_eq!(r.position(t), Tuple3D::new(0.0, 0.0, 100.0));
}

#[test]
fn ray_from_below_hits_plane() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));
    let r = unit_ray(Tuple3D::new(0.0, -1.0, 0.0), Tuple3D::new(0.0, 1.0, 0.0));

    assert_eq!(p.intersect(&r), Some(1.0));
}

#[test]
fn plane_behind_ray() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0));
    let r = unit_ray(Tuple3D::new(0.0, 1.0, 0.0), Tuple3D::new(0.0, 1.0, 0.0));

    assert_eq!(p.intersect(&r), None);
}

#[test]
fn plane_normal_is_constant_and_normalized() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 5.0, 0.0));

    assert_eq!(p.normal_at(Tuple3D::new(0.0, 0.0, 0.0)),
        Tuple3D::new(0.0, 1.0, 0.0));
    assert_eq!(p.normal_at(Tuple3D::new(10.0, 0.0, -10.0)),
        Tuple3D::new(0.0, 1.0, 0.0));
}

#[test]
fn plane_color_follows_pattern() {
    let p = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
        .with_pattern(Pattern::checker(Color::gray(0.3), Color::gray(0.15),
            100.0));

    assert_eq!(p.color_at(Tuple3D::new(50.0, 0.0, 50.0)), Color::gray(0.3));
    assert_eq!(p.color_at(Tuple3D::new(150.0, 0.0, 50.0)), Color::gray(0.15));
}
