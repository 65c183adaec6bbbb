use crate::consts::{ AMBIENT, MAX_REFLECTIONS, SELF_INTERSECTION_EPSILON };
use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::shape::Shape;
use crate::light::{ PointLight, diffuse, specular };
use crate::intersect::{ Intersection, nearest, any_hit };

/// A world with objects and light.
///
/// Worlds collect all objects as well as lights for rendering. A world is
/// built once before rendering starts and is only ever borrowed immutably
/// afterward, which is what lets every render thread share one `&World`.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
}

/// Counters gathered while tracing.
///
/// `deepest` is the largest recursion depth any `trace` call was entered with.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TraceStats {
    pub rays: u64,
    pub shadow_rays: u64,
    pub deepest: usize,
}

impl TraceStats {
    /// Folds another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.shadow_rays += other.shadow_rays;
        self.deepest = self.deepest.max(other.deepest);
    }
}

impl World {
    pub fn new(objects: Vec<Shape>, lights: Vec<PointLight>) -> World {
        World { objects, lights }
    }

    /// Creates an empty world with no objects and no lights.
    pub fn empty() -> World {
        Default::default()
    }

    /// Finds the closest object hit by a ray.
    pub fn intersect(&self, r: &Ray3D) -> Option<Intersection<'_>> {
        nearest(&self.objects, r)
    }

    /// Determines whether a point is shadowed from a light.
    ///
    /// Any object along the ray from the point toward the light blocks it,
    /// including objects beyond the light. The point is expected to already
    /// be lifted off its surface (see `trace`).
    pub fn is_shadowed(&self, p: Tuple3D, light: &PointLight) -> bool {
        let r = Ray3D::new(p, (light.position - p).normalize());

        any_hit(&self.objects, &r)
    }

    /// Determines the color seen along a ray.
    ///
    /// `depth` is the number of reflections already followed to get here;
    /// camera rays start at 0.
    pub fn shade(&self, origin: Tuple3D, direction: Tuple3D, depth: usize)
        -> Color {
        let mut stats = TraceStats::default();
        self.trace(origin, direction, depth, &mut stats)
    }

    /// Same as `shade`, also counting rays into `stats`.
    ///
    /// Each call either returns the background or lights one surface point:
    /// ambient light always, then (while under `MAX_REFLECTIONS`) the mirror
    /// reflection and the diffuse and specular contribution of every light
    /// that can see the point.
    pub fn trace(&self, origin: Tuple3D, direction: Tuple3D, depth: usize,
        stats: &mut TraceStats) -> Color {
        stats.rays += 1;
        stats.deepest = stats.deepest.max(depth);

        let ray = Ray3D::new(origin, direction).normalized();
        let direction = ray.direction;

        let hit = match self.intersect(&ray) {
            Some(i) => i,
            None => return Color::gray(AMBIENT),
        };

        // Pull the point back toward the origin so rays leaving it do not
        // immediately hit the same surface again.
        let point = ray.position(hit.t - SELF_INTERSECTION_EPSILON);
        let shape = hit.what;
        let color = shape.color_at(point);

        let mut result = color * AMBIENT;

        if depth >= MAX_REFLECTIONS {
            return result;
        }

        // The lifted point is just off the surface, so a sphere normal comes
        // back slightly longer than unit length.
        let normalv = shape.normal_at(point).normalize();
        let reflectv = direction.reflect(&normalv);
        let reflected = self.trace(point, reflectv, depth + 1, stats);
        result += Color::hadamard(&reflected, &color)
            * shape.material.reflectivity;

        for light in self.lights.iter() {
            stats.shadow_rays += 1;
            if self.is_shadowed(point, light) {
                continue;
            }

            let lightv = (light.position - point).normalize();
            result += diffuse(&shape.material, color, normalv, lightv);
            result += specular(&shape.material, normalv, lightv, direction);
        }

        result
    }
}

#[cfg(test)]
use crate::light::Material;

#[cfg(test)]
fn mirror() -> Material {
    Material { reflectivity: 1.0, ..Default::default() }
}

#[test]
fn empty_world_is_ambient_everywhere() {
    let w = World::empty();
    let directions = [
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, -1.0, 0.0),
        Tuple3D::new(3.0, 2.0, -7.0),
    ];

    for d in directions.iter() {
        let c = w.shade(Tuple3D::new(1.0, 2.0, 3.0), *d, 0);
        assert_eq!(c, Color::gray(AMBIENT));
        assert_eq!(c.r, AMBIENT);
        assert_eq!(c.g, AMBIENT);
        assert_eq!(c.b, AMBIENT);
    }
}

#[test]
fn missed_ray_is_ambient() {
    let w = World::new(
        vec![Shape::sphere(Tuple3D::new(0.0, 0.0, 10.0), 1.0)],
        vec![PointLight::new(Tuple3D::new(0.0, 10.0, 0.0))],
    );

    let c = w.shade(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0), 0);
    assert_eq!(c, Color::gray(AMBIENT));
}

#[test]
fn unlit_matte_surface_is_ambient_times_color() {
    let red = Color::rgb(0.75, 0.125, 0.125);
    let w = World::new(
        vec![Shape::sphere(Tuple3D::new(0.0, 0.0, 10.0), 1.0).with_color(red)],
        Vec::new(),
    );

    let c = w.shade(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0), 0);
    assert_eq!(c, red * AMBIENT);
}

#[test]
fn diffuse_light_from_straight_on() {
    let w = World::new(
        vec![Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
            .with_color(Color::white())
            .with_material(Material { diffusion: 0.5, ..Default::default() })],
        vec![PointLight::new(Tuple3D::new(0.0, 50.0, 0.0))],
    );

    let c = w.shade(Tuple3D::new(0.0, 10.0, 0.0), Tuple3D::new(0.0, -1.0, 0.0), 0);

    // Ambient surface + 0 reflectivity + full-strength diffuse.
    assert_eq!(c, Color::gray(AMBIENT + 0.5));
}

#[test]
fn specular_highlight_is_white() {
    let w = World::new(
        vec![Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
            .with_color(Color::rgb(1.0, 0.0, 0.0))
            .with_material(Material {
                spec_intensity: 0.5,
                spec_density: 10.0,
                ..Default::default()
            })],
        vec![PointLight::new(Tuple3D::new(0.0, 50.0, 0.0))],
    );

    // Viewer directly above the lit point: half vector equals the normal.
    let c = w.shade(Tuple3D::new(0.0, 10.0, 0.0), Tuple3D::new(0.0, -1.0, 0.0), 0);
    assert_eq!(c, Color::rgb(AMBIENT + 0.5, 0.5, 0.5));
}

#[test]
fn reflection_is_tinted_by_surface() {
    let w = World::new(
        vec![Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
            .with_color(Color::rgb(1.0, 0.5, 0.0))
            .with_material(Material { reflectivity: 0.5, ..Default::default() })],
        Vec::new(),
    );

    // The mirror ray goes straight back up and sees the background.
    let c = w.shade(Tuple3D::new(0.0, 10.0, 0.0), Tuple3D::new(0.0, -1.0, 0.0), 0);
    let local = Color::rgb(1.0, 0.5, 0.0) * AMBIENT;
    let reflected = Color::rgb(1.0, 0.5, 0.0) * AMBIENT * 0.5;

    assert_eq!(c, local + reflected);
}

#[test]
fn max_depth_only_returns_ambient_term() {
    let w = World::new(
        vec![Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
            .with_color(Color::white())
            .with_material(Material { reflectivity: 1.0, diffusion: 1.0,
                ..Default::default() })],
        vec![PointLight::new(Tuple3D::new(0.0, 50.0, 0.0))],
    );

    let c = w.shade(Tuple3D::new(0.0, 10.0, 0.0), Tuple3D::new(0.0, -1.0, 0.0),
        MAX_REFLECTIONS);
    assert_eq!(c, Color::gray(AMBIENT));
}

#[test]
fn facing_mirrors_stop_at_max_depth() {
    let w = World::new(
        vec![
            Shape::sphere(Tuple3D::new(0.0, 0.0, -10.0), 5.0)
                .with_color(Color::white()).with_material(mirror()),
            Shape::sphere(Tuple3D::new(0.0, 0.0, 10.0), 5.0)
                .with_color(Color::white()).with_material(mirror()),
        ],
        vec![PointLight::new(Tuple3D::new(0.0, 100.0, 0.0))],
    );

    let mut stats = TraceStats::default();
    let c = w.trace(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0), 0, &mut stats);

    // Every bounce lands on the other sphere, so the chain runs to the limit
    // and no further: one camera ray plus MAX_REFLECTIONS reflections.
    assert_eq!(stats.deepest, MAX_REFLECTIONS);
    assert_eq!(stats.rays, MAX_REFLECTIONS as u64 + 1);
    assert_eq!(c, Color::gray(AMBIENT * (MAX_REFLECTIONS as f64 + 1.0)));
}

#[test]
fn occluded_light_contributes_nothing() {
    let ground = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
        .with_color(Color::white())
        .with_material(Material {
            diffusion: 1.0,
            spec_intensity: 1.0,
            spec_density: 1.0,
            ..Default::default()
        });
    let blocker = Shape::sphere(Tuple3D::new(0.0, 20.0, 0.0), 5.0)
        .with_color(Color::black());
    let light = PointLight::new(Tuple3D::new(0.0, 40.0, 0.0));

    let lit = World::new(vec![ground.clone(), blocker.clone()], vec![light]);
    let dark = World::new(vec![ground, blocker], Vec::new());

    // Look at the ground point right under the blocker at a slant.
    let origin = Tuple3D::new(10.0, 10.0, 0.0);
    let direction = Tuple3D::new(-10.0, -10.0, 0.0);

    assert!(lit.is_shadowed(Tuple3D::new(0.0, 0.01, 0.0), &light));
    assert_eq!(lit.shade(origin, direction, 0), dark.shade(origin, direction, 0));
}

#[test]
fn shape_beyond_the_light_still_shadows() {
    let ground = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
        .with_color(Color::white())
        .with_material(Material { diffusion: 1.0, ..Default::default() });
    let beyond = Shape::sphere(Tuple3D::new(0.0, 20.0, 0.0), 5.0);
    let light = PointLight::new(Tuple3D::new(0.0, 10.0, 0.0));

    let w = World::new(vec![ground, beyond], vec![light]);

    assert!(w.is_shadowed(Tuple3D::new(0.0, 0.01, 0.0), &light));
    assert_eq!(w.shade(Tuple3D::new(0.0, 1.0, 0.0), Tuple3D::new(0.0, -1.0, 0.0), 0),
        Color::gray(AMBIENT));
}

#[test]
fn nothing_along_the_shadow_ray_leaves_light_visible() {
    let w = World::new(
        vec![Shape::sphere(Tuple3D::new(0.0, 20.0, 0.0), 5.0)],
        Vec::new(),
    );
    let light = PointLight::new(Tuple3D::new(10.0, 0.0, 0.0));

    assert!(!w.is_shadowed(Tuple3D::zero(), &light));
}

#[test]
fn lifted_hit_point_does_not_shadow_itself() {
    let w = World::new(
        vec![Shape::sphere(Tuple3D::new(0.0, 0.0, 0.0), 10.0)
            .with_color(Color::white())
            .with_material(Material { diffusion: 1.0, ..Default::default() })],
        vec![PointLight::new(Tuple3D::new(0.0, 0.0, -100.0))],
    );

    // Straight on: diffuse at full strength means the surface saw the light.
    let c = w.shade(Tuple3D::new(0.0, 0.0, -50.0), Tuple3D::new(0.0, 0.0, 1.0), 0);
    assert_eq!(c, Color::gray(AMBIENT + 1.0));
}
