use crate::color::Color;
use crate::tuple::Tuple3D;

/// A point light.
///
/// Every light emits the same uniform white light, so a light is nothing
/// more than a position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub position: Tuple3D,
}

impl PointLight {
    pub fn new(position: Tuple3D) -> PointLight {
        PointLight { position }
    }
}

/// A material record.
///
/// Materials use the attributes of the shading model: how much of a mirror
/// the surface is, how strongly it scatters direct light, and the strength
/// and tightness of its specular highlight. The ambient coefficient is global
/// (see `consts::AMBIENT`) rather than per material.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub reflectivity: f64,
    pub diffusion: f64,
    pub spec_intensity: f64,
    pub spec_density: f64,
}

/// Lambertian term for one light.
///
/// `lightv` is the unit vector from the surface point toward the light. The
/// result is tinted by the surface color.
pub fn diffuse(m: &Material, color: Color, normalv: Tuple3D, lightv: Tuple3D)
    -> Color {
    let light_dot_normal = normalv.dot(&lightv).max(0.0);
    color * (m.diffusion * light_dot_normal)
}

/// Specular highlight for one light.
///
/// The half vector bisects the direction toward the light and the direction
/// back toward the viewer (`-direction`). Highlights are pure white, they do
/// not pick up the surface color.
pub fn specular(m: &Material, normalv: Tuple3D, lightv: Tuple3D,
    direction: Tuple3D) -> Color {
    let eyev = -direction;
    let halfv = (lightv + eyev).normalize();
    let factor = normalv.dot(&halfv).max(0.0).powf(m.spec_density);

    Color::white() * (m.spec_intensity * factor)
}

#[test]
fn diffuse_facing_light_is_full_strength() {
    let m = Material { diffusion: 0.5, ..Default::default() };
    let color = Color::rgb(1.0, 0.5, 0.0);
    let normalv = Tuple3D::new(0.0, 1.0, 0.0);
    let lightv = Tuple3D::new(0.0, 1.0, 0.0);

    assert_eq!(diffuse(&m, color, normalv, lightv), Color::rgb(0.5, 0.25, 0.0));
}

#[test]
fn diffuse_at_45_degrees() {
    let m = Material { diffusion: 1.0, ..Default::default() };
    let normalv = Tuple3D::new(0.0, 1.0, 0.0);
    let lightv = Tuple3D::new(1.0, 1.0, 0.0).normalize();
    let k = 2.0f64.sqrt() / 2.0;

    assert_eq!(diffuse(&m, Color::white(), normalv, lightv), Color::gray(k));
}

#[test]
fn diffuse_light_behind_surface_is_black() {
    let m = Material { diffusion: 1.0, ..Default::default() };
    let normalv = Tuple3D::new(0.0, 1.0, 0.0);
    let lightv = Tuple3D::new(0.0, -1.0, 0.0);

    assert_eq!(diffuse(&m, Color::white(), normalv, lightv), Color::black());
}

#[test]
fn specular_mirror_alignment_is_full_strength() {
    let m = Material { spec_intensity: 0.1, spec_density: 10.0,
        ..Default::default() };
    let normalv = Tuple3D::new(0.0, 1.0, 0.0);

    // Viewer and light mirrored about the normal: half vector == normal.
    let lightv = Tuple3D::new(1.0, 1.0, 0.0).normalize();
    let direction = Tuple3D::new(1.0, -1.0, 0.0).normalize();

    assert_eq!(specular(&m, normalv, lightv, direction), Color::gray(0.1));
}

#[test]
fn specular_falls_off_with_density() {
    let m = Material { spec_intensity: 1.0, spec_density: 2.0,
        ..Default::default() };
    let normalv = Tuple3D::new(0.0, 1.0, 0.0);

    // Light straight above, viewer looking along -Z at a grazing angle.
    let lightv = Tuple3D::new(0.0, 1.0, 0.0);
    let direction = Tuple3D::new(0.0, 0.0, 1.0);
    let halfv = Tuple3D::new(0.0, 1.0, -1.0).normalize();
    let expected = normalv.dot(&halfv).powf(2.0);

    assert_eq!(specular(&m, normalv, lightv, direction), Color::gray(expected));
}
