use std::fs;
use std::path::Path;

use serde::{ Serialize, Deserialize };

use crate::camera::Viewport;
use crate::color::Color;
use crate::consts::FIELD_OF_VIEW;
use crate::error::{ Error, Result };
use crate::light::{ Material, PointLight };
use crate::pattern::Pattern;
use crate::shape::Shape;
use crate::tuple::Tuple3D;
use crate::world::World;

/// A world together with the camera that looks at it.
pub struct Scene {
    pub world: World,
    pub view: Viewport,
}

/// The built-in scene: three glossy spheres resting on a checkered floor, lit
/// by two lights, seen from above and behind.
pub fn canonical(width: usize, height: usize) -> Scene {
    let mirror_ish = Material { reflectivity: 0.5, ..Default::default() };

    let red = Shape::sphere(Tuple3D::new(60.0, 50.0, 0.0), 50.0)
        .with_color(Color::rgb(0.75, 0.125, 0.125))
        .with_material(mirror_ish);

    let green = Shape::sphere(Tuple3D::new(-15.0, 25.0, -25.0), 25.0)
        .with_color(Color::rgb(0.125, 0.6, 0.125))
        .with_material(mirror_ish);

    let blue = Shape::sphere(Tuple3D::new(-50.0, 40.0, 75.0), 40.0)
        .with_color(Color::rgb(0.125, 0.125, 0.75))
        .with_material(mirror_ish);

    let floor = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
        .with_pattern(floor_pattern())
        .with_material(Material {
            diffusion: 0.25,
            spec_density: 10.0,
            spec_intensity: 0.1,
            ..Default::default()
        });

    let world = World::new(
        vec![red, green, blue, floor],
        vec![
            PointLight::new(Tuple3D::new(-1000.0, 300.0, 0.0)),
            PointLight::new(Tuple3D::new(100.0, 900.0, 500.0)),
        ],
    );

    let view = Viewport::new(
        Tuple3D::new(0.0, 100.0, -300.0),
        Tuple3D::new(0.0, -0.25, 1.0),
        Tuple3D::new(0.0, 1.0, 0.0),
        width,
        height,
    );

    Scene { world, view }
}

/// The two-tone checkerboard of the built-in floor.
pub fn floor_pattern() -> Pattern {
    Pattern::checker(Color::gray(0.3), Color::gray(0.15), 100.0)
}

/// Reads a JSON scene description from a file.
pub fn load(path: &Path, width: usize, height: usize) -> Result<Scene> {
    let text = fs::read_to_string(path)?;
    parse(&text, width, height)
}

/// Parses a JSON scene description.
pub fn parse(text: &str, width: usize, height: usize) -> Result<Scene> {
    let scene_json: SceneJson = serde_json::from_str(text)?;
    scene_json.into_scene(width, height)
}

#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    camera: CameraJson,
    #[serde(default)]
    lights: Vec<Vec<f64>>,
    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Serialize, Deserialize)]
struct CameraJson {
    from: Vec<f64>,
    direction: Vec<f64>,
    up: Vec<f64>,
    field_of_view: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ShapeJson {
    Sphere {
        center: Vec<f64>,
        radius: f64,
        #[serde(flatten)]
        surface: SurfaceJson,
    },
    Plane {
        point: Vec<f64>,
        normal: Vec<f64>,
        #[serde(flatten)]
        surface: SurfaceJson,
    },
}

#[derive(Clone, Default, Serialize, Deserialize)]
struct SurfaceJson {
    color: Option<Vec<f64>>,
    checker: Option<CheckerJson>,
    #[serde(default)]
    reflectivity: f64,
    #[serde(default)]
    diffusion: f64,
    #[serde(default)]
    spec_intensity: f64,
    #[serde(default)]
    spec_density: f64,
}

#[derive(Clone, Serialize, Deserialize)]
struct CheckerJson {
    primary: Vec<f64>,
    secondary: Vec<f64>,
    size: f64,
}

/// Converts a JSON triple, rejecting anything that is not three numbers.
fn triple(v: &Vec<f64>, what: &str) -> Result<Tuple3D> {
    if v.len() != 3 {
        return Err(Error::InvalidScene(format!(
            "{} needs 3 components, got {}", what, v.len()
        )));
    }

    Ok(v.into())
}

fn color(v: &Vec<f64>, what: &str) -> Result<Color> {
    if v.len() != 3 {
        return Err(Error::InvalidScene(format!(
            "{} needs 3 components, got {}", what, v.len()
        )));
    }

    Ok(v.into())
}

impl SurfaceJson {
    fn to_surface(&self) -> Result<(Pattern, Material)> {
        let pattern = match (&self.color, &self.checker) {
            (Some(_), Some(_)) => return Err(Error::InvalidScene(
                "a shape has both a color and a checker pattern".to_string()
            )),
            (Some(c), None) => Pattern::Solid(color(c, "color")?),
            (None, Some(checker)) => Pattern::checker(
                color(&checker.primary, "checker primary")?,
                color(&checker.secondary, "checker secondary")?,
                checker.size,
            ),
            (None, None) => Pattern::default(),
        };

        let material = Material {
            reflectivity: self.reflectivity,
            diffusion: self.diffusion,
            spec_intensity: self.spec_intensity,
            spec_density: self.spec_density,
        };

        Ok((pattern, material))
    }
}

impl ShapeJson {
    fn to_shape(&self) -> Result<Shape> {
        let (shape, surface) = match self {
            ShapeJson::Sphere { center, radius, surface } => (
                Shape::sphere(triple(center, "sphere center")?, *radius),
                surface,
            ),
            ShapeJson::Plane { point, normal, surface } => {
                let normal = triple(normal, "plane normal")?;
                if normal.magnitude() == 0.0 {
                    return Err(Error::InvalidScene(
                        "plane normal is the zero vector".to_string()
                    ));
                }

                (Shape::plane(triple(point, "plane point")?, normal), surface)
            },
        };

        let (pattern, material) = surface.to_surface()?;
        Ok(shape.with_pattern(pattern).with_material(material))
    }
}

impl SceneJson {
    pub fn into_scene(self, width: usize, height: usize) -> Result<Scene> {
        let camera = &self.camera;
        let view = Viewport::with_field_of_view(
            triple(&camera.from, "camera from")?,
            triple(&camera.direction, "camera direction")?,
            triple(&camera.up, "camera up")?,
            width,
            height,
            camera.field_of_view.unwrap_or(FIELD_OF_VIEW),
        );

        let lights = self.lights.iter()
            .map(|l| triple(l, "light").map(PointLight::new))
            .collect::<Result<Vec<_>>>()?;

        let objects = self.shapes.iter()
            .map(ShapeJson::to_shape)
            .collect::<Result<Vec<_>>>()?;

        Ok(Scene { world: World::new(objects, lights), view })
    }
}

#[test]
fn canonical_scene_contents() {
    let scene = canonical(640, 480);

    assert_eq!(scene.world.objects.len(), 4);
    assert_eq!(scene.world.lights.len(), 2);
    assert_eq!(scene.view.origin, Tuple3D::new(0.0, 100.0, -300.0));
    assert_eq!(scene.view.forward, Tuple3D::new(0.0, -0.25, 1.0).normalize());
}

#[test]
fn parse_minimal_scene() {
    let text = r#"{
        "camera": { "from": [0, 1, -5], "direction": [0, 0, 1], "up": [0, 1, 0] },
        "lights": [[0, 10, 0]],
        "shapes": [
            { "type": "sphere", "center": [0, 1, 0], "radius": 1,
              "color": [1, 0, 0], "reflectivity": 0.5 },
            { "type": "plane", "point": [0, 0, 0], "normal": [0, 2, 0],
              "checker": { "primary": [1, 1, 1], "secondary": [0, 0, 0], "size": 1 },
              "diffusion": 0.25 }
        ]
    }"#;

    let scene = parse(text, 32, 24).unwrap();
    let objects = &scene.world.objects;

    assert_eq!(scene.view.width, 32);
    assert_eq!(scene.world.lights, vec![PointLight::new(Tuple3D::new(0.0, 10.0, 0.0))]);
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].pattern, Pattern::Solid(Color::rgb(1.0, 0.0, 0.0)));
    assert_eq!(objects[0].material.reflectivity, 0.5);
    assert_eq!(objects[1].normal_at(Tuple3D::zero()), Tuple3D::new(0.0, 1.0, 0.0));
    assert_eq!(objects[1].material.diffusion, 0.25);
}

#[test]
fn short_vector_is_rejected() {
    let text = r#"{
        "camera": { "from": [0, 1], "direction": [0, 0, 1], "up": [0, 1, 0] }
    }"#;

    assert!(matches!(parse(text, 8, 8), Err(Error::InvalidScene(_))));
}

#[test]
fn unknown_shape_is_rejected() {
    let text = r#"{
        "camera": { "from": [0, 1, 0], "direction": [0, 0, 1], "up": [0, 1, 0] },
        "shapes": [{ "type": "cube" }]
    }"#;

    assert!(matches!(parse(text, 8, 8), Err(Error::Json(_))));
}

#[test]
fn color_and_checker_together_is_rejected() {
    let text = r#"{
        "camera": { "from": [0, 1, 0], "direction": [0, 0, 1], "up": [0, 1, 0] },
        "shapes": [{ "type": "plane", "point": [0, 0, 0], "normal": [0, 1, 0],
            "color": [1, 1, 1],
            "checker": { "primary": [1, 1, 1], "secondary": [0, 0, 0], "size": 1 } }]
    }"#;

    assert!(parse(text, 8, 8).is_err());
}
