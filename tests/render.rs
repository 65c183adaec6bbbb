use orbit_tracer::canvas::Canvas;
use orbit_tracer::color::Color;
use orbit_tracer::config::RenderConfig;
use orbit_tracer::consts::AMBIENT;
use orbit_tracer::parallel::render_frame;
use orbit_tracer::scene::{ canonical, floor_pattern };
use orbit_tracer::shape::ShapeType;

fn small_config(threads: usize) -> RenderConfig {
    RenderConfig { width: 64, height: 48, threads, oversample: 2,
        ..Default::default() }
}

#[test]
fn center_ray_sees_the_scene() {
    let scene = canonical(640, 480);
    let ray = scene.view.ray_for(320.0, 240.0);

    assert_eq!(ray.direction, scene.view.forward);
    assert!(scene.world.intersect(&ray.normalized()).is_some());
    assert_ne!(scene.world.shade(ray.origin, ray.direction, 0),
        Color::gray(AMBIENT));
}

#[test]
fn lower_center_ray_lands_on_checkered_floor() {
    let scene = canonical(640, 480);
    let ray = scene.view.ray_for(320.5, 470.5).normalized();

    let hit = scene.world.intersect(&ray).expect("floor should be hit");
    match hit.what.ty {
        ShapeType::Plane { .. } => (),
        _ => panic!("expected the floor, hit {:?}", hit.what.ty),
    }

    let point = ray.position(hit.t);
    let color = hit.what.color_at(point);
    let (light, dark) = match floor_pattern() {
        orbit_tracer::pattern::Pattern::Checker { primary, secondary, .. }
            => (primary, secondary),
        other => panic!("floor pattern should be a checker, got {:?}", other),
    };

    assert!(color == light || color == dark);
    assert_ne!(scene.world.shade(ray.origin, ray.direction, 0),
        Color::gray(AMBIENT));
}

#[test]
fn every_pixel_is_written() {
    let config = small_config(5);
    let scene = canonical(config.width, config.height);

    let mut canvas = Canvas::new(config.width, config.height);
    render_frame(&scene.world, &scene.view, 0.0, &config, &mut canvas)
        .unwrap();

    // Nothing in the scene is darker than its ambient term, so a black pixel
    // was never written.
    assert!(canvas.pixels().iter().all(|p| p.luminance() > 0.0));
}

#[test]
fn thread_count_does_not_change_the_image() {
    let scene = canonical(64, 48);

    let render = |threads: usize| {
        let config = small_config(threads);
        let mut canvas = Canvas::new(config.width, config.height);
        render_frame(&scene.world, &scene.view, 0.7, &config, &mut canvas)
            .unwrap();
        canvas
    };

    let one = render(1);
    assert_eq!(render(7), one);
    assert_eq!(render(48), one);
}

#[test]
fn orbiting_changes_the_image() {
    let config = small_config(4);
    let scene = canonical(config.width, config.height);

    let mut front = Canvas::new(config.width, config.height);
    let mut side = Canvas::new(config.width, config.height);
    render_frame(&scene.world, &scene.view, 0.0, &config, &mut front).unwrap();
    render_frame(&scene.world, &scene.view, std::f64::consts::FRAC_PI_2,
        &config, &mut side).unwrap();

    assert_ne!(front, side);
}

#[test]
fn bundled_scene_file_matches_built_in_scene() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenes/canonical.json");
    let loaded = orbit_tracer::scene::load(&path, 640, 480).unwrap();
    let built_in = canonical(640, 480);

    assert_eq!(loaded.world.objects, built_in.world.objects);
    assert_eq!(loaded.world.lights, built_in.world.lights);
    assert_eq!(loaded.view, built_in.view);
}
