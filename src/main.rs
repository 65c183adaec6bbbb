use clap::Parser;
use log::{ error, info };

use orbit_tracer::animation::run;
use orbit_tracer::config::{ Args, DisplayKind };
use orbit_tracer::display::{ HeadlessDisplay, TerminalDisplay };
use orbit_tracer::error::Result;
use orbit_tracer::scene;

// Character columns used by the terminal preview.
const TERMINAL_COLUMNS: usize = 100;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = try_main() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let config = args.render_config()?;

    let scene = match args.scene {
        Some(ref path) => {
            info!("loading scene from {}", path.display());
            scene::load(path, config.width, config.height)?
        },
        None => scene::canonical(config.width, config.height),
    };

    info!("{} shapes, {} lights", scene.world.objects.len(),
        scene.world.lights.len());

    match args.display {
        DisplayKind::Headless => {
            let mut display = HeadlessDisplay::new(args.frames);
            run(&scene.world, &scene.view, &config, &mut display)?;
        },
        DisplayKind::Terminal => {
            let mut display = TerminalDisplay::stdout(TERMINAL_COLUMNS,
                args.frames);
            run(&scene.world, &scene.view, &config, &mut display)?;
        },
    }

    Ok(())
}
