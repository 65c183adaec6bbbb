use std::f64::consts::PI;
use std::time::Instant;

use log::{ debug, info };

use crate::camera::Viewport;
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::consts::FPS_SMOOTHING;
use crate::display::Display;
use crate::error::Result;
use crate::parallel::render_frame;
use crate::world::World;

/// Camera yaw after `elapsed_ms`, one full turn every `period_ms`.
pub fn yaw_at(elapsed_ms: f64, period_ms: f64) -> f64 {
    (elapsed_ms / period_ms) * 2.0 * PI
}

/// A monotonic clock started when the render loop starts.
#[derive(Copy, Clone, Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start() -> Clock {
        Clock { start: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Exponentially smoothed frames per second.
///
/// The first sample is taken as is; later samples are blended in with weight
/// `1 - FPS_SMOOTHING`. Only used for reporting.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameRate {
    fps: Option<f64>,
}

impl FrameRate {
    pub fn new() -> FrameRate {
        Default::default()
    }

    /// Folds in the time one frame took and returns the new average.
    ///
    /// Non-positive deltas carry no information and are skipped.
    pub fn update(&mut self, frame_delta_ms: f64) -> f64 {
        if frame_delta_ms > 0.0 {
            let sample = 1000.0 / frame_delta_ms;
            self.fps = Some(match self.fps {
                None => sample,
                Some(fps) => fps * FPS_SMOOTHING + sample * (1.0 - FPS_SMOOTHING),
            });
        }

        self.fps()
    }

    pub fn fps(&self) -> f64 {
        self.fps.unwrap_or(0.0)
    }
}

/// Renders frames until the display asks to stop.
///
/// Frames run strictly one after another: each frame samples the clock once,
/// renders with every thread joined, and is presented before the quit check
/// and the next frame. Returns the number of frames presented.
pub fn run<D: Display>(world: &World, view: &Viewport, config: &RenderConfig,
    display: &mut D) -> Result<u64> {
    config.validate()?;

    let clock = Clock::start();
    let mut rate = FrameRate::new();
    let mut frames = 0u64;
    let mut last_ms = clock.elapsed_ms();

    info!("rendering {}x{} with {} threads, {}x{} samples per pixel",
        config.width, config.height, config.threads,
        config.oversample, config.oversample);

    while !display.quit_requested() {
        let yaw = yaw_at(clock.elapsed_ms(), config.period_ms);

        let mut canvas = Canvas::new(config.width, config.height);
        let stats = render_frame(world, view, yaw, config, &mut canvas)?;
        display.present(&canvas)?;
        frames += 1;

        let now_ms = clock.elapsed_ms();
        let fps = rate.update(now_ms - last_ms);
        last_ms = now_ms;

        debug!("frame {}: yaw {:.3} rad, {} rays, {} shadow rays, depth {}, \
            {:.1} fps", frames, yaw, stats.rays, stats.shadow_rays,
            stats.deepest, fps);

        if frames % 30 == 0 {
            info!("{:.1} fps", fps);
        }
    }

    info!("stopped after {} frames", frames);
    Ok(frames)
}

#[test]
fn yaw_makes_one_turn_per_period() {
    use crate::feq;

    assert!(feq(yaw_at(0.0, 5000.0), 0.0));
    assert!(feq(yaw_at(1250.0, 5000.0), PI / 2.0));
    assert!(feq(yaw_at(5000.0, 5000.0), 2.0 * PI));
    assert!(feq(yaw_at(7500.0, 5000.0), 3.0 * PI));
}

#[test]
fn frame_rate_first_sample_seeds_average() {
    use crate::feq;

    let mut rate = FrameRate::new();
    assert_eq!(rate.fps(), 0.0);

    assert!(feq(rate.update(20.0), 50.0));
}

#[test]
fn frame_rate_is_smoothed() {
    use crate::feq;

    let mut rate = FrameRate::new();
    rate.update(20.0);
    let fps = rate.update(10.0);

    assert!(feq(fps, 50.0 * FPS_SMOOTHING + 100.0 * (1.0 - FPS_SMOOTHING)));
}

#[test]
fn frame_rate_ignores_zero_delta() {
    use crate::feq;

    let mut rate = FrameRate::new();
    rate.update(20.0);

    assert!(feq(rate.update(0.0), 50.0));
}

#[test]
fn run_stops_when_display_quits() {
    use crate::display::HeadlessDisplay;

    let world = World::empty();
    let view = Viewport::new(Default::default(),
        crate::tuple::Tuple3D::new(0.0, 0.0, 1.0),
        crate::tuple::Tuple3D::new(0.0, 1.0, 0.0), 8, 6);
    let config = RenderConfig { width: 8, height: 6, threads: 2,
        oversample: 1, ..Default::default() };

    let mut display = HeadlessDisplay::new(3);
    let frames = run(&world, &view, &config, &mut display).unwrap();

    assert_eq!(frames, 3);
    assert_eq!(display.frames_shown(), 3);
}

#[test]
fn run_rejects_invalid_config() {
    use crate::display::HeadlessDisplay;

    let world = World::empty();
    let view = Viewport::default();
    let config = RenderConfig { threads: 0, ..Default::default() };

    let mut display = HeadlessDisplay::new(1);
    assert!(run(&world, &view, &config, &mut display).is_err());
    assert_eq!(display.frames_shown(), 0);
}
