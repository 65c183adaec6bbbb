use std::path::PathBuf;

use clap::{ ArgEnum, Parser };

use crate::consts::{ CANVAS_HEIGHT, CANVAS_WIDTH, NUM_THREADS, OVERSAMPLE,
    ROTATION_PERIOD_MS };
use crate::error::{ Error, Result };

/// Where finished frames go.
#[derive(ArgEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayKind {
    /// Log a summary of each frame.
    Headless,

    /// Draw a downsampled preview in the terminal.
    Terminal,
}

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Image width in pixels.
    #[clap(long, default_value_t = CANVAS_WIDTH)]
    pub width: usize,

    /// Image height in pixels.
    #[clap(long, default_value_t = CANVAS_HEIGHT)]
    pub height: usize,

    /// Render threads spawned per frame, one row band each.
    #[clap(long, default_value_t = NUM_THREADS)]
    pub threads: usize,

    /// Samples per pixel along each axis (2 means 2x2 samples).
    #[clap(long, default_value_t = OVERSAMPLE)]
    pub oversample: usize,

    /// Milliseconds for one full orbit of the camera.
    #[clap(long, default_value_t = ROTATION_PERIOD_MS)]
    pub period_ms: f64,

    /// Stop after this many frames; 0 renders until interrupted.
    #[clap(long, default_value_t = 0)]
    pub frames: u64,

    /// JSON scene description to render instead of the built-in scene.
    #[clap(long, parse(from_os_str))]
    pub scene: Option<PathBuf>,

    #[clap(long, arg_enum, default_value = "headless")]
    pub display: DisplayKind,
}

/// Settings for rendering frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub threads: usize,
    pub oversample: usize,
    pub period_ms: f64,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            threads: NUM_THREADS,
            oversample: OVERSAMPLE,
            period_ms: ROTATION_PERIOD_MS,
        }
    }
}

impl RenderConfig {
    /// Checks the settings the renderer cannot work without.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "image size {}x{} has no pixels", self.width, self.height
            )));
        }

        if self.threads == 0 {
            return Err(Error::InvalidConfig(
                "at least one render thread is required".to_string()
            ));
        }

        if self.oversample == 0 {
            return Err(Error::InvalidConfig(
                "oversampling factor must be at least 1".to_string()
            ));
        }

        if !(self.period_ms.is_finite() && self.period_ms > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "rotation period {} ms must be positive", self.period_ms
            )));
        }

        Ok(())
    }
}

impl Args {
    /// The validated render settings named on the command line.
    pub fn render_config(&self) -> Result<RenderConfig> {
        let config = RenderConfig {
            width: self.width,
            height: self.height,
            threads: self.threads,
            oversample: self.oversample,
            period_ms: self.period_ms,
        };

        config.validate()?;
        Ok(config)
    }
}

#[test]
fn default_config_is_valid() {
    assert!(RenderConfig::default().validate().is_ok());
}

#[test]
fn zero_threads_rejected() {
    let config = RenderConfig { threads: 0, ..Default::default() };

    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn zero_oversample_rejected() {
    let config = RenderConfig { oversample: 0, ..Default::default() };

    assert!(config.validate().is_err());
}

#[test]
fn negative_period_rejected() {
    let config = RenderConfig { period_ms: -5.0, ..Default::default() };

    assert!(config.validate().is_err());
}

#[test]
fn args_parse_with_defaults() {
    let args = Args::parse_from(&["orbit-tracer"]);

    assert_eq!(args.render_config().unwrap(), RenderConfig::default());
    assert_eq!(args.frames, 0);
    assert_eq!(args.scene, None);
    assert_eq!(args.display, DisplayKind::Headless);
}

#[test]
fn args_parse_overrides() {
    let args = Args::parse_from(&[
        "orbit-tracer", "--width", "64", "--height", "48", "--threads", "3",
        "--oversample", "1", "--frames", "10", "--display", "terminal",
    ]);
    let config = args.render_config().unwrap();

    assert_eq!(config.width, 64);
    assert_eq!(config.height, 48);
    assert_eq!(config.threads, 3);
    assert_eq!(config.oversample, 1);
    assert_eq!(args.frames, 10);
    assert_eq!(args.display, DisplayKind::Terminal);
}
