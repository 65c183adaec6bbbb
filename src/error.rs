//! Error type for the renderer.
//!
//! Geometry never fails: a ray that hits nothing is an ordinary `None`. The
//! errors here come from setting a render up (configuration, scene files) and
//! from a frame whose row bands do not tile the canvas.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading a scene file or writing to the display failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scene file is not valid JSON or does not match the schema.
    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A scene file parsed but describes something unusable.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// Rejected command line or render settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Row bands that overlap, leave gaps, or run off the canvas.
    #[error("Invalid row partition: {0}")]
    Partition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
