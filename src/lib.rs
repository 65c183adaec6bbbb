pub mod consts;
pub mod error;
pub mod config;

pub mod tuple;
pub mod ray;
pub mod color;
pub mod pattern;
pub mod light;

pub mod shape;
pub mod intersect;
pub mod world;
pub mod camera;

pub mod canvas;
pub mod parallel;
pub mod animation;
pub mod display;
pub mod scene;

use consts::FEQ_EPSILON;
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
