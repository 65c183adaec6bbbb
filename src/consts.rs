use std::f64::consts::PI;

// Runtime defaults
pub const NUM_THREADS: usize = 8;
pub const CANVAS_WIDTH: usize = 640;
pub const CANVAS_HEIGHT: usize = 480;
pub const OVERSAMPLE: usize = 2;
pub const ROTATION_PERIOD_MS: f64 = 5000.0;

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Distance a hit point is pulled back toward the ray origin before new rays
// are cast from it.
pub const SELF_INTERSECTION_EPSILON: f64 = 0.01;

// Illumination applied everywhere, also used as the background color.
pub const AMBIENT: f64 = 0.3;

// Maximum recursion depth
pub const MAX_REFLECTIONS: usize = 5;

// Camera
pub const FIELD_OF_VIEW: f64 = PI / 3.0;

// Frame rate smoothing; weight given to the previous average.
pub const FPS_SMOOTHING: f64 = 0.9;
