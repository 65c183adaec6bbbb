use std::ops::{ Add, AddAssign, Sub, Mul, Div };

use crate::feq;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Components
/// are nominally in 0.0 to 1.0, but shading may push them above 1.0; it is up
/// to whatever displays a frame to clamp them (see `Canvas::to_rgb8`).
///
/// # Examples
///
/// Tint a gray by a surface color:
///
/// ```
/// # use orbit_tracer::color::Color;
/// let gray = Color::gray(0.5);
/// let red = Color::rgb(0.75, 0.125, 0.125);
/// assert_eq!(Color::hadamard(&gray, &red), Color::rgb(0.375, 0.0625, 0.0625));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple3D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

/// Conversion from a vector to a `Color`.
///
/// Takes the first three elements of a vector, and assigns them to the `r`,
/// `g` and `b` fields of the `Color`, in that order. Missing fields are
/// assigned defaults in place.
impl From<&Vec<f64>> for Color {
    fn from(v: &Vec<f64>) -> Color {
        match v.len() {
            0 => Default::default(),
            1 => Color { r: v[0], ..Default::default() },
            2 => Color { r: v[0], g: v[1], ..Default::default() },
            _ => Color { r: v[0], g: v[1], b: v[2] }
        }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// A gray with the same value on every channel.
    pub fn gray(v: f64) -> Color {
        Color { r: v, g: v, b: v }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::gray(0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::gray(1.0)
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// The hadamard product multiplies each component of the two colors, and
    /// yields a new color containing those products. This is how reflected
    /// light is tinted by the surface it bounces off.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        let r = c1.r * c2.r;
        let g = c1.g * c2.g;
        let b = c1.b * c2.b;

        Color { r, g, b }
    }

    /// Relative luminance with Rec. 709 weights, reported per frame by the
    /// headless display.
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl AddAssign<Color> for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

/// Subtracts one color from another.
///
/// Components are subtracted from one another individually.
impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

/// Multiplies a color by a scalar.
///
/// Each component is multiplied by the scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
///
/// Returns a color with each component multiplied by the scalar.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color {
            r: self * other.r,
            g: self * other.g,
            b: self * other.b,
        }
    }
}

/// Divides every component of a color by a scalar.
impl Div<f64> for Color {
    type Output = Color;

    fn div(self, other: f64) -> Self::Output {
        Color {
            r: self.r / other,
            g: self.g / other,
            b: self.b / other,
        }
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `Color::hadamard(&c1, &c2)`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 0.2, g: 0.5, b: 0.5 };

    assert_eq!(c1 - c2, c3);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(c2 / 2.0, c1);
}

#[test]
fn hadamard_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn accumulate_colors() {
    let mut acc = Color::black();
    for _ in 0..4 {
        acc += Color::gray(0.25);
    }

    assert_eq!(acc, Color::white());
}

#[test]
fn luminance_weights_green_most() {
    use crate::feq;

    assert!(feq(Color::white().luminance(), 1.0));
    assert!(feq(Color::rgb(0.0, 1.0, 0.0).luminance(), 0.7152));
    assert!(Color::rgb(0.0, 1.0, 0.0).luminance() > Color::rgb(1.0, 0.0, 0.0).luminance());
}
