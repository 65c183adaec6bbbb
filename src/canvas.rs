use std::ops::Range;

use crate::color::Color;
use crate::error::{ Error, Result };

/// A canvas for drawing pixels.
///
/// This structure stores the results of the ray tracer for one frame. Each
/// frame gets its own canvas; render threads write disjoint row bands of it
/// (see `bands_mut`), and once every thread has finished it is handed to the
/// display read-only.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector in row order.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orbit_tracer::color::Color;
    /// # use orbit_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// All pixels in row order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Splits the canvas into one mutable slice per row band.
    ///
    /// The bands must be contiguous, in order, start at row 0 and end at the
    /// last row; anything else is reported as `Error::Partition`. Since the
    /// slices come from repeated `split_at_mut`, no two of them can alias.
    pub fn bands_mut(&mut self, bands: &[Range<usize>])
        -> Result<Vec<&mut [Color]>> {
        let mut next_row = 0;
        let mut rest: &mut [Color] = &mut self.pixels;
        let mut slices = Vec::with_capacity(bands.len());

        for band in bands {
            if band.start != next_row || band.end < band.start {
                return Err(Error::Partition(format!(
                    "band {:?} does not start at row {}", band, next_row
                )));
            }

            if band.end > self.height {
                return Err(Error::Partition(format!(
                    "band {:?} runs past the last row {}", band, self.height
                )));
            }

            let (head, tail) = std::mem::take(&mut rest)
                .split_at_mut(band.len() * self.width);
            slices.push(head);
            rest = tail;
            next_row = band.end;
        }

        if next_row != self.height {
            return Err(Error::Partition(format!(
                "bands end at row {} but the canvas has {} rows",
                next_row, self.height
            )));
        }

        Ok(slices)
    }

    /// Mean color over the whole canvas.
    pub fn mean(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::black();
        }

        let mut sum = Color::black();
        for p in self.pixels.iter() {
            sum += *p;
        }

        sum / self.pixels.len() as f64
    }

    /// Quantizes a color to 8-bit channels.
    ///
    /// Each channel is scaled to 0-255, clamped, and truncated.
    pub fn to_rgb8(color: &Color) -> [u8; 3] {
        let q = |c: f64| (255.0 * c).clamp(0.0, 255.0) as u8;
        [q(color.r), q(color.g), q(color.b)]
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.pixels().len(), 200);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn out_of_bounds_pixels_are_ignored() {
    let mut c = Canvas::new(4, 4);
    c.write_pixel(4, 0, &Color::white());

    assert_eq!(c.read_pixel(4, 0), None);
    assert_eq!(c.mean(), Color::black());
}

#[test]
fn bands_cover_their_rows() {
    let mut c = Canvas::new(3, 4);
    {
        let mut bands = c.bands_mut(&[0..1, 1..3, 3..4]).unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].len(), 3);
        assert_eq!(bands[1].len(), 6);
        assert_eq!(bands[2].len(), 3);

        bands[1][3] = Color::white();
    }

    // Row 2, column 0 is the fourth pixel of the second band.
    assert_eq!(c.read_pixel(0, 2), Some(Color::white()));
}

#[test]
fn overlapping_bands_are_rejected() {
    let mut c = Canvas::new(3, 4);

    assert!(c.bands_mut(&[0..2, 1..4]).is_err());
}

#[test]
fn short_bands_are_rejected() {
    let mut c = Canvas::new(3, 4);

    assert!(c.bands_mut(&[0..2, 2..3]).is_err());
}

#[test]
fn quantize_clamps_out_of_range() {
    assert_eq!(Canvas::to_rgb8(&Color::rgb(-0.5, 0.5, 2.0)), [0, 127, 255]);
    assert_eq!(Canvas::to_rgb8(&Color::white()), [255, 255, 255]);
}
