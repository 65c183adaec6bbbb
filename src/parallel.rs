use std::ops::Range;
use std::thread;

use log::trace;

use crate::camera::Viewport;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::{ Error, Result };
use crate::world::{ World, TraceStats };

/// Splits `height` rows into `workers` contiguous bands.
///
/// Band `i` covers `[i * height / workers, (i + 1) * height / workers)`, and
/// the last band always ends at `height`, so leftover rows land in the later
/// bands when `workers` does not divide `height`. With more workers than
/// rows some bands are empty.
pub fn row_bands(height: usize, workers: usize) -> Vec<Range<usize>> {
    (0..workers).map(|i| {
        let start = i * height / workers;
        let end = if i + 1 == workers {
            height
        } else {
            (i + 1) * height / workers
        };

        start..end
    }).collect()
}

/// Verifies that bands cover `[0, height)` exactly once.
pub fn check_partition(bands: &[Range<usize>], height: usize) -> Result<()> {
    let mut covered = vec![0u32; height];

    for band in bands {
        if band.end > height {
            return Err(Error::Partition(format!(
                "band {:?} runs past row {}", band, height
            )));
        }

        for row in band.clone() {
            covered[row] += 1;
        }
    }

    match covered.iter().position(|&n| n != 1) {
        None => Ok(()),
        Some(row) => Err(Error::Partition(format!(
            "row {} is covered {} times", row, covered[row]
        ))),
    }
}

/// Computes the averaged color of one pixel.
///
/// The pixel is sampled on an `oversample` by `oversample` grid at the centers
/// of its sub-cells, and the samples are box filtered. `oversample` must be at
/// least 1; `render_frame` checks this before calling in.
pub fn render_pixel(world: &World, view: &Viewport, x: usize, y: usize,
    oversample: usize, stats: &mut TraceStats) -> Color {
    let step = 1.0 / oversample as f64;
    let mut sum = Color::black();

    for sy in 0..oversample {
        for sx in 0..oversample {
            let px = x as f64 + (sx as f64 + 0.5) * step;
            let py = y as f64 + (sy as f64 + 0.5) * step;
            let ray = view.ray_for(px, py);

            sum += world.trace(ray.origin, ray.direction, 0, stats);
        }
    }

    sum / (oversample * oversample) as f64
}

/// Renders every pixel of one row band into `pixels`.
///
/// `pixels` holds exactly the rows of `rows`, in order.
fn render_band(world: &World, view: &Viewport, rows: Range<usize>,
    pixels: &mut [Color], oversample: usize) -> TraceStats {
    let mut stats = TraceStats::default();
    let width = view.width;
    if width == 0 {
        return stats;
    }

    for (dy, row) in pixels.chunks_mut(width).enumerate() {
        let y = rows.start + dy;
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(world, view, x, y, oversample, &mut stats);
        }
    }

    stats
}

/// Renders one frame of the world as seen by `view` turned by `yaw`.
///
/// One scoped thread is spawned per row band and every thread is joined
/// before this returns, so the canvas is complete (and no longer borrowed)
/// when the caller gets it back. Threads share the world and the viewport
/// read-only and each writes only its own band of the canvas.
pub fn render_frame(world: &World, view: &Viewport, yaw: f64,
    config: &RenderConfig, canvas: &mut Canvas) -> Result<TraceStats> {
    config.validate()?;

    if canvas.width != view.width || canvas.height != view.height {
        return Err(Error::InvalidConfig(format!(
            "canvas is {}x{} but the viewport is {}x{}",
            canvas.width, canvas.height, view.width, view.height
        )));
    }

    let bands = row_bands(canvas.height, config.threads);
    check_partition(&bands, canvas.height)?;

    let view = view.rotate_yaw(yaw);
    let slices = canvas.bands_mut(&bands)?;
    let oversample = config.oversample;

    let results: Vec<thread::Result<TraceStats>> = thread::scope(|s| {
        let view = &view;
        let handles: Vec<_> = bands.iter().cloned().zip(slices)
            .map(|(rows, pixels)| s.spawn(move || {
                trace!("rendering rows {:?}", rows);
                render_band(world, view, rows, pixels, oversample)
            }))
            .collect();

        handles.into_iter().map(|h| h.join()).collect()
    });

    let mut stats = TraceStats::default();
    for result in results {
        match result {
            Ok(band_stats) => stats.merge(&band_stats),
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    Ok(stats)
}

#[test]
fn bands_partition_evenly_divided_height() {
    for &(height, workers) in [(480, 8), (480, 1), (480, 480), (12, 4)].iter() {
        let bands = row_bands(height, workers);

        assert_eq!(bands.len(), workers);
        assert!(check_partition(&bands, height).is_ok());
        assert!(bands.iter().all(|b| b.len() == height / workers));
    }
}

#[test]
fn bands_partition_with_remainder() {
    for &(height, workers) in [(481, 8), (7, 3), (100, 7), (3, 5)].iter() {
        let bands = row_bands(height, workers);

        assert_eq!(bands.len(), workers);
        assert_eq!(bands.last().map(|b| b.end), Some(height));
        assert!(check_partition(&bands, height).is_ok());
    }
}

#[test]
fn check_partition_finds_gaps_and_overlaps() {
    assert!(check_partition(&[0..5, 6..10], 10).is_err());
    assert!(check_partition(&[0..6, 5..10], 10).is_err());
    assert!(check_partition(&[0..5, 5..11], 10).is_err());
    assert!(check_partition(&[0..5, 5..10], 10).is_ok());
}

#[cfg(test)]
fn checker_floor(width: usize, height: usize) -> (World, Viewport) {
    use crate::shape::Shape;
    use crate::pattern::Pattern;
    use crate::tuple::Tuple3D;

    let floor = Shape::plane(Tuple3D::zero(), Tuple3D::new(0.0, 1.0, 0.0))
        .with_pattern(Pattern::checker(Color::white(), Color::black(), 1.0));
    let view = Viewport::new(Tuple3D::new(0.3, 10.0, 0.3),
        Tuple3D::new(0.0, -1.0, 0.0), Tuple3D::new(0.0, 0.0, 1.0),
        width, height);

    (World::new(vec![floor], Vec::new()), view)
}

#[test]
fn frame_matches_single_threaded_render() {
    let (world, view) = checker_floor(16, 13);
    let config = RenderConfig { width: 16, height: 13, threads: 4,
        oversample: 2, ..Default::default() };

    let mut canvas = Canvas::new(16, 13);
    let stats = render_frame(&world, &view, 0.0, &config, &mut canvas)
        .unwrap();

    for y in 0..13 {
        for x in 0..16 {
            let mut s = TraceStats::default();
            let expected = render_pixel(&world, &view, x, y, 2, &mut s);
            assert_eq!(canvas.read_pixel(x, y), Some(expected));
        }
    }

    // Camera ray plus one reflection per sample, 4 samples per pixel.
    assert_eq!(stats.rays, 16 * 13 * 4 * 2);
}

#[test]
fn more_threads_than_rows() {
    let (world, view) = checker_floor(4, 3);
    let config = RenderConfig { width: 4, height: 3, threads: 8,
        oversample: 1, ..Default::default() };

    let mut canvas = Canvas::new(4, 3);
    assert!(render_frame(&world, &view, 0.0, &config, &mut canvas).is_ok());
}

#[test]
fn mismatched_canvas_is_rejected() {
    let (world, view) = checker_floor(4, 3);
    let config = RenderConfig::default();

    let mut canvas = Canvas::new(5, 3);
    assert!(render_frame(&world, &view, 0.0, &config, &mut canvas).is_err());
}

#[test]
fn zero_oversample_is_rejected_before_rendering() {
    let (world, view) = checker_floor(4, 3);
    let config = RenderConfig { width: 4, height: 3, threads: 2,
        oversample: 0, ..Default::default() };

    let mut canvas = Canvas::new(4, 3);
    let result = render_frame(&world, &view, 0.0, &config, &mut canvas);

    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    assert_eq!(canvas, Canvas::new(4, 3));
}

#[test]
fn oversampling_reduces_error_at_checker_edges() {
    let (world, view) = checker_floor(24, 24);

    let render = |oversample: usize| {
        let config = RenderConfig { width: 24, height: 24, threads: 3,
            oversample, ..Default::default() };
        let mut canvas = Canvas::new(24, 24);
        render_frame(&world, &view, 0.0, &config, &mut canvas).unwrap();
        canvas
    };

    let reference = render(16);
    let error = |c: &Canvas| -> f64 {
        c.pixels().iter().zip(reference.pixels().iter())
            .map(|(a, b)| (a.r - b.r).powi(2)).sum::<f64>()
    };

    let single = error(&render(1));
    let quad = error(&render(4));

    assert!(single > 0.0);
    assert!(quad < single);
}
