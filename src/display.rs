use std::io::{ self, Write };

use log::info;

use crate::canvas::Canvas;
use crate::error::Result;

/// Receives finished frames and says when to stop.
///
/// The render loop asks `quit_requested` only between frames, so a frame that
/// has started is always completed and presented.
pub trait Display {
    /// Shows a completed frame. The canvas is only borrowed for the call.
    fn present(&mut self, canvas: &Canvas) -> Result<()>;

    /// Whether the render loop should stop before starting another frame.
    fn quit_requested(&mut self) -> bool;
}

/// Stops after a fixed number of frames; a limit of 0 never stops.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct FrameLimit {
    limit: u64,
    shown: u64,
}

impl FrameLimit {
    fn reached(&self) -> bool {
        self.limit != 0 && self.shown >= self.limit
    }
}

/// A display with no output surface.
///
/// Logs the mean color of every frame.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    frames: FrameLimit,
}

impl HeadlessDisplay {
    pub fn new(frame_limit: u64) -> HeadlessDisplay {
        HeadlessDisplay { frames: FrameLimit { limit: frame_limit, shown: 0 } }
    }

    /// Number of frames presented so far.
    pub fn frames_shown(&self) -> u64 {
        self.frames.shown
    }
}

impl Display for HeadlessDisplay {
    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.frames.shown += 1;

        let mean = canvas.mean();
        info!("frame {}: {}x{}, mean color ({:.3}, {:.3}, {:.3}), \
            luminance {:.3}", self.frames.shown, canvas.width, canvas.height,
            mean.r, mean.g, mean.b, mean.luminance());

        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.frames.reached()
    }
}

/// Draws frames into a terminal with 24-bit ANSI colors.
///
/// Each character cell shows two pixels stacked vertically using the upper
/// half block glyph, and the frame is box-downsampled to fit `columns`.
pub struct TerminalDisplay<W: Write> {
    out: W,
    columns: usize,
    frames: FrameLimit,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout(columns: usize, frame_limit: u64) -> TerminalDisplay<io::Stdout> {
        TerminalDisplay::new(io::stdout(), columns, frame_limit)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, columns: usize, frame_limit: u64) -> TerminalDisplay<W> {
        TerminalDisplay {
            out,
            columns: columns.max(1),
            frames: FrameLimit { limit: frame_limit, shown: 0 },
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Averages the canvas over a `block` by `block` pixel square and
    /// quantizes the result.
    fn sample(canvas: &Canvas, cx: usize, cy: usize, block: usize) -> [u8; 3] {
        let mut sum = crate::color::Color::black();
        let mut n = 0;

        for y in cy * block..((cy + 1) * block).min(canvas.height) {
            for x in cx * block..((cx + 1) * block).min(canvas.width) {
                if let Some(c) = canvas.read_pixel(x, y) {
                    sum += c;
                    n += 1;
                }
            }
        }

        if n == 0 {
            return [0, 0, 0];
        }

        Canvas::to_rgb8(&(sum / n as f64))
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.frames.shown += 1;

        // Ceiling division so the preview is never wider than `columns`.
        let block = ((canvas.width + self.columns - 1) / self.columns).max(1);
        let cols = (canvas.width + block - 1) / block;
        let rows = (canvas.height + block - 1) / block;

        // Home the cursor so each frame overwrites the previous one.
        write!(self.out, "\x1b[H")?;

        for cy in (0..rows).step_by(2) {
            for cx in 0..cols {
                let [tr, tg, tb] = Self::sample(canvas, cx, cy, block);
                let [br, bg, bb] = Self::sample(canvas, cx, cy + 1, block);
                write!(self.out, "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                    tr, tg, tb, br, bg, bb)?;
            }
            writeln!(self.out, "\x1b[0m")?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.frames.reached()
    }
}

#[test]
fn headless_quits_after_limit() {
    let mut d = HeadlessDisplay::new(2);
    let c = Canvas::new(2, 2);

    assert!(!d.quit_requested());
    d.present(&c).unwrap();
    assert!(!d.quit_requested());
    d.present(&c).unwrap();
    assert!(d.quit_requested());
    assert_eq!(d.frames_shown(), 2);
}

#[test]
fn zero_limit_never_quits() {
    let mut d = HeadlessDisplay::new(0);
    let c = Canvas::new(1, 1);

    for _ in 0..10 {
        d.present(&c).unwrap();
    }
    assert!(!d.quit_requested());
}

#[test]
fn terminal_preview_is_downsampled() {
    use crate::color::Color;

    let mut c = Canvas::new(8, 4);
    for x in 0..8 {
        c.write_pixel(x, 0, &Color::white());
        c.write_pixel(x, 1, &Color::white());
    }

    let mut d = TerminalDisplay::new(Vec::new(), 4, 1);
    d.present(&c).unwrap();
    assert!(d.quit_requested());

    let text = String::from_utf8(d.into_inner()).unwrap();

    // 8x4 pixels in 2x2 blocks: 4 columns, 2 block rows, drawn as 1 text row.
    assert_eq!(text.lines().count(), 1);
    assert_eq!(text.matches('\u{2580}').count(), 4);
    assert!(text.contains("\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m"));
}
