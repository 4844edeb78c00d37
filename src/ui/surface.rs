//! Double-buffered render target.
//!
//! [`Surface`] keeps two [`Canvas`] buffers and alternates between them on every
//! frame. A buffer being reused still holds the frame from two passes ago, so
//! before it is handed out again the areas listed in its damage list are
//! repainted with the background. Only what was actually drawn is cleared.

use std::fmt::Write;

use super::canvas::Canvas;
use super::theme::{Color, Theme};

/// Two alternating canvases of the same size.
#[derive(Debug, Clone)]
pub struct Surface {
    buffers: [Canvas; 2],
    current: usize,
    background: Color,
    width: usize,
    height: usize,
}

impl Surface {
    #[must_use]
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            buffers: [
                Canvas::new(width, height, background),
                Canvas::new(width, height, background),
            ],
            current: 0,
            background,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Index of the buffer holding the most recent frame.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Reallocates both buffers if the size changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        tracing::debug!(width, height, "surface resized");
        *self = Self::new(width, height, self.background);
    }

    /// Switches to the other buffer, clears its damage, and returns it for
    /// drawing.
    pub fn begin_frame(&mut self) -> &mut Canvas {
        self.current ^= 1;
        let buffer = &mut self.buffers[self.current];
        buffer.repair(self.background);
        buffer
    }

    /// The buffer holding the most recent frame.
    #[must_use]
    pub fn front(&self) -> &Canvas {
        &self.buffers[self.current]
    }

    /// Encodes the most recent frame as ANSI text, one line per row.
    #[must_use]
    pub fn present(&self) -> String {
        let canvas = self.front();
        let mut out = String::new();

        for y in 0..canvas.height() {
            if y > 0 {
                out.push('\n');
            }
            let mut pen: Option<(Color, Color)> = None;
            for x in 0..canvas.width() {
                let Some(cell) = canvas.cell(x, y) else {
                    continue;
                };
                if cell.is_wide_tail() {
                    continue;
                }
                if pen != Some((cell.fg, cell.bg)) {
                    let _ = write!(out, "{}{}", cell.fg.fg(), cell.bg.bg());
                    pen = Some((cell.fg, cell.bg));
                }
                out.push(cell.ch);
            }
            out.push_str(Theme::reset());
        }

        out
    }
}
