//! Cell-grid drawing target.
//!
//! A [`Canvas`] is a fixed-size grid of colored character cells with a drawing
//! state made of an origin and a clip rectangle. All drawing coordinates are
//! relative to the origin, and nothing is ever written outside the clip.
//!
//! Drawing state is saved and restored with [`Canvas::save`], which returns a
//! guard that puts the previous origin and clip back when it goes out of scope.
//! Early returns and `break`s out of a layout loop therefore cannot leave the
//! canvas translated.
//!
//! Every drawing call records the area it touched in a damage list so the
//! owning [`Surface`](super::Surface) can clear exactly that area before the
//! buffer is reused.

use std::ops::{Deref, DerefMut};

use super::measure::Measure;
use super::theme::Color;

/// Marks the second cell of a double-width glyph.
const WIDE_TAIL: char = '\0';

/// An axis-aligned rectangle in cell units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The overlap of two rectangles; empty if they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }

    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    /// Whether this cell is covered by the glyph in the cell to its left.
    #[must_use]
    pub const fn is_wide_tail(&self) -> bool {
        self.ch == WIDE_TAIL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DrawState {
    origin_x: i32,
    origin_y: i32,
    clip: Rect,
}

/// A grid of cells plus drawing state.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    state: DrawState,
    damage: Vec<Rect>,
}

/// Converts a cell count to a coordinate, saturating on absurd sizes.
pub(crate) fn to_coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl Canvas {
    /// A canvas filled with blank cells in `background`.
    #[must_use]
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let (w, h) = (to_coord(width), to_coord(height));
        let blank = Cell {
            ch: ' ',
            fg: background,
            bg: background,
        };
        Self {
            width: w,
            height: h,
            cells: vec![blank; width.saturating_mul(height)],
            state: DrawState {
                origin_x: 0,
                origin_y: 0,
                clip: Rect::new(0, 0, w, h),
            },
            damage: Vec::new(),
        }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The clip rectangle in coordinates relative to the current origin.
    #[must_use]
    pub const fn clip(&self) -> Rect {
        self.state
            .clip
            .translate(-self.state.origin_x, -self.state.origin_y)
    }

    /// Moves the origin.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.state.origin_x += dx;
        self.state.origin_y += dy;
    }

    /// Narrows the clip to `rect`, given relative to the current origin.
    pub fn clip_to(&mut self, rect: Rect) {
        let absolute = rect.translate(self.state.origin_x, self.state.origin_y);
        self.state.clip = self.state.clip.intersect(&absolute);
    }

    /// Saves the origin and clip; they are restored when the guard drops.
    pub fn save(&mut self) -> Saved<'_> {
        let state = self.state;
        Saved {
            canvas: self,
            state,
        }
    }

    /// The cell at absolute position `(x, y)`.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// The characters of absolute row `y`, without wide-glyph tails.
    #[must_use]
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .filter(|cell| !cell.is_wide_tail())
            .map(|cell| cell.ch)
            .collect()
    }

    /// Areas drawn since the buffer was last repaired.
    #[must_use]
    pub fn damage(&self) -> &[Rect] {
        &self.damage
    }

    /// Fills `rect` (relative to the origin) with blank cells in `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let area = rect
            .translate(self.state.origin_x, self.state.origin_y)
            .intersect(&self.state.clip);
        if area.is_empty() {
            return;
        }
        self.paint(area, color);
        self.damage.push(area);
    }

    /// Writes `text` starting at `(x, y)` relative to the origin.
    ///
    /// Cells keep their background unless `bg` is given. Returns the measured
    /// width of the whole string, including any part that was clipped.
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        fg: Color,
        bg: Option<Color>,
        measure: &dyn Measure,
    ) -> i32 {
        let (ax, ay) = (x + self.state.origin_x, y + self.state.origin_y);
        let clip = self.state.clip;
        let mut col = ax;

        for ch in text.chars() {
            let w = to_coord(measure.char_width(ch));
            if w == 0 {
                continue;
            }
            if clip.contains(col, ay) && clip.contains(col + w - 1, ay) {
                self.put(col, ay, ch, fg, bg);
                for tail in 1..w {
                    self.put(col + tail, ay, WIDE_TAIL, fg, bg);
                }
            }
            col += w;
        }

        let width = col - ax;
        let touched = Rect::new(ax, ay, width, 1).intersect(&clip);
        if !touched.is_empty() {
            self.damage.push(touched);
        }
        width
    }

    /// Copies every cell of `layer` onto this canvas with its top-left corner
    /// at `(x, y)` relative to the origin.
    pub fn blit(&mut self, layer: &Self, x: i32, y: i32) {
        let (ax, ay) = (x + self.state.origin_x, y + self.state.origin_y);
        let area = Rect::new(ax, ay, layer.width, layer.height).intersect(&self.state.clip);
        if area.is_empty() {
            return;
        }
        for row in area.y..area.bottom() {
            for col in area.x..area.right() {
                if let (Some(src), Some(dst)) =
                    (layer.index(col - ax, row - ay), self.index(col, row))
                {
                    self.cells[dst] = layer.cells[src];
                }
            }
        }
        self.damage.push(area);
    }

    /// Repaints every damaged area with `background` and forgets the damage.
    pub fn repair(&mut self, background: Color) {
        for area in std::mem::take(&mut self.damage) {
            self.paint(area, background);
        }
    }

    fn paint(&mut self, area: Rect, color: Color) {
        for row in area.y..area.bottom() {
            for col in area.x..area.right() {
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = Cell {
                        ch: ' ',
                        fg: color,
                        bg: color,
                    };
                }
            }
        }
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Option<Color>) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
            if let Some(bg) = bg {
                cell.bg = bg;
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        usize::try_from(y * self.width + x).ok()
    }
}

/// Guard returned by [`Canvas::save`].
pub struct Saved<'a> {
    canvas: &'a mut Canvas,
    state: DrawState,
}

impl Deref for Saved<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for Saved<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for Saved<'_> {
    fn drop(&mut self) {
        self.canvas.state = self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::measure::UnicodeMeasure;

    const BG: Color = Color::rgb(0, 0, 0);
    const FG: Color = Color::rgb(255, 255, 255);

    #[test]
    fn save_guard_restores_origin_and_clip() {
        let mut canvas = Canvas::new(10, 4, BG);
        {
            let mut saved = canvas.save();
            saved.translate(2, 1);
            saved.clip_to(Rect::new(0, 0, 3, 1));
            assert_eq!(saved.clip(), Rect::new(0, 0, 3, 1));
        }
        assert_eq!(canvas.clip(), Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn text_is_clipped_and_measured_in_full() {
        let mut canvas = Canvas::new(10, 2, BG);
        canvas.clip_to(Rect::new(0, 0, 4, 2));
        let width = canvas.draw_text(1, 0, "hello", FG, None, &UnicodeMeasure);
        assert_eq!(width, 5);
        assert_eq!(canvas.row_text(0), " hel      ");
        assert_eq!(canvas.damage(), &[Rect::new(1, 0, 3, 1)]);
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut canvas = Canvas::new(6, 1, BG);
        let width = canvas.draw_text(0, 0, "日a", FG, None, &UnicodeMeasure);
        assert_eq!(width, 3);
        assert!(canvas.cell(1, 0).unwrap().is_wide_tail());
        assert_eq!(canvas.row_text(0), "日a   ");
    }

    #[test]
    fn repair_clears_damaged_cells() {
        let mut canvas = Canvas::new(5, 1, BG);
        canvas.fill_rect(Rect::new(1, 0, 2, 1), FG);
        canvas.draw_text(3, 0, "x", FG, Some(FG), &UnicodeMeasure);
        assert_eq!(canvas.damage().len(), 2);

        canvas.repair(BG);
        assert!(canvas.damage().is_empty());
        assert_eq!(canvas.cell(1, 0).unwrap().bg, BG);
        assert_eq!(canvas.row_text(0), "     ");
    }

    #[test]
    fn blit_copies_layer_at_origin() {
        let mut layer = Canvas::new(2, 1, FG);
        layer.draw_text(0, 0, "ok", BG, None, &UnicodeMeasure);

        let mut canvas = Canvas::new(5, 2, BG);
        canvas.translate(1, 1);
        canvas.blit(&layer, 0, 0);
        assert_eq!(canvas.row_text(1), " ok  ");
        assert_eq!(canvas.cell(1, 1).unwrap().bg, FG);
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 5, 5);
        assert_eq!(a.intersect(&Rect::new(3, 3, 5, 5)), Rect::new(3, 3, 2, 2));
        assert!(a.intersect(&Rect::new(6, 0, 1, 1)).is_empty());
    }
}
