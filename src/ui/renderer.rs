//! Top-level rendering coordinator.
//!
//! [`Renderer`] owns the double-buffered [`Surface`], the measurement backend
//! and the layout options. Each call to [`Renderer::render`]:
//!
//! 1. resizes the surface to the pane if needed and starts a frame
//! 2. draws the border and clips to the interior
//! 3. runs the layout driver over the current page of the session
//! 4. writes the realized page size back into the session
//! 5. returns the frame as ANSI text for the plugin to print
//!
//! # Example
//!
//! ```rust
//! use zofi::app::{LaunchMode, Session};
//! use zofi::domain::Corpus;
//! use zofi::ui::{LayoutOptions, MeasureKind, Renderer, Theme};
//!
//! let corpus = Corpus::Commands((0..10).map(|i| format!("cmd{i}")).collect());
//! let mut session = Session::with_corpus(LaunchMode::Run, corpus, false);
//! let mut renderer = Renderer::new(
//!     LayoutOptions::default(),
//!     Theme::default(),
//!     MeasureKind::Unicode.backend(),
//!     false,
//!     0,
//! );
//!
//! let frame = renderer.render(&mut session, 5, 20);
//! assert_eq!(frame.lines().count(), 5);
//! assert_eq!(session.pager().num_results_drawn(), 4);
//! ```

use super::canvas::{to_coord, Canvas, Rect};
use super::layout::{self, LayoutOptions, PageView};
use super::measure::Measure;
use super::surface::Surface;
use super::theme::Theme;
use crate::app::Session;
use crate::Config;

/// Draws sessions into a pane.
pub struct Renderer {
    surface: Surface,
    measure: Box<dyn Measure>,
    options: LayoutOptions,
    theme: Theme,
    border: bool,
    padding: usize,
}

impl Renderer {
    #[must_use]
    pub fn new(
        options: LayoutOptions,
        theme: Theme,
        measure: Box<dyn Measure>,
        border: bool,
        padding: usize,
    ) -> Self {
        tracing::debug!(
            measure = measure.name(),
            theme = %theme.name,
            border,
            padding,
            "renderer created"
        );
        Self {
            surface: Surface::new(0, 0, theme.colors.background),
            measure,
            options,
            theme,
            border,
            padding,
        }
    }

    /// Builds a renderer from plugin configuration.
    #[must_use]
    pub fn from_config(config: &Config, theme: Theme) -> Self {
        Self::new(
            config.layout_options(),
            theme,
            config.measure.backend(),
            config.border,
            config.padding,
        )
    }

    /// Renders `session` into a `rows` x `cols` frame and records how many
    /// results fit on the page.
    pub fn render(&mut self, session: &mut Session, rows: usize, cols: usize) -> String {
        self.surface.resize(cols, rows);

        let drawn = {
            let page: Vec<&str> = session.page().collect();
            let view = PageView {
                input: session.query().as_str(),
                candidates: &page,
                selection: session.pager().selection(),
            };

            let canvas = self.surface.begin_frame();
            let inset = to_coord(self.padding) + i32::from(self.border);
            if self.border {
                draw_border(canvas, &self.theme, self.measure.as_ref());
            }

            let mut interior = canvas.save();
            interior.translate(inset, inset);
            interior.clip_to(Rect::new(
                0,
                0,
                (to_coord(cols) - 2 * inset).max(0),
                (to_coord(rows) - 2 * inset).max(0),
            ));
            layout::draw_page(
                &mut interior,
                self.measure.as_ref(),
                &self.options,
                &self.theme.colors,
                &view,
            )
        };

        session.record_page_size(drawn);
        tracing::trace!(rows, cols, drawn, "frame rendered");
        self.surface.present()
    }
}

/// Draws a single-line box along the edges of the canvas.
fn draw_border(canvas: &mut Canvas, theme: &Theme, measure: &dyn Measure) {
    let (width, height) = (canvas.width(), canvas.height());
    if width < 2 || height < 2 {
        return;
    }

    let color = theme.colors.border;
    let inner = usize::try_from(width - 2).unwrap_or(0);
    let horizontal = "─".repeat(inner);

    canvas.draw_text(0, 0, &format!("┌{horizontal}┐"), color, None, measure);
    for y in 1..height - 1 {
        canvas.draw_text(0, y, "│", color, None, measure);
        canvas.draw_text(width - 1, y, "│", color, None, measure);
    }
    canvas.draw_text(0, height - 1, &format!("└{horizontal}┘"), color, None, measure);
}
