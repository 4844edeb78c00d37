//! Layout driver.
//!
//! [`draw_page`] lays out one frame of the launcher on a [`Canvas`]: the
//! prompt, the query, then as many result entries as fit, starting from the
//! first result of the current page. It returns how many entries it drew; the
//! renderer feeds that number back into the pager as the realized page size.
//!
//! Entries are stacked downwards in vertical mode and left to right in
//! horizontal mode. Before each entry the cursor advances by the previous
//! extent plus `result_spacing`. The driver stops after `num_results` entries
//! (when non-zero), once the cursor leaves the clip area, or before an
//! unselected entry that would overflow it. The selected entry is always
//! drawn once reached.

use super::canvas::{to_coord, Canvas, Rect};
use super::measure::Measure;
use super::theme::ThemeColors;
use crate::filter::find_ignore_ascii_case;

/// Geometry options for the layout driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Text drawn before the query.
    pub prompt: String,
    /// Maximum entries per page; 0 fits as many as the area allows.
    pub num_results: usize,
    /// Gap between entries, in cells along the layout axis.
    pub result_spacing: usize,
    /// Minimum width reserved for the query.
    pub input_width: usize,
    /// Extra highlight on each side of the selected entry. Negative values
    /// stretch the highlight across the whole clip width.
    pub selection_padding: i32,
    /// Lay entries out left to right instead of top to bottom.
    pub horizontal: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            num_results: 0,
            result_spacing: 0,
            input_width: 0,
            selection_padding: 0,
            horizontal: false,
        }
    }
}

/// What to draw in one frame.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Query text shown in the input field.
    pub input: &'a str,
    /// Entries from the start of the current page to the end of the list.
    pub candidates: &'a [&'a str],
    /// Offset of the highlighted entry within `candidates`.
    pub selection: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Extent {
    width: i32,
    height: i32,
}

/// Draws the prompt, query, and page of results. Returns the number of
/// results drawn.
pub fn draw_page(
    canvas: &mut Canvas,
    measure: &dyn Measure,
    options: &LayoutOptions,
    colors: &ThemeColors,
    view: &PageView<'_>,
) -> usize {
    let _span = tracing::trace_span!(
        "draw_page",
        candidates = view.candidates.len(),
        selection = view.selection
    )
    .entered();

    let mut canvas = canvas.save();

    let prompt_width = canvas.draw_text(0, 0, &options.prompt, colors.prompt, None, measure);
    canvas.translate(prompt_width, 0);

    let input_width = canvas.draw_text(0, 0, view.input, colors.foreground, None, measure);
    let mut extent = Extent {
        width: input_width.max(to_coord(options.input_width)),
        height: 1,
    };

    let spacing = to_coord(options.result_spacing);
    let unbounded = options.num_results == 0;
    let mut drawn = 0;

    loop {
        if !unbounded && drawn >= options.num_results {
            break;
        }

        if options.horizontal {
            canvas.translate(extent.width + spacing, 0);
        } else {
            canvas.translate(0, extent.height + spacing);
        }

        let clip = canvas.clip();
        if !clip.contains(0, 0) {
            break;
        }

        let Some(&text) = view.candidates.get(drawn) else {
            break;
        };

        extent = if drawn == view.selection {
            draw_selected(&mut canvas, measure, options, colors, text, view.input)
        } else {
            let width = to_coord(measure.width(text));
            let overflows = if options.horizontal {
                width > clip.right()
            } else {
                1 > clip.bottom()
            };
            if overflows {
                break;
            }
            let width = canvas.draw_text(0, 0, text, colors.foreground, None, measure);
            Extent { width, height: 1 }
        };

        drawn += 1;
    }

    tracing::trace!(drawn, "page laid out");
    drawn
}

/// Draws the highlighted entry on its own layer, sized to the entry, then
/// composites it over a padded background bar.
fn draw_selected(
    canvas: &mut Canvas,
    measure: &dyn Measure,
    options: &LayoutOptions,
    colors: &ThemeColors,
    text: &str,
    query: &str,
) -> Extent {
    let width = to_coord(measure.width(text));

    let bar = if options.selection_padding < 0 {
        let clip = canvas.clip();
        Rect::new(clip.x, 0, clip.width, 1)
    } else {
        let pad = options.selection_padding;
        Rect::new(-pad, 0, width + 2 * pad, 1)
    };
    canvas.fill_rect(bar, colors.selection_bg);

    let mut layer = Canvas::new(
        usize::try_from(width).unwrap_or(0),
        1,
        colors.selection_bg,
    );

    let highlight = colors
        .selection_match
        .filter(|_| !query.is_empty())
        .zip(find_ignore_ascii_case(text, query));

    match highlight {
        Some((match_color, start)) => {
            let end = start + query.len();
            let mut x = 0;
            for (segment, color) in [
                (&text[..start], colors.selection_fg),
                (&text[start..end], match_color),
                (&text[end..], colors.selection_fg),
            ] {
                x += layer.draw_text(x, 0, segment, color, None, measure);
            }
        }
        None => {
            layer.draw_text(0, 0, text, colors.selection_fg, None, measure);
        }
    }

    canvas.blit(&layer, 0, 0);
    Extent { width, height: 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::measure::{AsciiMeasure, UnicodeMeasure};
    use crate::ui::theme::Theme;

    fn colors() -> ThemeColors {
        Theme::default().colors
    }

    fn canvas(width: usize, height: usize) -> Canvas {
        Canvas::new(width, height, colors().background)
    }

    fn entries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("entry{i}")).collect()
    }

    fn draw(
        canvas: &mut Canvas,
        options: &LayoutOptions,
        input: &str,
        candidates: &[&str],
        selection: usize,
    ) -> usize {
        let view = PageView {
            input,
            candidates,
            selection,
        };
        draw_page(canvas, &UnicodeMeasure, options, &colors(), &view)
    }

    #[test]
    fn unbounded_vertical_fills_clip_height() {
        let items = entries(10);
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let mut canvas = canvas(20, 5);

        let drawn = draw(&mut canvas, &LayoutOptions::default(), "", &refs, 0);
        assert_eq!(drawn, 4);
        assert_eq!(canvas.row_text(4).trim_end(), "entry3");
    }

    #[test]
    fn bounded_mode_stops_at_num_results() {
        let items = entries(10);
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let options = LayoutOptions {
            num_results: 3,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(20, 20);
        assert_eq!(draw(&mut canvas, &options, "", &refs, 0), 3);
    }

    #[test]
    fn bounded_mode_still_stops_at_clip_edge() {
        let items = entries(10);
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let options = LayoutOptions {
            num_results: 10,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(20, 5);
        assert_eq!(draw(&mut canvas, &options, "", &refs, 0), 4);
    }

    #[test]
    fn short_lists_draw_everything() {
        let mut canvas = canvas(20, 20);
        assert_eq!(draw(&mut canvas, &LayoutOptions::default(), "", &["a", "b"], 0), 2);
        assert_eq!(draw(&mut canvas, &LayoutOptions::default(), "", &[], 0), 0);
    }

    #[test]
    fn spacing_reduces_page_size() {
        let items = entries(10);
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let options = LayoutOptions {
            result_spacing: 1,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(20, 7);
        // Entries land on rows 2, 4 and 6.
        assert_eq!(draw(&mut canvas, &options, "", &refs, 0), 3);
    }

    #[test]
    fn results_align_after_prompt() {
        let options = LayoutOptions {
            prompt: "run: ".into(),
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(20, 3);
        draw(&mut canvas, &options, "vi", &["vim", "view"], 1);
        assert_eq!(canvas.row_text(0).trim_end(), "run: vi");
        assert_eq!(canvas.row_text(1).trim_end(), "     vim");
        assert_eq!(canvas.row_text(2).trim_end(), "     view");
    }

    #[test]
    fn horizontal_stops_before_overflowing_entry() {
        let options = LayoutOptions {
            horizontal: true,
            result_spacing: 1,
            input_width: 3,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(12, 1);
        // Input occupies 0..3, "aa" 4..6, "bb" 7..9, "cccc" would end at 14.
        let drawn = draw(&mut canvas, &options, "", &["aa", "bb", "cccc"], 0);
        assert_eq!(drawn, 2);
        assert_eq!(canvas.row_text(0), "    aa bb   ");
    }

    #[test]
    fn selected_entry_is_drawn_even_if_it_overflows() {
        let options = LayoutOptions {
            horizontal: true,
            result_spacing: 1,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(6, 1);
        let drawn = draw(&mut canvas, &options, "", &["a", "toolong", "b"], 1);
        assert_eq!(drawn, 2);
    }

    #[test]
    fn selection_background_covers_padded_extent() {
        let theme = colors();
        let options = LayoutOptions {
            selection_padding: 1,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(10, 3);
        canvas.translate(1, 0);
        draw(&mut canvas, &options, "", &["ab", "cd"], 0);

        let bg = |x| canvas.cell(x, 1).unwrap().bg;
        assert_eq!(bg(0), theme.selection_bg);
        assert_eq!(bg(3), theme.selection_bg);
        assert_eq!(bg(4), theme.background);
        assert_eq!(canvas.cell(1, 2).unwrap().bg, theme.background);
    }

    #[test]
    fn negative_padding_spans_clip_width() {
        let theme = colors();
        let options = LayoutOptions {
            prompt: "> ".into(),
            selection_padding: -1,
            ..LayoutOptions::default()
        };
        let mut canvas = canvas(8, 2);
        draw(&mut canvas, &options, "", &["x"], 0);
        for x in 0..8 {
            assert_eq!(canvas.cell(x, 1).unwrap().bg, theme.selection_bg);
        }
    }

    #[test]
    fn query_match_is_highlighted_in_selected_entry() {
        let theme = colors();
        let Some(match_color) = theme.selection_match else {
            panic!("default theme has a match color");
        };
        let mut canvas = canvas(12, 2);
        draw(&mut canvas, &LayoutOptions::default(), "FIRE", &["Firefox"], 0);

        let fg = |x| canvas.cell(x, 1).unwrap().fg;
        assert_eq!(canvas.row_text(1).trim_end(), "Firefox");
        assert_eq!(fg(0), match_color);
        assert_eq!(fg(3), match_color);
        assert_eq!(fg(4), theme.selection_fg);
    }

    #[test]
    fn no_match_color_draws_single_segment() {
        let mut theme = colors();
        theme.selection_match = None;
        let mut canvas = canvas(10, 2);
        let view = PageView {
            input: "b",
            candidates: &["abc"],
            selection: 0,
        };
        draw_page(&mut canvas, &AsciiMeasure, &LayoutOptions::default(), &theme, &view);
        for x in 0..3 {
            assert_eq!(canvas.cell(x, 1).unwrap().fg, theme.selection_fg);
        }
    }

    #[test]
    fn canvas_state_is_restored_after_layout() {
        let mut canvas = canvas(10, 2);
        let before = canvas.clip();
        draw(&mut canvas, &LayoutOptions::default(), "q", &["a", "b", "c"], 0);
        assert_eq!(canvas.clip(), before);
    }
}
