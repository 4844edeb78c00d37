//! Paging and selection over a result list with variable-size pages.
//!
//! The number of results that fit on screen is only known after layout, so
//! [`Pager`] never assumes a page size. The renderer reports the realized page
//! size through [`Pager::record_page_size`], and navigation strides by whatever
//! was last reported.
//!
//! # State
//!
//! - `first_result`: index of the first result on the current page
//! - `selection`: offset of the highlighted result within the page
//! - `num_results_drawn`: size of the page most recently rendered
//! - `last_num_results_drawn`: size of the page left behind by the most recent
//!   forward page turn
//!
//! # Backward paging
//!
//! Only one previous page size is remembered. Paging back across more than one
//! boundary reuses that single value, so when consecutive pages had different
//! sizes the page start and highlight can land off by the size difference.
//! This is accepted: keeping a full history of page sizes would not survive
//! re-layout anyway.

/// Pagination cursor and selection over a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    first_result: usize,
    selection: usize,
    num_results_drawn: usize,
    last_num_results_drawn: usize,
}

impl Pager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            first_result: 0,
            selection: 0,
            num_results_drawn: 0,
            last_num_results_drawn: 0,
        }
    }

    #[must_use]
    pub const fn first_result(&self) -> usize {
        self.first_result
    }

    #[must_use]
    pub const fn selection(&self) -> usize {
        self.selection
    }

    #[must_use]
    pub const fn num_results_drawn(&self) -> usize {
        self.num_results_drawn
    }

    #[must_use]
    pub const fn last_num_results_drawn(&self) -> usize {
        self.last_num_results_drawn
    }

    /// Absolute rank of the highlighted result.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.first_result + self.selection
    }

    /// Number of selectable slots on the current page; never zero.
    #[must_use]
    pub fn selectable(&self, count: usize) -> usize {
        self.num_results_drawn.min(count).max(1)
    }

    /// Moves back to the first result of the first page.
    pub fn reset(&mut self) {
        self.selection = 0;
        self.first_result = 0;
    }

    /// Highlights the next result, turning to the next page (and wrapping to
    /// the start of the list) when the current page is exhausted.
    pub fn select_next(&mut self, count: usize) {
        let drawn = self.selectable(count);

        self.selection += 1;
        if self.selection >= drawn {
            self.selection -= drawn;
            self.first_result = if count > 0 {
                (self.first_result + drawn) % count
            } else {
                0
            };
            self.last_num_results_drawn = self.num_results_drawn;
            tracing::trace!(first_result = self.first_result, "turned to next page");
        }
    }

    /// Highlights the previous result, turning back a page when at the top of
    /// the current one. A no-op on the very first result.
    pub fn select_previous(&mut self, count: usize) {
        if self.selection > 0 {
            self.selection -= 1;
            return;
        }

        let drawn = self.selectable(count);

        if self.first_result > drawn {
            // Nothing was drawn on the page we came from; step back by the
            // current page size instead.
            let back = match self.last_num_results_drawn {
                0 => drawn,
                n => n,
            };
            self.first_result = self.first_result.saturating_sub(back);
            self.selection = back - 1;
            tracing::trace!(first_result = self.first_result, "turned to previous page");
        } else if self.first_result > 0 {
            self.selection = self.first_result - 1;
            self.first_result = 0;
        }
    }

    /// Stores the number of results the last render pass fit on the page.
    ///
    /// If the page shrank below the highlight (for example after a resize),
    /// the highlight moves to the last result still on the page.
    pub fn record_page_size(&mut self, drawn: usize) {
        self.num_results_drawn = drawn;
        if drawn > 0 && self.selection >= drawn {
            self.selection = drawn - 1;
        }
    }
}
