//! The search session.
//!
//! [`Session`] owns everything a single launcher invocation needs: the query,
//! the corpus, the current result list, and the pager. It applies
//! [`Command`]s to that state and exposes the page the renderer should draw.
//!
//! # Result list lifecycle
//!
//! Every query edit rebuilds the result list through the filter and installs it
//! with [`Session::replace_results`], which moves the new list in and drops the
//! old one in the same step, then resets the pager. Appending a character
//! narrows the current results; every other edit filters the whole corpus.
//!
//! # Outcome
//!
//! [`Command::Close`] and [`Command::Submit`] set terminal flags. Once either is
//! set the session ignores further commands.
//!
//! # Example
//!
//! ```rust
//! use zofi::app::{Command, LaunchMode, Session};
//! use zofi::domain::Corpus;
//!
//! let corpus = Corpus::Commands(vec!["abc".into(), "xab".into(), "zzz".into()]);
//! let mut session = Session::with_corpus(LaunchMode::Run, corpus, false);
//!
//! session.apply(Command::Insert('a'));
//! session.apply(Command::Insert('b'));
//! assert_eq!(session.page().collect::<Vec<_>>(), vec!["abc", "xab"]);
//! ```

use super::keymap::Command;
use super::modes::LaunchMode;
use super::pager::Pager;
use super::query::Query;
use crate::domain::{Corpus, EntryRef, Result, ZofiError};
use crate::filter::{self, ResultList};

/// State of one launcher session.
#[derive(Debug, Clone)]
pub struct Session {
    mode: LaunchMode,
    fuzzy: bool,
    query: Query,
    corpus: Corpus,
    results: ResultList,
    pager: Pager,
    closed: bool,
    submitted: bool,
}

impl Session {
    /// Creates a session with an empty corpus of the kind `mode` searches.
    #[must_use]
    pub fn new(mode: LaunchMode, fuzzy: bool) -> Self {
        Self::with_corpus(mode, mode.empty_corpus(), fuzzy)
    }

    /// Creates a session over an already loaded corpus.
    #[must_use]
    pub fn with_corpus(mode: LaunchMode, corpus: Corpus, fuzzy: bool) -> Self {
        let results = ResultList::unfiltered(corpus.len());
        Self {
            mode,
            fuzzy,
            query: Query::new(),
            corpus,
            results,
            pager: Pager::new(),
            closed: false,
            submitted: false,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> LaunchMode {
        self.mode
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub const fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub const fn results(&self) -> &ResultList {
        &self.results
    }

    #[must_use]
    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Whether the user aborted the session.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the user accepted the highlighted result.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Whether the session has reached either terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.closed || self.submitted
    }

    /// Replaces the corpus and re-runs the current query against it.
    ///
    /// # Errors
    ///
    /// Returns [`ZofiError::Config`] if the corpus kind does not match the
    /// session's launch mode.
    pub fn install_corpus(&mut self, corpus: Corpus) -> Result<()> {
        if std::mem::discriminant(&corpus) != std::mem::discriminant(&self.corpus) {
            return Err(ZofiError::Config(format!(
                "{:?} mode cannot search this kind of corpus",
                self.mode
            )));
        }
        tracing::debug!(entries = corpus.len(), "corpus installed");
        self.corpus = corpus;
        self.refilter();
        Ok(())
    }

    /// Appends plain entries to a command corpus and re-runs the query.
    ///
    /// # Errors
    ///
    /// Returns [`ZofiError::Config`] if the session searches applications.
    pub fn extend_commands<I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let Corpus::Commands(items) = &mut self.corpus else {
            return Err(ZofiError::Config(
                "cannot append plain lines to an application corpus".to_string(),
            ));
        };
        items.extend(lines);
        tracing::debug!(entries = items.len(), "corpus extended");
        self.refilter();
        Ok(())
    }

    /// Applies one command. Returns `true` if anything visible may have
    /// changed.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.is_finished() {
            return false;
        }

        let count = self.results.len();
        match command {
            Command::Insert(ch) => {
                if !self.query.insert(ch) {
                    return false;
                }
                let narrowed =
                    filter::refine(&self.corpus, &self.results, self.query.as_bytes(), self.fuzzy);
                self.replace_results(narrowed);
            }
            Command::DeleteLast => {
                if !self.query.delete_last() {
                    return false;
                }
                self.refilter();
            }
            Command::DeleteWord => {
                if !self.query.delete_word() {
                    return false;
                }
                self.refilter();
            }
            Command::Clear => {
                self.query.clear();
                self.refilter();
            }
            Command::SelectNext => self.pager.select_next(count),
            Command::SelectPrevious => self.pager.select_previous(count),
            Command::Reset => self.pager.reset(),
            Command::Close => {
                self.closed = true;
                return false;
            }
            Command::Submit => {
                self.submitted = true;
                return false;
            }
        }
        true
    }

    /// Filters the whole corpus with the current query.
    fn refilter(&mut self) {
        let results = filter::filter(&self.corpus, self.query.as_bytes(), self.fuzzy);
        self.replace_results(results);
    }

    /// Installs a new result list, releasing the previous one, and resets the
    /// pager.
    pub fn replace_results(&mut self, results: ResultList) {
        let previous = std::mem::replace(&mut self.results, results);
        drop(previous);
        self.pager.reset();
    }

    /// Stores how many results the renderer fit on the current page.
    pub fn record_page_size(&mut self, drawn: usize) {
        self.pager.record_page_size(drawn);
    }

    /// Display strings of the results from the start of the current page to
    /// the end of the list.
    pub fn page(&self) -> impl Iterator<Item = &str> + '_ {
        self.results
            .indices()
            .get(self.pager.first_result()..)
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.corpus.display(i))
    }

    /// The highlighted result, if the result list is not empty.
    #[must_use]
    pub fn selected(&self) -> Option<EntryRef<'_>> {
        self.results
            .get(self.pager.selected_index())
            .and_then(|i| self.corpus.entry(i))
    }
}
