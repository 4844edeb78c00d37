//! Event handling.
//!
//! [`handle_event`] is the single entry point through which the plugin shim
//! drives a [`Session`]. Each event mutates the session and returns whether the
//! launcher needs a redraw plus the [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Input**: [`Event::Key`], classified through the keymap
//! - **Corpus**: [`Event::CommandsScanned`], [`Event::CorpusLoaded`] and
//!   [`Event::Piped`] install or extend the searchable entries
//! - **Failures**: [`Event::ScanFailed`] is logged and otherwise ignored
//!
//! # Example
//!
//! ```rust
//! use zofi::app::{handle_event, Action, Event, KeyEvent, KeySym, LaunchMode, Session};
//!
//! let mut session = Session::new(LaunchMode::Dmenu, false);
//! handle_event(&mut session, &Event::Piped { lines: vec!["yes".into(), "no".into()] })?;
//!
//! let (render, actions) = handle_event(&mut session, &Event::Key(KeyEvent::new(KeySym::Enter)))?;
//! assert!(!render);
//! assert_eq!(actions, vec![Action::Emit { line: "yes".into() }]);
//! # Ok::<(), zofi::domain::ZofiError>(())
//! ```

use super::keymap::{classify, Command, KeyEvent};
use super::modes::LaunchMode;
use super::{Action, Session};
use crate::domain::{Corpus, Result, ZofiError};
use crate::infrastructure::catalog;

/// Input to the session from the user or the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),

    /// Output of the `$PATH` scan: one executable path per entry.
    CommandsScanned {
        paths: Vec<String>,
    },

    /// The `$PATH` scan could not run or exited with an error.
    ScanFailed {
        error: String,
    },

    /// A complete corpus loaded from disk, such as the application catalog.
    CorpusLoaded(Corpus),

    /// Lines received over a CLI pipe.
    Piped {
        lines: Vec<String>,
    },
}

impl Event {
    /// Variant name, for logging without the payload.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Key(_) => "Key",
            Self::CommandsScanned { .. } => "CommandsScanned",
            Self::ScanFailed { .. } => "ScanFailed",
            Self::CorpusLoaded(_) => "CorpusLoaded",
            Self::Piped { .. } => "Piped",
        }
    }
}

/// Processes an event and returns `(needs_render, actions)`.
///
/// # Errors
///
/// Returns [`ZofiError::Config`] if a corpus of the wrong kind arrives for the
/// session's mode, and [`ZofiError::Launch`] if the accepted entry has nothing
/// to run.
pub fn handle_event(session: &mut Session, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::Key(key) => handle_key(session, key),
        Event::CommandsScanned { paths } => {
            let names = catalog::command_names(paths);
            tracing::debug!(
                paths = paths.len(),
                commands = names.len(),
                "path scan completed"
            );
            session.install_corpus(Corpus::Commands(names))?;
            Ok((true, vec![]))
        }
        Event::ScanFailed { error } => {
            tracing::warn!(error = %error, "path scan failed");
            Ok((false, vec![]))
        }
        Event::CorpusLoaded(corpus) => {
            session.install_corpus(corpus.clone())?;
            Ok((true, vec![]))
        }
        Event::Piped { lines } => {
            if lines.is_empty() {
                return Ok((false, vec![]));
            }
            session.extend_commands(lines.iter().cloned())?;
            Ok((true, vec![]))
        }
    }
}

fn handle_key(session: &mut Session, key: &KeyEvent) -> Result<(bool, Vec<Action>)> {
    if session.is_finished() {
        return Ok((false, vec![]));
    }

    let Some(command) = classify(key) else {
        tracing::trace!(key = ?key, "unbound key");
        return Ok((false, vec![]));
    };

    match command {
        Command::Close => {
            session.apply(command);
            tracing::debug!("session closed");
            Ok((false, vec![Action::Close]))
        }
        Command::Submit => {
            session.apply(command);
            Ok((false, vec![submit_action(session)?]))
        }
        _ => Ok((session.apply(command), vec![])),
    }
}

/// The action that accepting the highlighted entry performs in this mode.
fn submit_action(session: &Session) -> Result<Action> {
    let Some(entry) = session.selected() else {
        tracing::debug!(query = %session.query().as_str(), "submitted with no results");
        return Ok(Action::Close);
    };

    tracing::debug!(entry = %entry.display(), mode = ?session.mode(), "entry selected");

    match session.mode() {
        LaunchMode::Dmenu => Ok(Action::Emit {
            line: entry.display().to_string(),
        }),
        LaunchMode::Run | LaunchMode::Drun => {
            let command = entry.launch_command();
            if command.is_empty() {
                return Err(ZofiError::Launch(format!(
                    "\"{}\" has no command to run",
                    entry.display()
                )));
            }
            Ok(Action::Launch { command })
        }
    }
}
