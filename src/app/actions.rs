//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to the host itself. It
//! returns a list of [`Action`]s and the plugin shim in `main.rs` carries them
//! out in order.

/// A side effect for the plugin runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hide the launcher without doing anything else.
    Close,

    /// Run a shell command line, then hide the launcher.
    Launch {
        /// Command line passed to `sh -c`.
        command: String,
    },

    /// Write a line back to the CLI pipe that fed the launcher, then hide it.
    Emit {
        /// The selected entry, without a trailing newline.
        line: String,
    },
}
