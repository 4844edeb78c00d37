//! Launch modes.
//!
//! The mode is chosen once from configuration and fixed for the lifetime of the
//! plugin. It decides where the corpus comes from and what submitting a result
//! does:
//!
//! - **Run**: executables on `$PATH`; the selected name is run as a command
//! - **Drun**: applications from the catalog file; the entry's `exec` is run
//! - **Dmenu**: lines piped in with `zellij pipe`; the selected line is written
//!   back to the pipe
//!
//! # Example
//!
//! ```rust
//! use zofi::app::LaunchMode;
//!
//! let mode: LaunchMode = "drun".parse().unwrap();
//! assert_eq!(mode, LaunchMode::Drun);
//! assert!(mode.uses_apps());
//! ```

use crate::domain::{Corpus, ZofiError};
use std::str::FromStr;

/// Where entries come from and what submitting one does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LaunchMode {
    /// Commands found on `$PATH`.
    #[default]
    Run,

    /// Applications from the catalog.
    Drun,

    /// Lines received over a CLI pipe.
    Dmenu,
}

impl LaunchMode {
    /// Whether the corpus is structured applications rather than plain strings.
    #[must_use]
    pub const fn uses_apps(self) -> bool {
        matches!(self, Self::Drun)
    }

    /// An empty corpus of the kind this mode searches.
    #[must_use]
    pub fn empty_corpus(self) -> Corpus {
        if self.uses_apps() {
            Corpus::Apps(Vec::new())
        } else {
            Corpus::Commands(Vec::new())
        }
    }

    /// The prompt shown when none is configured.
    #[must_use]
    pub const fn default_prompt(self) -> &'static str {
        match self {
            Self::Run => "run: ",
            Self::Drun => "drun: ",
            Self::Dmenu => "> ",
        }
    }
}

impl FromStr for LaunchMode {
    type Err = ZofiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "run" => Ok(Self::Run),
            "drun" => Ok(Self::Drun),
            "dmenu" => Ok(Self::Dmenu),
            other => Err(ZofiError::Config(format!(
                "invalid mode \"{other}\" (expected run, drun or dmenu)"
            ))),
        }
    }
}
