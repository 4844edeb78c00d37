//! zofi: an incremental-search launcher for Zellij.
//!
//! Type to filter a list of candidates, move through the paginated results
//! with the keyboard, and press Enter to accept one. What the candidates are
//! and what accepting one does depends on the launch mode:
//!
//! - `run`: executables on `$PATH`; the selection is run as a command
//! - `drun`: applications from a TOML catalog; the entry's `exec` is run
//! - `dmenu`: lines piped in with `zellij pipe`; the selection is written back

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                │  ← host events, actions
//! └──────────────────────────────────────────────┘
//!                       │
//! ┌──────────────────────────────────────────────┐
//! │  Application Layer (app/)                    │
//! │  - keymap: key → command                     │
//! │  - query: bounded dual-encoding buffer       │
//! │  - pager: variable-size pages                │
//! │  - state: the Session                        │
//! └──────────────────────────────────────────────┘
//!         │                          │
//! ┌────────────────┐        ┌─────────────────────┐
//! │ filter/        │        │ ui/                 │
//! │ - substring    │        │ - layout driver     │
//! │ - fuzzy (Skim) │        │ - canvas + surface  │
//! └────────────────┘        │ - measure, theme    │
//!                           └─────────────────────┘
//!         │                          │
//! ┌──────────────────────────────────────────────┐
//! │  domain/ (corpus, errors)                    │
//! │  infrastructure/ (paths, catalog)            │
//! │  observability/ (OTLP JSON file traces)      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! // ~/.config/zellij/config.kdl
//! keybinds {
//!     shared {
//!         bind "Alt r" {
//!             LaunchOrFocusPlugin "file:~/.config/zellij/plugins/zofi.wasm" {
//!                 floating true
//!                 mode "drun"
//!                 fuzzy_match "true"
//!                 theme "paper"
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! See [`Config`] for every option.
//!
//! # Example
//!
//! ```rust
//! use zofi::{handle_event, Action, Event, KeyEvent, KeySym, LaunchMode, Session};
//! use zofi::domain::Corpus;
//!
//! let corpus = Corpus::Commands(vec!["htop".into(), "vim".into(), "vimdiff".into()]);
//! let mut session = Session::with_corpus(LaunchMode::Run, corpus, false);
//!
//! for ch in "vim".chars() {
//!     handle_event(&mut session, &Event::Key(KeyEvent::new(KeySym::Char(ch))))?;
//! }
//! let (_, actions) = handle_event(&mut session, &Event::Key(KeyEvent::new(KeySym::Enter)))?;
//! assert_eq!(actions, vec![Action::Launch { command: "vim".into() }]);
//! # Ok::<(), zofi::ZofiError>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, Event, KeyEvent, KeySym, LaunchMode, Session};
pub use domain::{App, Corpus, Result, ZofiError};
pub use ui::{LayoutOptions, MeasureKind, Renderer, Theme};

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Plugin configuration parsed from the plugin's KDL block.
///
/// | key | default |
/// |-----|---------|
/// | `mode` | `run` |
/// | `prompt_text` | `"run: "`, `"drun: "` or `"> "` by mode |
/// | `num_results` | `0` (fit to pane) |
/// | `result_spacing` | `0` |
/// | `input_width` | `0` |
/// | `selection_padding` | `0` (negative: full width) |
/// | `padding` | `1` |
/// | `horizontal` | `false` |
/// | `fuzzy_match` | `false` |
/// | `border` | `true` |
/// | `measure` | `unicode` |
/// | `theme` | `midnight` |
/// | `theme_file` | none |
/// | `apps_file` | `~/.config/zofi/apps.toml` |
/// | `trace_level` | `info` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: LaunchMode,
    /// Overrides the mode's default prompt.
    pub prompt_text: Option<String>,
    pub num_results: usize,
    pub result_spacing: usize,
    pub input_width: usize,
    pub selection_padding: i32,
    /// Cells between the border and the content.
    pub padding: usize,
    pub horizontal: bool,
    pub fuzzy_match: bool,
    pub border: bool,
    pub measure: MeasureKind,
    /// Built-in theme; ignored when `theme_file` is set.
    pub theme_name: String,
    pub theme_file: Option<String>,
    pub apps_file: String,
    /// `EnvFilter` directive for tracing.
    pub trace_level: String,
    /// Malformed options that were replaced by their defaults.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: LaunchMode::Run,
            prompt_text: None,
            num_results: 0,
            result_spacing: 0,
            input_width: 0,
            selection_padding: 0,
            padding: 1,
            horizontal: false,
            fuzzy_match: false,
            border: true,
            measure: MeasureKind::Unicode,
            theme_name: "midnight".to_string(),
            theme_file: None,
            apps_file: "~/.config/zofi/apps.toml".to_string(),
            trace_level: "info".to_string(),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij passes to `load`.
    ///
    /// A malformed value falls back to its default and is noted in
    /// [`Config::warnings`], to be logged once tracing is up.
    ///
    /// # Errors
    ///
    /// Returns [`ZofiError::Config`] if `mode` is not a known launch mode.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zofi::{Config, LaunchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("mode".to_string(), "dmenu".to_string());
    /// map.insert("num_results".to_string(), "eight".to_string());
    ///
    /// let config = Config::from_zellij(&map)?;
    /// assert_eq!(config.mode, LaunchMode::Dmenu);
    /// assert_eq!(config.num_results, 0);
    /// assert_eq!(config.warnings.len(), 1);
    ///
    /// map.insert("mode".to_string(), "window".to_string());
    /// assert!(Config::from_zellij(&map).is_err());
    /// # Ok::<(), zofi::ZofiError>(())
    /// ```
    pub fn from_zellij(map: &BTreeMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let mode = match map.get("mode") {
            Some(raw) => raw.parse::<LaunchMode>()?,
            None => defaults.mode,
        };

        let mut options = OptionReader {
            map,
            warnings: Vec::new(),
        };

        let config = Self {
            mode,
            prompt_text: map.get("prompt_text").cloned(),
            num_results: options.parse("num_results", defaults.num_results),
            result_spacing: options.parse("result_spacing", defaults.result_spacing),
            input_width: options.parse("input_width", defaults.input_width),
            selection_padding: options.parse("selection_padding", defaults.selection_padding),
            padding: options.parse("padding", defaults.padding),
            horizontal: options.flag("horizontal", defaults.horizontal),
            fuzzy_match: options.flag("fuzzy_match", defaults.fuzzy_match),
            border: options.flag("border", defaults.border),
            measure: options.parse("measure", defaults.measure),
            theme_name: options.text("theme").unwrap_or(defaults.theme_name),
            theme_file: options.text("theme_file"),
            apps_file: options.text("apps_file").unwrap_or(defaults.apps_file),
            trace_level: options.text("trace_level").unwrap_or(defaults.trace_level),
            warnings: Vec::new(),
        };

        Ok(Self {
            warnings: options.warnings,
            ..config
        })
    }

    /// The prompt drawn before the query.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt_text
            .as_deref()
            .unwrap_or_else(|| self.mode.default_prompt())
    }

    /// Geometry handed to the layout driver.
    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            prompt: self.prompt().to_string(),
            num_results: self.num_results,
            result_spacing: self.result_spacing,
            input_width: self.input_width,
            selection_padding: self.selection_padding,
            horizontal: self.horizontal,
        }
    }

    /// Sandbox path of the application catalog.
    #[must_use]
    pub fn apps_path(&self) -> PathBuf {
        PathBuf::from(infrastructure::expand_tilde(&self.apps_file))
    }

    /// Resolves the theme: `theme_file` first, then `theme`, then the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(file)) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default");
                }
            }
        }

        Theme::from_name(&self.theme_name).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme_name, "unknown theme, using default");
            Theme::default()
        })
    }
}

/// Typed access to the raw option map, collecting parse failures.
struct OptionReader<'a> {
    map: &'a BTreeMap<String, String>,
    warnings: Vec<String>,
}

impl OptionReader<'_> {
    fn parse<T: FromStr>(&mut self, key: &str, default: T) -> T {
        let Some(raw) = self.map.get(key) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            self.warnings
                .push(format!("invalid value \"{raw}\" for {key}, using default"));
            default
        })
    }

    /// Booleans accept `true`/`false` in any case.
    fn flag(&mut self, key: &str, default: bool) -> bool {
        let Some(raw) = self.map.get(key) else {
            return default;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                self.warnings
                    .push(format!("invalid value \"{raw}\" for {key}, using default"));
                default
            }
        }
    }

    /// A non-blank string option.
    fn text(&self, key: &str) -> Option<String> {
        self.map
            .get(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Builds the session and renderer for a parsed configuration.
///
/// Logs any configuration warnings and resolves the theme. The session starts
/// with an empty corpus of the mode's kind; the plugin fills it as the scan,
/// catalog or pipe delivers entries.
#[must_use]
pub fn initialize(config: &Config) -> (Session, Renderer) {
    tracing::debug!(mode = ?config.mode, fuzzy = config.fuzzy_match, "initializing zofi");

    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let theme = config.load_theme();
    let session = Session::new(config.mode, config.fuzzy_match);
    let renderer = Renderer::from_config(config, theme);

    (session, renderer)
}
