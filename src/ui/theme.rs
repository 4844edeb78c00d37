//! Color themes and ANSI escape generation.
//!
//! A theme is a small TOML document with hex colors for each part of the
//! launcher. Two themes are compiled in; any other theme is loaded from a file.
//!
//! # Built-in Themes
//!
//! - `midnight`: dark blue background (default)
//! - `paper`: light background
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#1b1d2b"
//! foreground = "#c8d3f5"
//! prompt = "#82aaff"
//! selection_fg = "#1b1d2b"
//! selection_bg = "#c3e88d"
//! selection_match = "#ff757f"   # optional
//! border = "#444a73"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zofi::ui::Theme;
//!
//! let theme = Theme::from_name("paper").unwrap();
//! print!("{}text{}", theme.colors.foreground.fg(), Theme::reset());
//! ```

use crate::domain::{Result, ZofiError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A 24-bit color, written as `#rrggbb` in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(self) -> String {
        format!("\u{001b}[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(self) -> String {
        format!("\u{001b}[48;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid color \"{s}\" (expected #rrggbb)"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid color \"{s}\""))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colors for each part of the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Fill behind everything.
    pub background: Color,
    /// Query text and unselected results.
    pub foreground: Color,
    /// Prompt text.
    pub prompt: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    /// Color of the matched part of the selected result. Without it the
    /// selected result is drawn in one piece.
    #[serde(default)]
    pub selection_match: Option<Color>,
    pub border: Color,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "midnight" => include_str!("../../themes/midnight.toml"),
            "paper" => include_str!("../../themes/paper.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZofiError::Io`] if the file cannot be read and
    /// [`ZofiError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| ZofiError::Theme(e.to_string()))
    }

    /// ANSI reset escape (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name("midnight").expect("built-in midnight theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["midnight", "paper"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert!(theme.colors.selection_match.is_some());
        }
        assert!(Theme::from_name("neon").is_none());
        assert_eq!(Theme::default().name, "midnight");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("00ff00".parse::<Color>().unwrap(), Color::rgb(0, 255, 0));
        assert!("#fff".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn escapes_use_truecolor() {
        let color = Color::rgb(10, 20, 30);
        assert_eq!(color.fg(), "\u{1b}[38;2;10;20;30m");
        assert_eq!(color.bg(), "\u{1b}[48;2;10;20;30m");
    }

    #[test]
    fn loads_theme_file_without_match_color() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"name = "plain"

[colors]
background = "#000000"
foreground = "#ffffff"
prompt = "#ffffff"
selection_fg = "#000000"
selection_bg = "#ffffff"
border = "#808080"
"##
        )
        .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "plain");
        assert_eq!(theme.colors.selection_match, None);
    }

    #[test]
    fn bad_theme_files_are_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"x\"\n[colors]\nbackground = \"red\"\n").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(ZofiError::Theme(_))));

        assert!(matches!(
            Theme::from_file("/nonexistent/zofi/theme.toml"),
            Err(ZofiError::Io(_))
        ));
    }
}
