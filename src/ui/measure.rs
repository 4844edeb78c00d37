//! Text measurement backends.
//!
//! The layout driver never assumes how wide a string is; it asks a [`Measure`]
//! implementation. The backend is picked once from configuration when the
//! renderer is built.

use std::str::FromStr;
use unicode_width::UnicodeWidthChar;

use crate::domain::ZofiError;

/// Measures how many terminal cells text occupies.
pub trait Measure {
    /// Cells taken by one character. Zero-width characters report 0.
    fn char_width(&self, ch: char) -> usize;

    /// Cells taken by a whole string.
    fn width(&self, text: &str) -> usize {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }

    fn name(&self) -> &'static str;
}

/// East Asian width aware measurement via `unicode-width`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeMeasure;

impl Measure for UnicodeMeasure {
    fn char_width(&self, ch: char) -> usize {
        ch.width().unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "unicode"
    }
}

/// One cell per character, for terminals or fonts without wide glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiMeasure;

impl Measure for AsciiMeasure {
    fn char_width(&self, ch: char) -> usize {
        usize::from(!ch.is_control())
    }

    fn name(&self) -> &'static str {
        "ascii"
    }
}

/// Configured choice of measurement backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeasureKind {
    #[default]
    Unicode,
    Ascii,
}

impl MeasureKind {
    #[must_use]
    pub fn backend(self) -> Box<dyn Measure> {
        match self {
            Self::Unicode => Box::new(UnicodeMeasure),
            Self::Ascii => Box::new(AsciiMeasure),
        }
    }
}

impl FromStr for MeasureKind {
    type Err = ZofiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unicode" => Ok(Self::Unicode),
            "ascii" => Ok(Self::Ascii),
            other => Err(ZofiError::Config(format!(
                "invalid measure \"{other}\" (expected unicode or ascii)"
            ))),
        }
    }
}
