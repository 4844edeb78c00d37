//! Searchable corpora and their entries.
//!
//! A session searches exactly one [`Corpus`] for its whole lifetime: either a
//! flat list of command names (`run` and `dmenu` modes) or a list of
//! structured [`App`] entries (`drun` mode). The corpus owns every entry; result
//! lists only hold indices into it.

use serde::{Deserialize, Serialize};

/// Desktop entry field codes dropped from `exec` lines before launching.
const FIELD_CODES: &[char] = &['f', 'F', 'u', 'U', 'd', 'D', 'n', 'N', 'i', 'c', 'k', 'v', 'm'];

/// A launchable application from the catalog.
///
/// `exec` follows desktop entry conventions and may contain field codes such
/// as `%u`; [`App::command`] produces the line actually handed to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Display name, and the string the query is matched against.
    pub name: String,
    /// Command line, possibly containing field codes.
    pub exec: String,
    /// Optional free-form description.
    #[serde(default)]
    pub comment: Option<String>,
}

impl App {
    #[must_use]
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
            comment: None,
        }
    }

    /// Returns `exec` with field codes removed and `%%` unescaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use zofi::domain::App;
    ///
    /// let app = App::new("Firefox", "firefox --new-window %u");
    /// assert_eq!(app.command(), "firefox --new-window");
    ///
    /// let app = App::new("Progress", "show 100%% %F");
    /// assert_eq!(app.command(), "show 100%");
    /// ```
    #[must_use]
    pub fn command(&self) -> String {
        let mut out = String::with_capacity(self.exec.len());
        let mut chars = self.exec.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek().copied() {
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                Some(code) if FIELD_CODES.contains(&code) => {
                    chars.next();
                }
                _ => out.push(c),
            }
        }

        out.trim().to_string()
    }
}

/// The set of entries a session searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    /// Plain strings; submitting one runs (or emits) the string itself.
    Commands(Vec<String>),
    /// Structured applications; submitting one runs its `exec` line.
    Apps(Vec<App>),
}

/// A borrowed view of one corpus entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef<'a> {
    Command(&'a str),
    App(&'a App),
}

impl EntryRef<'_> {
    /// The text shown in the result list and matched against the query.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Command(name) => *name,
            Self::App(app) => app.name.as_str(),
        }
    }

    /// The shell command line that launches this entry.
    #[must_use]
    pub fn launch_command(&self) -> String {
        match self {
            Self::Command(name) => (*name).to_string(),
            Self::App(app) => app.command(),
        }
    }
}

impl Corpus {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Commands(items) => items.len(),
            Self::Apps(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<EntryRef<'_>> {
        match self {
            Self::Commands(items) => items.get(index).map(|s| EntryRef::Command(s)),
            Self::Apps(items) => items.get(index).map(EntryRef::App),
        }
    }

    /// The display string of the entry at `index`.
    #[must_use]
    pub fn display(&self, index: usize) -> Option<&str> {
        match self {
            Self::Commands(items) => items.get(index).map(String::as_str),
            Self::Apps(items) => items.get(index).map(|app| app.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_percent_sequences_are_kept() {
        let app = App::new("Odd", "tool %z 50%");
        assert_eq!(app.command(), "tool %z 50%");
    }

    #[test]
    fn entry_views_expose_display_and_command() {
        let corpus = Corpus::Apps(vec![App::new("Files", "nautilus %U")]);
        let entry = corpus.entry(0).unwrap();
        assert_eq!(entry.display(), "Files");
        assert_eq!(entry.launch_command(), "nautilus");
        assert!(corpus.entry(1).is_none());

        let corpus = Corpus::Commands(vec!["htop".to_string()]);
        assert_eq!(corpus.entry(0).unwrap().launch_command(), "htop");
        assert_eq!(corpus.display(0), Some("htop"));
    }
}
