//! Corpus sources.
//!
//! - `run`: the plugin runs [`PATH_SCAN_SCRIPT`] on the host and feeds the
//!   printed paths to [`command_names`]
//! - `drun`: the application catalog, a TOML file of `[[app]]` tables, is read
//!   with [`load_apps`]
//! - `dmenu`: pipe payloads are split with [`piped_lines`]
//!
//! # Catalog Format
//!
//! ```toml
//! [[app]]
//! name = "Firefox"
//! exec = "firefox %u"
//! comment = "Web browser"
//!
//! [[app]]
//! name = "Terminal"
//! exec = "alacritty"
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{App, Result};

/// Shell script printing every executable file in each `$PATH` directory.
pub const PATH_SCAN_SCRIPT: &str = r#"IFS=:; for dir in $PATH; do [ -d "$dir" ] && find -L "$dir" -maxdepth 1 -type f -perm -u+x 2>/dev/null; done; true"#;

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(default, rename = "app")]
    apps: Vec<App>,
}

/// Reduces executable paths to their file names, sorted and de-duplicated.
///
/// # Examples
///
/// ```
/// use zofi::infrastructure::command_names;
///
/// let paths = ["/usr/bin/vim".to_string(), "/bin/ls".into(), "/usr/local/bin/vim".into()];
/// assert_eq!(command_names(&paths), vec!["ls", "vim"]);
/// ```
#[must_use]
pub fn command_names(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.trim())
        .filter_map(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Parses catalog text. Entries without a name or `exec` line are skipped.
///
/// # Errors
///
/// Returns [`ZofiError::Catalog`](crate::domain::ZofiError::Catalog) if the
/// text is not a valid catalog.
pub fn parse_apps(text: &str) -> Result<Vec<App>> {
    let catalog: Catalog = toml::from_str(text)?;

    let total = catalog.apps.len();
    let apps: Vec<App> = catalog
        .apps
        .into_iter()
        .filter(|app| !app.name.trim().is_empty() && !app.exec.trim().is_empty())
        .collect();

    if apps.len() < total {
        tracing::warn!(skipped = total - apps.len(), "catalog entries without name or exec");
    }
    Ok(apps)
}

/// Reads and parses the catalog at `path`.
///
/// # Errors
///
/// Returns [`ZofiError::Io`](crate::domain::ZofiError::Io) if the file cannot
/// be read, or a catalog error if it cannot be parsed.
pub fn load_apps(path: &Path) -> Result<Vec<App>> {
    let _span = tracing::debug_span!("load_apps", path = %path.display()).entered();

    let text = fs::read_to_string(path)?;
    let apps = parse_apps(&text)?;
    tracing::debug!(apps = apps.len(), "catalog loaded");
    Ok(apps)
}

/// Splits a pipe payload into corpus lines, dropping blank lines and `\r`.
#[must_use]
pub fn piped_lines(payload: &str) -> Vec<String> {
    payload
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZofiError;
    use std::io::Write;

    #[test]
    fn command_names_skip_blank_lines() {
        let paths = vec![String::new(), "  ".into(), "/usr/bin/".into(), "/bin/cat\n".into()];
        assert_eq!(command_names(&paths), vec!["cat"]);
    }

    #[test]
    fn parses_catalog_tables() {
        let apps = parse_apps(
            r#"
[[app]]
name = "Files"
exec = "nautilus %U"
comment = "Browse files"

[[app]]
name = ""
exec = "ghost"

[[app]]
name = "Top"
exec = "htop"
"#,
        )
        .unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].comment.as_deref(), Some("Browse files"));
        assert_eq!(apps[1], App::new("Top", "htop"));
    }

    #[test]
    fn empty_catalog_is_valid() {
        assert!(parse_apps("").unwrap().is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let err = parse_apps("[[app]]\nname = 3\n").unwrap_err();
        assert!(matches!(err, ZofiError::Catalog(_)));
    }

    #[test]
    fn loads_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[app]]\nname = \"Editor\"\nexec = \"vim\"").unwrap();
        let apps = load_apps(file.path()).unwrap();
        assert_eq!(apps, vec![App::new("Editor", "vim")]);

        let missing = load_apps(Path::new("/nonexistent/zofi/apps.toml"));
        assert!(matches!(missing, Err(ZofiError::Io(_))));
    }

    #[test]
    fn piped_lines_drop_blank_lines() {
        assert_eq!(piped_lines("a\r\n\nb\n  \nc"), vec!["a", "b", "c"]);
    }
}
