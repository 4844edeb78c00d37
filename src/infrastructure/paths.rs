//! Paths inside the Zellij plugin sandbox.
//!
//! Plugins see the host filesystem mounted under `/host`, which resolves to the
//! directory Zellij was started from (normally the user's home).

use std::path::PathBuf;

/// Mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Directory holding zofi's trace files: `/host/.local/share/zellij/zofi`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/zofi")
}

/// Maps a `~`-relative path onto the `/host` mount.
///
/// # Examples
///
/// ```
/// use zofi::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.config/zofi/apps.toml"), "/host/.config/zofi/apps.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/zofi.toml"), "/etc/zofi.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
