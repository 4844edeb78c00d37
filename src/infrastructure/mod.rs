//! Filesystem and host-environment helpers.
//!
//! - [`paths`]: sandbox path handling
//! - [`catalog`]: loading the corpus for each launch mode

pub mod catalog;
pub mod paths;

pub use catalog::{command_names, load_apps, parse_apps, piped_lines, PATH_SCAN_SCRIPT};
pub use paths::{expand_tilde, get_data_dir};
