//! Domain layer for the zofi launcher.
//!
//! Core types that do not depend on Zellij APIs or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`corpus`]: The searchable corpus and its entries
//!
//! # Examples
//!
//! ```
//! use zofi::domain::{App, Corpus};
//!
//! let corpus = Corpus::Apps(vec![App::new("Terminal", "alacritty")]);
//! assert_eq!(corpus.display(0), Some("Terminal"));
//! ```

pub mod corpus;
pub mod error;

pub use corpus::{App, Corpus, EntryRef};
pub use error::{Result, ZofiError};
