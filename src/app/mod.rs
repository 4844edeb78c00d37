//! Application layer: the launcher's state machine and its input handling.
//!
//! ```text
//! Key / host event → handle_event → Session mutations → Actions → main.rs
//!                                        │
//!                                        └── page() → ui::Renderer → record_page_size
//! ```
//!
//! # Modules
//!
//! - [`query`]: the bounded query buffer
//! - [`keymap`]: key events and their classification into commands
//! - [`pager`]: variable-size paging and selection
//! - [`modes`]: launch modes
//! - [`state`]: the [`Session`] tying it all together
//! - [`handler`]: event dispatch
//! - [`actions`]: side effects for the host

pub mod actions;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod pager;
pub mod query;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keymap::{classify, Command, KeyEvent, KeySym, Modifiers};
pub use modes::LaunchMode;
pub use pager::Pager;
pub use query::{Query, QUERY_CAPACITY};
pub use state::Session;
