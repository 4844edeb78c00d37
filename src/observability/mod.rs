//! Tracing to a local OTLP JSON file.
//!
//! ```text
//! tracing spans ─▶ EnvFilter ─▶ tracing-opentelemetry ─▶ TracerProvider
//!                                                          │
//!                         zofi-otlp.jsonl ◀─ RotatingFile ◀┘ (JsonLinesExporter)
//! ```
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `zofi=debug`. The file lives in
//! `~/.local/share/zellij/zofi/` and rotates at 4 MiB keeping two backups.
//!
//! ```rust,no_run
//! use zofi::observability::init_tracing;
//! use zofi::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("launcher loaded");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
