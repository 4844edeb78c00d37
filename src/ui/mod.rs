//! User interface rendering.
//!
//! ```text
//! Session ──page()──▶ layout::draw_page ──▶ Canvas (front of Surface) ──▶ ANSI frame
//!    ▲                       │
//!    └─ record_page_size ◀───┘
//! ```
//!
//! # Modules
//!
//! - [`renderer`]: per-frame coordinator owned by the plugin
//! - [`layout`]: the layout driver that decides how many results fit
//! - [`canvas`]: cell grid with origin, clip and scoped save/restore
//! - [`surface`]: double buffering and damage repair
//! - [`measure`]: text measurement backends
//! - [`theme`]: color schemes

pub mod canvas;
pub mod layout;
pub mod measure;
pub mod renderer;
pub mod surface;
pub mod theme;

pub use canvas::{Canvas, Cell, Rect};
pub use layout::{draw_page, LayoutOptions, PageView};
pub use measure::{AsciiMeasure, Measure, MeasureKind, UnicodeMeasure};
pub use renderer::Renderer;
pub use surface::Surface;
pub use theme::{Color, Theme, ThemeColors};
