#![forbid(unsafe_code)]

//! Drawing for table block maps.
//!
//! The renderer only talks to the [`Canvas`] trait. Two canvases ship with
//! the crate:
//!
//! - [`SvgCanvas`] streams an SVG document, optionally with a hover script
//! - [`RecordingCanvas`] captures draw calls for tests
//!
//! # Example
//!
//! ```
//! use pgbv_core::{Relation, Size, Table};
//! use pgbv_layout::{LayoutConfig, LayoutEngine};
//! use pgbv_render::{SvgCanvas, TableRenderer};
//!
//! let table = Table::new(Relation::new("t", vec![8192; 12]));
//! let engine = LayoutEngine::new(LayoutConfig::new(Size::new(10, 10), Size::new(3, 3)));
//! let svg = TableRenderer::new(engine)
//!     .render(&table, SvgCanvas::new(Vec::new()))
//!     .unwrap();
//! assert!(String::from_utf8(svg).unwrap().contains("id=\"t_11\""));
//! ```

pub mod canvas;
pub mod color;
pub mod headless;
pub mod svg;
pub mod table;

pub use canvas::{Canvas, Style};
pub use color::{ColorScale, PAGE_SIZE};
pub use headless::{DrawCall, Recording, RecordingCanvas};
pub use svg::SvgCanvas;
pub use table::{RenderError, TableRenderer};

/// Render `table` to an SVG document in memory.
///
/// # Errors
///
/// Fails only if writing to the in-memory buffer fails.
pub fn render_svg(
    renderer: &TableRenderer,
    table: &pgbv_core::Table,
    interactive: bool,
) -> Result<Vec<u8>, RenderError> {
    renderer.render(table, SvgCanvas::new(Vec::new()).interactive(interactive))
}
