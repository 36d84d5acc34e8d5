#![forbid(unsafe_code)]

//! The drawing contract.
//!
//! A [`Canvas`] is started once with the full pixel size, receives any number
//! of rectangle and text calls, and is consumed by [`Canvas::finish`]. Taking
//! `self` by value makes a draw call after `finish` a compile error.

use pgbv_core::geometry::{Coordinate, Size};

/// Attributes attached to a draw call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    /// Class name, used by stylesheets and scripts.
    pub class: Option<&'static str>,
    /// Element identifier.
    pub id: Option<String>,
    /// Inline CSS declarations.
    pub css: Option<String>,
}

impl Style {
    /// Style with only a class.
    pub const fn class(class: &'static str) -> Self {
        Self {
            class: Some(class),
            id: None,
            css: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }
}

/// A drawing surface.
pub trait Canvas {
    /// What [`Canvas::finish`] hands back (bytes, a writer, recorded calls).
    type Output;
    /// Failure reported by [`Canvas::finish`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Size the canvas, in pixels. Called once, before any draw call.
    fn start(&mut self, size: Size);

    /// Filled rectangle with its top-left corner at `at`.
    fn rect(&mut self, at: Coordinate, size: Size, style: &Style);

    /// Text anchored at `at`.
    fn text(&mut self, at: Coordinate, content: &str, style: &Style);

    /// Complete the drawing.
    ///
    /// # Errors
    ///
    /// Returns the first failure met while drawing or completing the output.
    fn finish(self) -> Result<Self::Output, Self::Error>;
}
