#![forbid(unsafe_code)]

//! Recording canvas.
//!
//! Captures every draw call in order instead of producing an image, so tests
//! can assert on what a renderer drew without parsing markup.

use std::convert::Infallible;

use pgbv_core::geometry::{Coordinate, Size};

use crate::canvas::{Canvas, Style};

/// One captured draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Start(Size),
    Rect {
        at: Coordinate,
        size: Size,
        style: Style,
    },
    Text {
        at: Coordinate,
        content: String,
        style: Style,
    },
}

/// Canvas that records draw calls.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    type Output = Recording;
    type Error = Infallible;

    fn start(&mut self, size: Size) {
        self.calls.push(DrawCall::Start(size));
    }

    fn rect(&mut self, at: Coordinate, size: Size, style: &Style) {
        self.calls.push(DrawCall::Rect {
            at,
            size,
            style: style.clone(),
        });
    }

    fn text(&mut self, at: Coordinate, content: &str, style: &Style) {
        self.calls.push(DrawCall::Text {
            at,
            content: content.to_owned(),
            style: style.clone(),
        });
    }

    fn finish(self) -> Result<Recording, Infallible> {
        Ok(Recording { calls: self.calls })
    }
}

/// Draw calls captured by a [`RecordingCanvas`], in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recording {
    pub calls: Vec<DrawCall>,
}

impl Recording {
    /// Size passed to the first `start` call.
    pub fn size(&self) -> Option<Size> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::Start(size) => Some(*size),
            _ => None,
        })
    }

    /// Rectangles with their style.
    pub fn rects(&self) -> impl Iterator<Item = (Coordinate, Size, &Style)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Rect { at, size, style } => Some((*at, *size, style)),
            _ => None,
        })
    }

    /// Text elements with their style.
    pub fn texts(&self) -> impl Iterator<Item = (Coordinate, &str, &Style)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { at, content, style } => Some((*at, content.as_str(), style)),
            _ => None,
        })
    }

    /// Rectangles whose class is `class`.
    pub fn rects_of_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = (Coordinate, Size, &'a Style)> + 'a {
        self.rects().filter(move |(_, _, style)| style.class == Some(class))
    }
}
