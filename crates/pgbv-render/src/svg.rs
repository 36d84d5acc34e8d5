#![forbid(unsafe_code)]

//! SVG canvas.
//!
//! Streams an SVG document into any [`std::io::Write`]. Rectangles become
//! `<rect>` elements and text becomes `<text>` elements, each carrying the
//! class, id and inline CSS of its [`Style`].
//!
//! Write errors do not interrupt drawing: the first one is kept and returned
//! by [`Canvas::finish`], later draw calls become no-ops.
//!
//! # Usage
//!
//! ```
//! use pgbv_core::geometry::{Coordinate, Size};
//! use pgbv_render::canvas::{Canvas, Style};
//! use pgbv_render::svg::SvgCanvas;
//!
//! let mut canvas = SvgCanvas::new(Vec::new()).interactive(false);
//! canvas.start(Size::new(20, 10));
//! canvas.rect(Coordinate::new(0, 0), Size::new(10, 10), &Style::class("block"));
//! let bytes = canvas.finish().unwrap();
//! assert!(String::from_utf8(bytes).unwrap().ends_with("</svg>\n"));
//! ```

use std::fmt;
use std::io::{self, Write};

use pgbv_core::geometry::{Coordinate, Size};

use crate::canvas::{Canvas, Style};

const STYLESHEET: &str = include_str!("../resources/buffer_viz.css");
const SCRIPT: &str = include_str!("../resources/buffer_viz.js");

/// Canvas producing an SVG document.
#[derive(Debug)]
pub struct SvgCanvas<W: Write> {
    out: W,
    interactive: bool,
    started: bool,
    error: Option<io::Error>,
}

impl<W: Write> SvgCanvas<W> {
    /// Interactive canvas writing into `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            interactive: true,
            started: false,
            error: None,
        }
    }

    /// Embed the stylesheet, hover script and details line (default: on).
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_fmt(args) {
            self.error = Some(err);
        }
    }

    fn emit_style(&mut self, style: &Style) {
        if let Some(class) = style.class {
            self.emit(format_args!(" class=\"{}\"", Escaped(class)));
        }
        if let Some(id) = &style.id {
            self.emit(format_args!(" id=\"{}\"", Escaped(id)));
        }
        if let Some(css) = &style.css {
            self.emit(format_args!(" style=\"{}\"", Escaped(css)));
        }
    }
}

impl<W: Write> Canvas for SvgCanvas<W> {
    type Output = W;
    type Error = io::Error;

    fn start(&mut self, size: Size) {
        if self.started {
            tracing::warn!("svg canvas started twice, ignoring");
            return;
        }
        self.started = true;
        let (width, height) = (size.width, size.height);
        self.emit(format_args!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\""
        ));
        if self.interactive {
            self.emit(format_args!(" onload=\"init(evt)\">\n"));
            self.emit(format_args!("<style type=\"text/css\"><![CDATA[\n{STYLESHEET}]]></style>\n"));
            self.emit(format_args!(
                "<script type=\"text/ecmascript\"><![CDATA[\n{SCRIPT}]]></script>\n"
            ));
            self.emit(format_args!(
                "<text id=\"details\" x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"12\">Details: </text>\n",
                width.saturating_sub(4),
                height.saturating_sub(4),
            ));
        } else {
            self.emit(format_args!(">\n"));
        }
    }

    fn rect(&mut self, at: Coordinate, size: Size, style: &Style) {
        self.emit(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            at.x, at.y, size.width, size.height
        ));
        self.emit_style(style);
        self.emit(format_args!("/>\n"));
    }

    fn text(&mut self, at: Coordinate, content: &str, style: &Style) {
        self.emit(format_args!("<text x=\"{}\" y=\"{}\"", at.x, at.y));
        self.emit_style(style);
        self.emit(format_args!(">{}</text>\n", Escaped(content)));
    }

    fn finish(mut self) -> Result<W, io::Error> {
        if self.started {
            self.emit(format_args!("</svg>\n"));
        }
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

/// XML-escapes its content when displayed.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['<', '>', '&', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'&' => "&amp;",
                b'"' => "&quot;",
                _ => "&apos;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(interactive: bool, draw: impl FnOnce(&mut SvgCanvas<Vec<u8>>)) -> String {
        let mut canvas = SvgCanvas::new(Vec::new()).interactive(interactive);
        canvas.start(Size::new(100, 50));
        draw(&mut canvas);
        String::from_utf8(canvas.finish().unwrap()).unwrap()
    }

    #[test]
    fn svg_basic_structure() {
        let svg = render(false, |_| {});
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn svg_dimensions() {
        let svg = render(false, |_| {});
        assert!(svg.contains("width=\"100\" height=\"50\" viewBox=\"0 0 100 50\""));
    }

    #[test]
    fn rect_carries_style_attributes() {
        let svg = render(false, |c| {
            let style = Style::class("block").with_id("t_7").with_css("fill:red");
            c.rect(Coordinate::new(10, 20), Size::new(10, 10), &style);
        });
        assert!(svg.contains(
            "<rect x=\"10\" y=\"20\" width=\"10\" height=\"10\" class=\"block\" id=\"t_7\" style=\"fill:red\"/>"
        ));
    }

    #[test]
    fn text_is_escaped() {
        let svg = render(false, |c| {
            c.text(Coordinate::new(1, 2), "a<b & \"c\"", &Style::default());
        });
        assert!(svg.contains("<text x=\"1\" y=\"2\">a&lt;b &amp; &quot;c&quot;</text>"));
    }

    #[test]
    fn interactive_header_embeds_script_and_details() {
        let svg = render(true, |_| {});
        assert!(svg.contains("onload=\"init(evt)\""));
        assert!(svg.contains("<script type=\"text/ecmascript\">"));
        assert!(svg.contains("function init(evt)"));
        assert!(svg.contains(".block.selected"));
        assert!(svg.contains("<text id=\"details\""));
    }

    #[test]
    fn plain_header_has_no_script() {
        let svg = render(false, |_| {});
        assert!(!svg.contains("<script"));
        assert!(!svg.contains("onload"));
    }

    #[test]
    fn finish_without_start_writes_nothing() {
        let canvas = SvgCanvas::new(Vec::new());
        assert!(canvas.finish().unwrap().is_empty());
    }

    #[test]
    fn escaped_passthrough_and_entities() {
        assert_eq!(Escaped("plain text 123").to_string(), "plain text 123");
        assert_eq!(Escaped("<'&'>").to_string(), "&lt;&apos;&amp;&apos;&gt;");
    }

    #[derive(Debug)]
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_error_surfaces_at_finish() {
        let mut canvas = SvgCanvas::new(FailingWriter);
        canvas.start(Size::new(10, 10));
        canvas.rect(Coordinate::new(0, 0), Size::new(1, 1), &Style::default());
        let err = canvas.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
