use std::io::Write;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TerminalColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use syntect::highlighting::{Color, FontStyle};
use crate::display::{DisplaySink, StyledSpan};
use crate::errors::*;
use crate::theme::ResolvedStyle;

/// Renders spans with 24-bit colors and text attributes.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> TerminalSink<W> {
        TerminalSink{ out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn write(&mut self, span: &StyledSpan) -> Result<()> {
        if span.style.is_unset() {
            queue!(self.out, Print(span.text))?;
            return Ok(())
        }

        let guard = StyleGuard::acquire(&mut self.out, &span.style)?;
        queue!(guard.out, Print(span.text))?;
        guard.release()
    }

    fn write_line_break(&mut self) -> Result<()> {
        queue!(self.out, Print("\n"))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Holds the terminal in a styled state. The style is reset when the guard
/// is released or dropped, whichever comes first.
struct StyleGuard<'a, W: Write> {
    out: &'a mut W,
    active: bool,
}

impl<'a, W: Write> StyleGuard<'a, W> {
    fn acquire(out: &'a mut W, style: &ResolvedStyle) -> Result<StyleGuard<'a, W>> {
        // Build the guard before applying anything, so that
        // a partially applied style is still reset on failure.
        let guard = StyleGuard{ out, active: true };

        if let Some(color) = style.foreground {
            queue!(guard.out, SetForegroundColor(terminal_color(color)))?;
        }
        if let Some(color) = style.background {
            queue!(guard.out, SetBackgroundColor(terminal_color(color)))?;
        }
        if let Some(font_style) = style.font_style {
            for attribute in attributes(font_style) {
                queue!(guard.out, SetAttribute(attribute))?;
            }
        }

        Ok(guard)
    }

    fn release(mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.active = false;
        Ok(())
    }
}

impl<'a, W: Write> Drop for StyleGuard<'a, W> {
    fn drop(&mut self) {
        if self.active {
            let _ = queue!(self.out, SetAttribute(Attribute::Reset), ResetColor);
        }
    }
}

fn terminal_color(color: Color) -> TerminalColor {
    TerminalColor::Rgb{ r: color.r, g: color.g, b: color.b }
}

fn attributes(font_style: FontStyle) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    if font_style.contains(FontStyle::BOLD) {
        attributes.push(Attribute::Bold);
    }
    if font_style.contains(FontStyle::ITALIC) {
        attributes.push(Attribute::Italic);
    }
    if font_style.contains(FontStyle::UNDERLINE) {
        attributes.push(Attribute::Underlined);
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::TerminalSink;
    use crate::display::{DisplaySink, StyledSpan};
    use crate::theme::ResolvedStyle;
    use std::io::{self, Write};
    use syntect::highlighting::{Color, FontStyle};

    fn render(spans: &[StyledSpan]) -> String {
        let mut sink = TerminalSink::new(Vec::new());
        for span in spans {
            sink.write(span).unwrap();
        }
        sink.write_line_break().unwrap();

        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn write_prints_unstyled_spans_verbatim() {
        assert_eq!(render(&[StyledSpan::unstyled("hello world")]), "hello world\n");
    }

    #[test]
    fn write_applies_colors_and_resets_them() {
        let style = ResolvedStyle{
            foreground: Some(Color{ r: 255, g: 0, b: 0, a: 255 }),
            background: Some(Color{ r: 0, g: 0, b: 255, a: 255 }),
            font_style: None,
        };
        let output = render(&[StyledSpan::new("fn", style), StyledSpan::unstyled(" main")]);

        assert!(output.contains("38;2;255;0;0"));
        assert!(output.contains("48;2;0;0;255"));
        assert!(output.contains("fn\u{1b}[0m"));
        assert!(output.ends_with(" main\n"));
    }

    #[test]
    fn write_applies_font_attributes() {
        let style = ResolvedStyle{ font_style: Some(FontStyle::BOLD | FontStyle::ITALIC), ..Default::default() };
        let output = render(&[StyledSpan::new("x", style)]);

        assert!(output.contains("\u{1b}[1m"));
        assert!(output.contains("\u{1b}[3m"));
        assert!(output.ends_with("\u{1b}[0m\n"));
    }

    /// Accepts a fixed number of writes, then fails.
    struct FlakyWriter {
        writes_left: usize,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "broken pipe"));
            }
            self.writes_left -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_reported() {
        let style = ResolvedStyle{ foreground: Some(Color::WHITE), ..Default::default() };
        let mut sink = TerminalSink::new(FlakyWriter{ writes_left: 1 });

        assert!(sink.write(&StyledSpan::new("text", style)).is_err());
    }
}
