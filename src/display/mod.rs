mod plain;
mod terminal;

pub use self::plain::PlainSink;
pub use self::terminal::TerminalSink;

use crate::errors::*;
use crate::theme::ResolvedStyle;

/// A run of text from a single line, paired with the style to render it in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyledSpan<'a> {
    pub text: &'a str,
    pub style: ResolvedStyle,
}

impl<'a> StyledSpan<'a> {
    pub fn new(text: &'a str, style: ResolvedStyle) -> StyledSpan<'a> {
        StyledSpan{ text, style }
    }

    /// A span rendered with the terminal's default style.
    pub fn unstyled(text: &'a str) -> StyledSpan<'a> {
        StyledSpan{ text, style: ResolvedStyle::default() }
    }
}

/// Where styled spans end up.
pub trait DisplaySink {
    fn write(&mut self, span: &StyledSpan) -> Result<()>;
    fn write_line_break(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn write(&mut self, span: &StyledSpan) -> Result<()> {
        (**self).write(span)
    }

    fn write_line_break(&mut self) -> Result<()> {
        (**self).write_line_break()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
