use std::io::Write;
use crate::display::{DisplaySink, StyledSpan};
use crate::errors::*;

/// Writes span text as-is, dropping all styling.
pub struct PlainSink<W: Write> {
    out: W,
}

impl<W: Write> PlainSink<W> {
    pub fn new(out: W) -> PlainSink<W> {
        PlainSink{ out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for PlainSink<W> {
    fn write(&mut self, span: &StyledSpan) -> Result<()> {
        self.out.write_all(span.text.as_bytes())?;
        Ok(())
    }

    fn write_line_break(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
