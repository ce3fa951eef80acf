use std::io::BufRead;
use crate::errors::*;

/// A forward-only line reader over a buffered input source.
///
/// Lines are yielded without their `\n` or `\r\n` terminators. Data that
/// doesn't end with a terminator still yields its final line, but a trailing
/// terminator doesn't produce an extra empty line. Bytes that aren't valid
/// UTF-8 are replaced with U+FFFD rather than failing the read.
pub struct LineReader<R> {
    input: R,
    line_number: usize,
    done: bool
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> LineReader<R> {
        LineReader{
            input,
            line_number: 0,
            done: false
        }
    }

    /// The number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_next(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None)
        }

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        self.line_number += 1;

        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(error) => String::from_utf8_lossy(error.as_bytes()).into_owned(),
        };

        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }

        match self.read_next() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            },
            Err(error) => {
                // Read failures are fatal; don't try to keep going.
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
