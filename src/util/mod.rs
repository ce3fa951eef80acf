mod line_reader;

pub use self::line_reader::LineReader;

use unicode_segmentation::UnicodeSegmentation;

/// The grapheme cluster boundaries of a single line, computed once so that
/// any number of offsets can be clamped against them cheaply.
///
/// # Examples
///
/// ```
/// use shcat::util::LineBoundaries;
///
/// let line = LineBoundaries::new("né!");
/// assert_eq!(line.clamp(2), 1);
/// assert_eq!(line.clamp(42), 4);
/// assert_eq!(line.slice(1, 99), "é!");
/// ```
pub struct LineBoundaries<'a> {
    line: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineBoundaries<'a> {
    pub fn new(line: &'a str) -> LineBoundaries<'a> {
        LineBoundaries{
            line,
            starts: line.grapheme_indices(true).map(|(index, _)| index).collect(),
        }
    }

    /// Clamps a byte offset so that it never exceeds the line's length
    /// and never lands inside of a grapheme cluster. Offsets that split a
    /// cluster are moved back to the cluster's start.
    pub fn clamp(&self, offset: usize) -> usize {
        if offset >= self.line.len() {
            return self.line.len()
        }

        match self.starts.binary_search(&offset) {
            Ok(index) => self.starts[index],
            Err(0) => 0,
            Err(index) => self.starts[index - 1],
        }
    }

    /// The line's text between two offsets, both clamped first.
    /// A start past the end yields an empty slice.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = self.clamp(end);
        let start = self.clamp(start).min(end);

        &self.line[start..end]
    }
}

/// Clamps a single byte offset into `line`. Prefer `LineBoundaries` when
/// clamping several offsets of the same line.
///
/// # Examples
///
/// ```
/// use shcat::util::clamp_offset;
///
/// assert_eq!(clamp_offset("scribe", 3), 3);
/// assert_eq!(clamp_offset("scribe", 42), 6);
/// assert_eq!(clamp_offset("né", 2), 1);
/// ```
pub fn clamp_offset(line: &str, offset: usize) -> usize {
    LineBoundaries::new(line).clamp(offset)
}
