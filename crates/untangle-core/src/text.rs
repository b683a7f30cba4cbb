//! Line-to-character conversion over a text snapshot.

use crate::{CharInterval, LineInterval};

/// Converts 1-based line spans into 0-based character spans.
///
/// Supplied by the source-analysis front end; [`LineIndex`] implements it
/// for hosts that have the file text in memory.
pub trait LineToCharConverter {
    fn char_span(&self, lines: LineInterval) -> CharInterval;
}

/// Pre-computed line start offsets for a particular text snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    text_len: u32,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = Vec::with_capacity(128);
        line_starts.push(0);

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    line_starts.push((i + 1) as u32);
                    i += 1;
                }
                b'\r' => {
                    if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                        line_starts.push((i + 2) as u32);
                        i += 2;
                    } else {
                        line_starts.push((i + 1) as u32);
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }

        Self {
            line_starts,
            text_len: text.len() as u32,
        }
    }

    #[inline]
    pub fn text_len(&self) -> u32 {
        self.text_len
    }

    #[inline]
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Byte offset of the first character of a 1-based line, if it exists.
    #[inline]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        debug_assert!(line >= 1);
        self.line_starts.get(line as usize - 1).copied()
    }
}

impl LineToCharConverter for LineIndex {
    /// The span runs from the start of the first line to the character just
    /// before the start of the line after the last. When that next line does
    /// not exist the span is clamped to end-of-text.
    fn char_span(&self, lines: LineInterval) -> CharInterval {
        let first = self
            .line_start(lines.first())
            .unwrap_or_else(|| panic!("line {} out of bounds", lines.first()));
        let last = match self.line_start(lines.last() + 1) {
            Some(next_start) => next_start - 1,
            None => self.text_len.saturating_sub(1),
        };
        CharInterval::new(first, last.max(first))
    }
}
