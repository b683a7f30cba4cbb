//! Closed interval types: 1-based line spans and 0-based character spans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed range of line numbers `[first, last]`, 1-based.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineInterval {
    first: u32,
    last: u32,
}

impl LineInterval {
    /// Panics if `first < 1` or `first > last`.
    pub fn new(first: u32, last: u32) -> Self {
        assert!(first >= 1, "line numbers are 1-based (got {first})");
        assert!(first <= last, "inverted line interval {first}..{last}");
        Self { first, last }
    }

    /// Interval starting at `first` and spanning `len` lines.
    ///
    /// Panics if `len == 0`.
    pub fn from_length(first: u32, len: u32) -> Self {
        assert!(len >= 1, "line interval must span at least one line");
        Self::new(first, first + len - 1)
    }

    #[inline]
    pub fn first(self) -> u32 {
        self.first
    }

    #[inline]
    pub fn last(self) -> u32 {
        self.last
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.last - self.first + 1
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        false // closed intervals always span at least one line
    }

    #[inline]
    pub fn intersects(self, other: LineInterval) -> bool {
        self.first <= other.last && other.first <= self.last
    }

    #[inline]
    pub fn contains(self, other: LineInterval) -> bool {
        self.first <= other.first && other.last <= self.last
    }

    #[inline]
    pub fn contains_line(self, line: u32) -> bool {
        self.first <= line && line <= self.last
    }

    /// Iterate the line numbers covered by this interval.
    pub fn lines(self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

impl fmt::Debug for LineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineInterval({}, {})", self.first, self.last)
    }
}

impl fmt::Display for LineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.last)
    }
}

/// A closed range of character offsets `[first, last]`, 0-based.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharInterval {
    first: u32,
    last: u32,
}

impl CharInterval {
    /// Panics if `first > last`.
    pub fn new(first: u32, last: u32) -> Self {
        assert!(first <= last, "inverted character interval {first}..{last}");
        Self { first, last }
    }

    /// Interval starting at `first` and spanning `len` characters.
    ///
    /// Panics if `len == 0`.
    pub fn from_length(first: u32, len: u32) -> Self {
        assert!(len >= 1, "character interval must span at least one character");
        Self::new(first, first + len - 1)
    }

    #[inline]
    pub fn first(self) -> u32 {
        self.first
    }

    #[inline]
    pub fn last(self) -> u32 {
        self.last
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.last - self.first + 1
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        false
    }

    #[inline]
    pub fn intersects(self, other: CharInterval) -> bool {
        self.first <= other.last && other.first <= self.last
    }

    #[inline]
    pub fn contains(self, other: CharInterval) -> bool {
        self.first <= other.first && other.last <= self.last
    }
}

impl fmt::Debug for CharInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharInterval({}, {})", self.first, self.last)
    }
}

impl fmt::Display for CharInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.last)
    }
}
