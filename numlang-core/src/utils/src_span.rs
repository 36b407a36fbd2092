use std::{fmt::Display, ops::Range};

/// Byte offsets into the source, end exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
    pub fn from(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Empty span at `offset`.
    pub fn point(offset: u32) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl Display for SrcSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
