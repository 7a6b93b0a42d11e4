//! Offset to row/column lookups.

/// A position in the source text. `row` and `column` are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub row: usize,
    pub column: usize,
}

impl Location {
    /// 1-based line number, as shown to users.
    pub fn line(&self) -> usize {
        self.row + 1
    }
}

/// Index of line breaks in a piece of text.
///
/// Built once per parsed document so that spans can be reported as lines
/// without keeping the text around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets of each `\n`.
    line_breaks: Vec<usize>,
    total_length: usize,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let line_breaks = content
            .char_indices()
            .filter_map(|(idx, ch)| (ch == '\n').then_some(idx))
            .collect();

        LineIndex {
            line_breaks,
            total_length: content.len(),
        }
    }

    /// Convert a byte offset to a [`Location`].
    ///
    /// Returns `None` if the offset is past the end of the text.
    pub fn location(&self, offset: usize) -> Option<Location> {
        if offset > self.total_length {
            return None;
        }

        // A newline belongs to the line it terminates.
        let row = match self.line_breaks.binary_search(&offset) {
            Ok(idx) | Err(idx) => idx,
        };

        let line_start = if row == 0 {
            0
        } else {
            self.line_breaks[row - 1] + 1
        };

        Some(Location {
            offset,
            row,
            column: offset - line_start,
        })
    }

    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }
}
