use mapper_types::Position;

/// Line start table for converting between byte offsets and positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Create a new line index from source text
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];

        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Convert a byte offset to a line/column position (0-based)
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));

        let col = offset - self.line_starts[line];
        (line, col)
    }

    /// Convert a byte offset to an editor [`Position`].
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let (line, col) = self.line_col(offset.min(self.len));
        Position::new(
            u32::try_from(line).unwrap_or(u32::MAX),
            u32::try_from(col).unwrap_or(u32::MAX),
        )
    }

    /// Convert an editor [`Position`] to a byte offset.
    ///
    /// Returns `None` when the position lies past the end of its line.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.len, |next| next - 1);
        let offset = start + position.character as usize;
        (offset <= end).then_some(offset)
    }

    /// Get the byte offset of the start of a line
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Get the number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("<mapper>\n  <select/>\n</mapper>");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), (0, 0));
        assert_eq!(index.line_col(11), (1, 2));
        assert_eq!(index.line_start(2), Some(21));
    }

    #[test]
    fn test_offset_round_trip_on_second_line() {
        let text = "ab\ncdef\n";
        let index = LineIndex::new(text);
        let offset = index.offset(Position::new(1, 2)).unwrap();
        assert_eq!(&text[offset..=offset], "e");
        assert_eq!(index.position(offset), Position::new(1, 2));
    }

    #[test]
    fn test_offset_past_line_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(0, 2)), Some(2));
        assert_eq!(index.offset(Position::new(0, 3)), None);
        assert_eq!(index.offset(Position::new(1, 2)), Some(5));
        assert_eq!(index.offset(Position::new(5, 0)), None);
    }
}
