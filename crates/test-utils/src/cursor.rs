//! Caret extraction for IDE feature tests.
//!
//! Mapper sources are full of `*` (`SELECT *`) and `$` (`${...}`), so the
//! caret is marked with `$0`.

use mapper_types::Position;

pub const CURSOR_MARKER: &str = "$0";

/// Remove the `$0` marker and return the clean source, the caret position
/// and its byte offset.
///
/// # Panics
///
/// Panics if the input does not contain exactly one marker.
pub fn extract_cursor(input: &str) -> (String, Position, usize) {
    let marker_count = input.matches(CURSOR_MARKER).count();
    assert!(
        marker_count == 1,
        "extract_cursor: input must contain exactly one '{CURSOR_MARKER}' marker, found {marker_count}"
    );

    let offset = input.find(CURSOR_MARKER).unwrap_or_default();
    let before = &input[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let character = offset - line_start;

    let source = input.replacen(CURSOR_MARKER, "", 1);
    let position = Position::new(
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(character).unwrap_or(u32::MAX),
    );
    (source, position, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cursor_single_line() {
        let (source, pos, offset) = extract_cursor("WHERE id = #{user.na$0}");
        assert_eq!(source, "WHERE id = #{user.na}");
        assert_eq!(pos, Position::new(0, 20));
        assert_eq!(offset, 20);
    }

    #[test]
    fn test_extract_cursor_multiline() {
        let (source, pos, offset) = extract_cursor("<select>\n  ${$0\n</select>");
        assert_eq!(source, "<select>\n  ${\n</select>");
        assert_eq!(pos, Position::new(1, 4));
        assert_eq!(offset, 13);
    }

    #[test]
    #[should_panic(expected = "found 0")]
    fn test_extract_cursor_no_marker() {
        extract_cursor("SELECT * FROM users");
    }
}
