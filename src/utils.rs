//! Offset and line helpers shared by the scanner and the report
//!
//! All offsets are byte offsets into the source text. Helpers never slice
//! inside a multi-byte character, so Chinese comments in component files
//! don't cause panics.

/// Byte offset of the first character of the line containing `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(text, offset.min(text.len()));
    text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// 1-based line number of `offset`.
pub fn line_number(text: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(text, offset.min(text.len()));
    text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Leading spaces and tabs of a line.
pub fn leading_indent(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Largest char boundary at or before `index`.
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut end = index;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Single-line preview of a snippet for logs and reports, truncated at a
/// char boundary with an ellipsis.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.trim().replace('\n', "\\n");
    if flat.len() <= max_bytes {
        flat
    } else {
        format!("{}...", &flat[..floor_char_boundary(&flat, max_bytes)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_start_first_line() {
        assert_eq!(line_start("abc\ndef", 2), 0);
    }

    #[test]
    fn test_line_start_later_line() {
        let text = "abc\n  def\n";
        assert_eq!(line_start(text, 6), 4);
        assert_eq!(line_start(text, 4), 4);
    }

    #[test]
    fn test_line_number() {
        let text = "a\nb\nc";
        assert_eq!(line_number(text, 0), 1);
        assert_eq!(line_number(text, 2), 2);
        assert_eq!(line_number(text, 4), 3);
        assert_eq!(line_number(text, 100), 3);
    }

    #[test]
    fn test_leading_indent() {
        assert_eq!(leading_indent("    foo() {"), "    ");
        assert_eq!(leading_indent("\t bar"), "\t ");
        assert_eq!(leading_indent("baz"), "");
        assert_eq!(leading_indent("   "), "   ");
    }

    #[test]
    fn test_floor_char_boundary_multibyte() {
        // '订' is 3 bytes
        let s = "a订b";
        assert_eq!(floor_char_boundary(s, 1), 1);
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 3), 1);
        assert_eq!(floor_char_boundary(s, 4), 4);
    }

    #[test]
    fn test_line_start_inside_multibyte() {
        let s = "// 订单\n  x";
        assert_eq!(line_start(s, 4), 0);
    }

    #[test]
    fn test_preview_short() {
        assert_eq!(preview("  reset() {\n", 40), "reset() {");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("handleSearch(page, otherParams)", 12), "handleSearch...");
    }

    #[test]
    fn test_preview_utf8() {
        assert_eq!(preview("我发出的订单", 4), "我...");
    }
}
