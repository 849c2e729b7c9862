//! Text helpers for user-supplied free text.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_BEFORE_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+\n").expect("valid regex"));

/// Collapses CRLF and lone CR into LF, strips spaces and tabs that sit right
/// before a line break, and trims trailing blank lines and whitespace.
pub fn normalize_line_end_spacing(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = SPACE_BEFORE_NEWLINE.replace_all(&unified, "\n");
    stripped.trim_end().to_string()
}

/// Length as the user perceives it, in Unicode scalar values.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mixed_line_endings_collapse() {
        assert_eq!(normalize_line_end_spacing("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_trailing_spaces_before_newline_removed() {
        assert_eq!(normalize_line_end_spacing("hello  \nworld\t\n!"), "hello\nworld\n!");
    }

    #[test]
    fn test_trailing_blank_lines_trimmed() {
        assert_eq!(normalize_line_end_spacing("hello\n\n  \n\r\n"), "hello");
    }

    #[test]
    fn test_interior_blank_lines_kept() {
        assert_eq!(normalize_line_end_spacing("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len("\u{1F308}x"), 2);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "[a-z \t\r\n]{0,64}") {
            let once = normalize_line_end_spacing(&s);
            prop_assert_eq!(normalize_line_end_spacing(&once), once.clone());
            prop_assert!(!once.contains('\r'));
        }
    }
}
