// file: src/extractor/patterns.rs
// description: compiled patterns and line predicates for question extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "[5 marks]", "10 marks", "(2 Marks)", "3mark"; ASCII case folding only
    pub static ref MARKS_ANNOTATION: Regex = Regex::new(
        r"\[?([0-9]+)\s*(?i-u:marks?)\]?"
    ).expect("MARKS_ANNOTATION regex is valid");
}

/// A question marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMarker {
    /// Byte offset just past the digit run.
    pub number_end: usize,
    /// Byte offset just past the delimiter.
    pub content_start: usize,
}

pub fn is_marker_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '.' || c == ')'
}

/// Checks whether the line beginning at `line_start` opens with a digit run
/// followed directly by whitespace, `.` or `)`.
pub fn marker_at(text: &str, line_start: usize) -> Option<LineMarker> {
    let line = text.get(line_start..)?;
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    // digits are ASCII, so this index is a char boundary
    let delimiter = line[digits..].chars().next()?;
    if !is_marker_delimiter(delimiter) {
        return None;
    }

    Some(LineMarker {
        number_end: line_start + digits,
        content_start: line_start + digits + delimiter.len_utf8(),
    })
}

/// First marks annotation in `content`. Digit runs past `u64::MAX` saturate.
pub fn find_marks(content: &str) -> Option<u64> {
    let captures = MARKS_ANNOTATION.captures(content)?;
    let digits = captures.get(1)?.as_str();
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_delimiters() {
        assert!(marker_at("1. Explain", 0).is_some());
        assert!(marker_at("2) Describe", 0).is_some());
        assert!(marker_at("3 Assess", 0).is_some());
        assert!(marker_at("4\tEvaluate", 0).is_some());
        assert!(marker_at("5\nNext line", 0).is_some());
    }

    #[test]
    fn test_marker_rejects_non_delimited_digits() {
        assert!(marker_at("2nd question", 0).is_none());
        assert!(marker_at("20% of firms", 0).is_none());
        assert!(marker_at("12", 0).is_none());
        assert!(marker_at(" 1. indented", 0).is_none());
        assert!(marker_at("(a) part", 0).is_none());
        assert!(marker_at("", 0).is_none());
    }

    #[test]
    fn test_marker_offsets() {
        let text = "intro\n12. Body";
        let marker = marker_at(text, 6).unwrap();
        assert_eq!(&text[6..marker.number_end], "12");
        assert_eq!(&text[marker.content_start..], " Body");
    }

    #[test]
    fn test_marker_unicode_whitespace_delimiter() {
        let text = "7\u{00A0}Discuss";
        let marker = marker_at(text, 0).unwrap();
        assert_eq!(&text[marker.content_start..], "Discuss");
    }

    #[test]
    fn test_marks_pattern_variants() {
        assert_eq!(find_marks("Explain. [5 marks]"), Some(5));
        assert_eq!(find_marks("Explain. 10 marks"), Some(10));
        assert_eq!(find_marks("Explain. (2 Marks)"), Some(2));
        assert_eq!(find_marks("Explain. [1 MARK]"), Some(1));
        assert_eq!(find_marks("Explain. 4marks"), Some(4));
        assert_eq!(find_marks("Explain. [3]"), None);
    }

    #[test]
    fn test_marks_leading_zeros_and_overflow() {
        assert_eq!(find_marks("007 marks"), Some(7));
        assert_eq!(find_marks("5000000000 marks"), Some(5_000_000_000));
        assert_eq!(find_marks("99999999999999999999 marks"), Some(u64::MAX));
    }

    #[test]
    fn test_marks_word_folds_ascii_case_only() {
        assert_eq!(find_marks("[5 MARKS]"), Some(5));
        assert_eq!(find_marks("[5 mArK]"), Some(5));
        // KELVIN SIGN and long s fold to k and s under Unicode rules
        assert_eq!(find_marks("[5 mar\u{212A}]"), None);
        assert_eq!(find_marks("[5 mar\u{212A}s]"), None);
        assert_eq!(find_marks("[5 mark\u{017F}]"), Some(5));
        assert_eq!(find_marks("[5 \u{017F}marks]"), None);
    }

    #[test]
    fn test_marks_leftmost_wins() {
        assert_eq!(find_marks("Part a [2 marks], part b [6 marks]"), Some(2));
        assert_eq!(find_marks("In 2019 firms earned 15 marks of credit"), Some(15));
    }
}
