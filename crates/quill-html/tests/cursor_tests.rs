//! Integration tests for the input cursor.

use quill_html::{Cursor, SourcePosition};

#[test]
fn test_starts_at_line_one_column_one() {
    let cursor = Cursor::new("abc");
    assert_eq!(cursor.position(), SourcePosition::default());
    assert_eq!(cursor.position().line, 1);
    assert_eq!(cursor.position().column, 1);
}

#[test]
fn test_read_advances_and_stops_at_end() {
    let mut cursor = Cursor::new("ab");
    assert_eq!(cursor.read(), Some('a'));
    assert_eq!(cursor.read(), Some('b'));
    assert!(cursor.is_eof());
    assert_eq!(cursor.read(), None);
}

#[test]
fn test_peek_does_not_consume() {
    let mut cursor = Cursor::new("xyz");
    assert_eq!(cursor.peek(), Some('x'));
    assert_eq!(cursor.peek_nth(2), Some('z'));
    assert_eq!(cursor.peek_nth(3), None);
    assert_eq!(cursor.read(), Some('x'));
}

#[test]
fn test_lone_cr_becomes_lf() {
    let mut cursor = Cursor::new("a\rb\r\n");
    assert_eq!(cursor.input(), "a\nb\n");
    let _ = cursor.read_until('b');
    assert_eq!(cursor.position().line, 2);
    assert_eq!(cursor.position().column, 1);
}

#[test]
fn test_columns_count_characters_not_bytes() {
    let mut cursor = Cursor::new("é→x");
    let _ = cursor.read_until('x');
    assert_eq!(cursor.position().column, 3);
    assert_eq!(cursor.position().offset, "é→".len());
    assert_eq!(cursor.remaining(), "x");
}

#[test]
fn test_matches_literal_consumes_only_on_match() {
    let mut cursor = Cursor::new("--x");
    assert!(!cursor.matches_literal("-->"));
    assert_eq!(cursor.remaining(), "--x");
    assert!(cursor.matches_literal("--"));
    assert_eq!(cursor.remaining(), "x");
}

#[test]
fn test_case_insensitive_literal() {
    let mut cursor = Cursor::new("DocType html");
    assert!(cursor.matches_literal_ignore_ascii_case("doctype"));
    assert_eq!(cursor.remaining(), " html");
    assert!(!cursor.matches_literal_ignore_ascii_case("public"));
}

#[test]
fn test_save_and_restore() {
    let mut cursor = Cursor::new("abcdef");
    let _ = cursor.read();
    cursor.save();
    let _ = cursor.read_until('e');
    assert_eq!(cursor.remaining(), "ef");
    cursor.restore();
    assert_eq!(cursor.remaining(), "bcdef");
    assert_eq!(cursor.position().column, 2);
}

#[test]
fn test_literal_longer_than_input() {
    let mut cursor = Cursor::new("<!-");
    assert!(!cursor.matches_literal_ignore_ascii_case("<!--x"));
    assert_eq!(cursor.remaining(), "<!-");
}
