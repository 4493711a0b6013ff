//! Integration tests for the HTML tokenizer.

use quill_html::{HTMLTokenizer, ParseErrorKind, Token, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).collect()
}

/// Tokenize and return only the error codes, in order.
fn error_kinds(input: &str) -> Vec<ParseErrorKind> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let _ = tokenizer.by_ref().count();
    tokenizer.take_errors().into_iter().map(|e| e.kind).collect()
}

/// Concatenate every character token.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "bar");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "baz");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "disabled");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes[0].name, "type");
            assert_eq!(attributes[0].value, "text");
            assert_eq!(attributes[1].name, "id");
            assert_eq!(attributes[1].value, "name");
            assert_eq!(attributes[2].name, "disabled");
            assert_eq!(attributes[2].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>"#;
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    // Count tag tokens
    let start_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .collect();
    let end_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .collect();

    assert_eq!(start_tags.len(), 4); // html, head, title, body
    assert_eq!(end_tags.len(), 4); // /title, /head, /body, /html
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize("<style>body { color: red; }</style>");

    // Should have: <style>, characters for content, </style>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));

    // Collect the character content
    let content = text_of(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "body { color: red; }");

    // Last tokens should be </style> and EOF
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_title_element_rcdata() {
    // Title content should be treated as RCDATA (raw text, but character references are parsed)
    let tokens = tokenize("<title>My Page</title>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "title"));

    let content = text_of(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "My Page");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_style_with_fake_tags() {
    // Tags inside style should NOT be parsed as tags
    let tokens = tokenize("<style><div>not a tag</div></style>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));

    let content = text_of(&tokens[1..tokens.len() - 2]);

    // The <div> and </div> should appear as literal text, not as tags
    assert_eq!(content, "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_title_with_less_than() {
    // Less-than signs in title should be emitted as characters
    let tokens = tokenize("<title>a < b</title>");

    let content = text_of(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "a < b");
}

#[test]
fn test_style_with_wrong_end_tag() {
    // </notastyle> inside style should NOT close the style element
    let tokens = tokenize("<style>a</notastyle>b</style>");

    let content = text_of(&tokens[1..tokens.len() - 2]);

    // The </notastyle> should appear as literal text
    assert_eq!(content, "a</notastyle>b");
}

#[test]
fn test_textarea_element_rcdata() {
    let tokens = tokenize("<textarea><b>bold?</b></textarea>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "textarea"));

    let content = text_of(&tokens[1..tokens.len() - 2]);

    // Content should be literal text, not parsed tags
    assert_eq!(content, "<b>bold?</b>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_xmp_element_rawtext() {
    let tokens = tokenize("<xmp><html>is text</html></xmp>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "xmp"));

    let content = text_of(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "<html>is text</html>");
}

#[test]
fn test_iframe_element_rawtext() {
    let tokens = tokenize("<iframe>some content</iframe>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "iframe"));

    let content = text_of(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "some content");
}

#[test]
fn test_character_reference_bare_ampersand() {
    // [§ 13.2.5.72 Character reference state]
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    // Should be: 'a', ' ', '&', ' ', 'b', EOF
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[0], Token::Character { data: 'a' }));
    assert!(matches!(tokens[1], Token::Character { data: ' ' }));
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert!(matches!(tokens[3], Token::Character { data: ' ' }));
    assert!(matches!(tokens[4], Token::Character { data: 'b' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_named_character_reference_amp() {
    // [§ 13.2.5.73 Named character reference state]
    // &amp; should be replaced with &
    let tokens = tokenize("a &amp; b");
    let content = text_of(&tokens);
    assert_eq!(content, "a & b");
}

#[test]
fn test_named_character_reference_lt_gt() {
    // &lt; and &gt; should be replaced with < and >
    let tokens = tokenize("&lt;div&gt;");
    let content = text_of(&tokens);
    assert_eq!(content, "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon should still work
    let tokens = tokenize("&amp is ok");
    let content = text_of(&tokens);
    assert_eq!(content, "& is ok");
}

#[test]
fn test_named_character_reference_unknown() {
    // Unknown entities should be passed through as-is
    let tokens = tokenize("&notreal;");
    let content = text_of(&tokens);
    // The ampersand and entity name should be emitted as characters
    assert_eq!(content, "&notreal;");
}

#[test]
fn test_named_character_reference_in_attribute() {
    // Entities in attribute values should be replaced
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?a=1&b=2");
        }
        _ => panic!("Expected StartTag token"),
    }
}

// ========== Input preprocessing ==========

#[test]
fn test_crlf_is_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

#[test]
fn test_null_in_data_is_emitted_with_error() {
    let tokens = tokenize("a\0b");
    assert_eq!(text_of(&tokens), "a\0b");
    assert_eq!(error_kinds("a\0b"), vec![ParseErrorKind::UnexpectedNullCharacter]);
}

#[test]
fn test_exactly_one_end_of_file() {
    let mut tokenizer = HTMLTokenizer::new("<p>x");
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let eofs = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndOfFile))
        .count();
    assert_eq!(eofs, 1);
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_empty_input_is_just_end_of_file() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

// ========== Tag and attribute edge cases ==========

#[test]
fn test_names_are_lowercased() {
    let tokens = tokenize("<DIV ID=Main>");
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(tokens[0].attribute("id"), Some("Main"));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize("<a x=1 x=2>");
    let attributes = tokens[0].attributes();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].value, "1");
    assert_eq!(error_kinds("<a x=1 x=2>"), vec![ParseErrorKind::DuplicateAttribute]);
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    assert_eq!(error_kinds("</p class=x>"), vec![ParseErrorKind::EndTagWithAttributes]);
    assert_eq!(error_kinds("</p/>"), vec![ParseErrorKind::EndTagWithTrailingSolidus]);
}

#[test]
fn test_missing_end_tag_name_emits_nothing() {
    let tokens = tokenize("a</>b");
    assert_eq!(text_of(&tokens), "ab");
    assert_eq!(error_kinds("a</>b"), vec![ParseErrorKind::MissingEndTagName]);
}

#[test]
fn test_less_than_at_eof_is_text() {
    let tokens = tokenize("a<");
    assert_eq!(text_of(&tokens), "a<");
    assert_eq!(error_kinds("a<"), vec![ParseErrorKind::EofBeforeTagName]);
}

#[test]
fn test_less_than_before_digit_is_text() {
    let tokens = tokenize("1<2");
    assert_eq!(text_of(&tokens), "1<2");
    assert_eq!(
        error_kinds("1<2"),
        vec![ParseErrorKind::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn test_question_mark_opens_bogus_comment() {
    let tokens = tokenize("<?xml version?>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "?xml version?".to_string()
        }
    );
    assert_eq!(
        error_kinds("<?xml version?>"),
        vec![ParseErrorKind::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

// ========== Comments ==========

#[test]
fn test_abrupt_empty_comment() {
    let tokens = tokenize("<!-->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: String::new()
        }
    );
    assert_eq!(
        error_kinds("<!-->"),
        vec![ParseErrorKind::AbruptClosingOfEmptyComment]
    );
}

#[test]
fn test_eof_in_comment_emits_comment() {
    let tokens = tokenize("<!-- open");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: " open".to_string()
        }
    );
    assert!(matches!(tokens[1], Token::EndOfFile));
    assert_eq!(error_kinds("<!-- open"), vec![ParseErrorKind::EofInComment]);
}

// ========== DOCTYPE ==========

#[test]
fn test_doctype_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_identifier: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    assert!(matches!(
        tokens[0],
        Token::Doctype {
            name: None,
            force_quirks: true,
            ..
        }
    ));
    assert_eq!(error_kinds("<!DOCTYPE>"), vec![ParseErrorKind::MissingDoctypeName]);
}

// ========== Numeric character references ==========

#[test]
fn test_decimal_and_hex_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X43;")), "ABC");
}

#[test]
fn test_windows_1252_replacement() {
    assert_eq!(text_of(&tokenize("&#128;")), "\u{20AC}");
    assert_eq!(
        error_kinds("&#128;"),
        vec![ParseErrorKind::ControlCharacterReference]
    );
}

#[test]
fn test_null_and_out_of_range_references() {
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(error_kinds("&#0;"), vec![ParseErrorKind::NullCharacterReference]);
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
    assert_eq!(
        error_kinds("&#x110000;"),
        vec![ParseErrorKind::CharacterReferenceOutsideUnicodeRange]
    );
    assert_eq!(text_of(&tokenize("&#xD800;")), "\u{FFFD}");
    assert_eq!(
        error_kinds("&#xD800;"),
        vec![ParseErrorKind::SurrogateCharacterReference]
    );
}

#[test]
fn test_numeric_reference_without_digits() {
    assert_eq!(text_of(&tokenize("&#;")), "&#;");
    assert_eq!(
        error_kinds("&#;"),
        vec![ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference]
    );
}

#[test]
fn test_numeric_reference_missing_semicolon() {
    assert_eq!(text_of(&tokenize("&#65x")), "Ax");
    assert_eq!(
        error_kinds("&#65x"),
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

// ========== Named character references: longest match ==========

#[test]
fn test_longest_named_reference_wins() {
    assert_eq!(text_of(&tokenize("&notin;")), "\u{2209}");
    // "notit;" is not a name; the legacy "not" matches and "it;" is text.
    assert_eq!(text_of(&tokenize("&notit;")), "\u{00AC}it;");
    assert_eq!(
        error_kinds("&notit;"),
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_two_code_point_reference() {
    assert_eq!(text_of(&tokenize("&NotEqualTilde;")), "\u{2242}\u{0338}");
}

#[test]
fn test_legacy_reference_in_attribute_before_equals_is_literal() {
    let tokens = tokenize(r#"<a href="?x=1&not=2&notin;">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?x=1&not=2\u{2209}"));
}

#[test]
fn test_legacy_reference_in_attribute_before_alnum_is_literal() {
    let tokens = tokenize("<a title='&ampx'>");
    assert_eq!(tokens[0].attribute("title"), Some("&ampx"));
}

#[test]
fn test_unknown_named_reference_with_semicolon_is_an_error() {
    assert_eq!(
        error_kinds("&notreal;"),
        vec![ParseErrorKind::UnknownNamedCharacterReference]
    );
}

// ========== Script data and PLAINTEXT ==========

#[test]
fn test_script_double_escape() {
    let tokens = tokenize("<script><!--<script></script>--></script>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "script"));
    assert_eq!(
        text_of(&tokens[1..tokens.len() - 2]),
        "<!--<script></script>-->"
    );
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_script_end_tag_is_case_insensitive() {
    let tokens = tokenize("<script>if (a<b) {}</SCRIPT>");
    assert_eq!(text_of(&tokens), "if (a<b) {}");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize("<plaintext><b></plaintext>");
    assert_eq!(text_of(&tokens), "<b></plaintext>");
}

#[test]
fn test_content_model_switching_can_be_disabled() {
    let tokens: Vec<Token> = HTMLTokenizer::new("<style><b></style>")
        .with_content_model_switching(false)
        .collect();
    assert_eq!(tokens[1].tag_name(), Some("b"));
}

#[test]
fn test_switch_to_with_last_start_tag() {
    let mut tokenizer = HTMLTokenizer::new("a</b></title>").with_content_model_switching(false);
    tokenizer.switch_to(TokenizerState::RCDATA);
    tokenizer.set_last_start_tag(Some("title"));
    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&tokens), "a</b>");
    assert_eq!(tokens[tokens.len() - 2].tag_name(), Some("title"));
}

// ========== CDATA ==========

#[test]
fn test_cdata_outside_foreign_content_is_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "[CDATA[x]]".to_string()
        }
    );
    assert_eq!(
        error_kinds("<![CDATA[x]]>"),
        vec![ParseErrorKind::CdataInHtmlContent]
    );
}

#[test]
fn test_cdata_in_foreign_content_is_text() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[a<b]]]>");
    tokenizer.set_cdata_allowed(true);
    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&tokens), "a<b]");
}

// ========== Error positions ==========

#[test]
fn test_error_position_is_line_and_column() {
    let mut tokenizer = HTMLTokenizer::new("ab\n&#0;");
    let _ = tokenizer.by_ref().count();
    let errors = tokenizer.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position.line, 2);
    assert!(tokenizer.errors().is_empty());
}

// ========== Properties ==========

#[quickcheck_macros::quickcheck]
fn prop_tokenizing_ends_with_one_end_of_file(input: String) -> bool {
    let tokens = tokenize(&input);
    tokens.last() == Some(&Token::EndOfFile)
        && tokens
            .iter()
            .filter(|t| matches!(t, Token::EndOfFile))
            .count()
            == 1
}

#[quickcheck_macros::quickcheck]
fn prop_plain_text_round_trips(input: String) -> bool {
    // Text with no markup or references comes out unchanged.
    let plain: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '&' | '\r' | '\0'))
        .collect();
    text_of(&tokenize(&plain)) == plain
}

#[test]
fn test_markup_inside_script_is_text() {
    let tokens = tokenize(r#"<script>var x = "<notscript>";</script>"#);
    assert_eq!(text_of(&tokens), r#"var x = "<notscript>";"#);
    assert!(
        !tokens
            .iter()
            .any(|t| t.tag_name() == Some("notscript"))
    );
}

#[test]
fn test_legacy_reference_in_text_honors_match() {
    assert_eq!(text_of(&tokenize("&ampx")), "&x");
    assert_eq!(
        error_kinds("&ampx"),
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_bang_without_dashes_is_bogus_comment() {
    let tokens = tokenize("<!bogus>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "bogus".to_string()
        }
    );
    assert_eq!(
        error_kinds("<!bogus>"),
        vec![ParseErrorKind::IncorrectlyOpenedComment]
    );
}
