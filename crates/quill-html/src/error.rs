//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not. Certain points in the parsing
//! algorithm are said to be parse errors. The error handling for parse errors
//! is well-defined."
//!
//! Errors are values handed to a [`ParseErrorSink`]; reporting one never
//! changes what the tokenizer or tree constructor does next.

use core::fmt;

use quill_common::warning::warn_once_at;
use serde::Serialize;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::cursor::SourcePosition;

/// What went wrong. Tokenizer kinds display as the WHATWG error codes; tree
/// construction kinds use the same kebab-case style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorKind {
    // ===== Tokenizer (§ 13.2.2 table) =====
    /// `<!-->` or `<!--->`.
    AbruptClosingOfEmptyComment,
    /// `>` inside a DOCTYPE public identifier.
    AbruptDoctypePublicIdentifier,
    /// `>` inside a DOCTYPE system identifier.
    AbruptDoctypeSystemIdentifier,
    /// `&#` or `&#x` with no digits.
    AbsenceOfDigitsInNumericCharacterReference,
    /// `<![CDATA[` in HTML content.
    CdataInHtmlContent,
    /// Numeric reference above U+10FFFF.
    CharacterReferenceOutsideUnicodeRange,
    /// Numeric reference to a control character.
    ControlCharacterReference,
    /// The same attribute name twice on one tag.
    DuplicateAttribute,
    /// An end tag carrying attributes.
    EndTagWithAttributes,
    /// An end tag with a trailing `/`.
    EndTagWithTrailingSolidus,
    /// `<` or `</` at the end of input.
    EofBeforeTagName,
    /// End of input inside a CDATA section.
    EofInCdata,
    /// End of input inside a comment.
    EofInComment,
    /// End of input inside a DOCTYPE.
    EofInDoctype,
    /// End of input inside `<!--` in script data.
    EofInScriptHtmlCommentLikeText,
    /// End of input inside a tag.
    EofInTag,
    /// A comment closed by `--!>`.
    IncorrectlyClosedComment,
    /// `<!` not followed by `--`, `DOCTYPE` or `[CDATA[`.
    IncorrectlyOpenedComment,
    /// Garbage after the DOCTYPE name.
    InvalidCharacterSequenceAfterDoctypeName,
    /// `<` followed by something that cannot start a tag name.
    InvalidFirstCharacterOfTagName,
    /// `name=` followed directly by `>`.
    MissingAttributeValue,
    /// `<!DOCTYPE>` with no name.
    MissingDoctypeName,
    /// `PUBLIC` with no identifier.
    MissingDoctypePublicIdentifier,
    /// `SYSTEM` with no identifier.
    MissingDoctypeSystemIdentifier,
    /// `</>`.
    MissingEndTagName,
    /// DOCTYPE public identifier not quoted.
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// DOCTYPE system identifier not quoted.
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// A character reference not terminated by `;`.
    MissingSemicolonAfterCharacterReference,
    /// `PUBLIC"`.
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `SYSTEM"`.
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `<!DOCTYPEhtml>`.
    MissingWhitespaceBeforeDoctypeName,
    /// `a="1"b="2"`.
    MissingWhitespaceBetweenAttributes,
    /// Two DOCTYPE identifiers not separated by whitespace.
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `<!--` inside a comment.
    NestedComment,
    /// Numeric reference to a noncharacter.
    NoncharacterCharacterReference,
    /// `&#0;`.
    NullCharacterReference,
    /// Numeric reference to a surrogate.
    SurrogateCharacterReference,
    /// Garbage after the DOCTYPE system identifier.
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `"`, `'` or `<` in an attribute name.
    UnexpectedCharacterInAttributeName,
    /// `"`, `'`, `<`, `=` or `` ` `` in an unquoted attribute value.
    UnexpectedCharacterInUnquotedAttributeValue,
    /// `=` where an attribute name should start.
    UnexpectedEqualsSignBeforeAttributeName,
    /// U+0000 in the input.
    UnexpectedNullCharacter,
    /// `<?`.
    UnexpectedQuestionMarkInsteadOfTagName,
    /// `/` inside a tag not directly before `>`.
    UnexpectedSolidusInTag,
    /// `&name;` that is not a known reference.
    UnknownNamedCharacterReference,

    // ===== Tree construction (§ 13.2.6) =====
    /// No DOCTYPE before the first tag.
    MissingDoctype,
    /// A DOCTYPE that is not `<!DOCTYPE html>` or one of the allowed legacy forms.
    NonConformingDoctype,
    /// A DOCTYPE after the start of the document.
    UnexpectedDoctype,
    /// A start tag the current insertion mode does not allow.
    UnexpectedStartTag,
    /// An end tag that does not close anything, or closes the wrong thing.
    UnexpectedEndTag,
    /// Non-whitespace text where the insertion mode does not allow it.
    UnexpectedCharacter,
    /// End of input with elements still open that should have been closed.
    UnexpectedEof,
    /// An element was closed while unrelated elements were still open inside it.
    UnclosedElement,
    /// Formatting elements closed out of order.
    MisnestedTag,
    /// A trailing `/` on a start tag for a non-void HTML element.
    NonVoidHtmlElementStartTagWithTrailingSolidus,
}

impl ParseErrorKind {
    /// The kebab-case code, without allocating.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// One parse error: where it happened, what it was, and (for tree construction
/// errors) the tag name involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Input position at which the error was detected.
    pub position: SourcePosition,
    /// The error code.
    pub kind: ParseErrorKind,
    /// The tag name, for tag-related tree construction errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ParseError {
    /// A parse error with no detail.
    #[must_use]
    pub const fn new(position: SourcePosition, kind: ParseErrorKind) -> Self {
        Self {
            position,
            kind,
            detail: None,
        }
    }

    /// Attach the tag name (or other detail) the error is about.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Receives parse errors as they are found.
///
/// Parsing takes a `&mut dyn ParseErrorSink`; the sink only observes.
pub trait ParseErrorSink {
    /// Record one parse error.
    fn report(&mut self, error: ParseError);
}

/// Drops every error. The default for [`parse`](crate::parse).
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardParseErrors;

impl ParseErrorSink for DiscardParseErrors {
    fn report(&mut self, _error: ParseError) {}
}

/// Collects errors in order.
impl ParseErrorSink for Vec<ParseError> {
    fn report(&mut self, error: ParseError) {
        self.push(error);
    }
}

/// Forwards errors to the process-wide warning printer. Each error kind is
/// printed once, with the position (and tag) of its first occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarningSink;

impl ParseErrorSink for WarningSink {
    fn report(&mut self, error: ParseError) {
        let location = match &error.detail {
            Some(detail) => format!("{} ({detail})", error.position),
            None => error.position.to_string(),
        };
        warn_once_at("HTML Parser", error.kind.code(), &location);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_every_kind_has_a_distinct_kebab_case_code() {
        let mut seen = HashSet::new();
        for kind in ParseErrorKind::iter() {
            let code = kind.code();
            assert_eq!(code, kind.to_string());
            assert!(
                code.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "{code} is not kebab-case"
            );
            assert!(seen.insert(code), "{code} is used twice");
        }
        assert!(seen.contains("missing-semicolon-after-character-reference"));
        assert!(seen.contains("non-void-html-element-start-tag-with-trailing-solidus"));
    }

    #[test]
    fn test_serialized_kind_matches_code() {
        for kind in ParseErrorKind::iter() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }
}
