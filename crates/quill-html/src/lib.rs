//! HTML tokenizer and tree constructor.
//!
//! # Scope
//!
//! This crate implements:
//! - **Input cursor** ([WHATWG § 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream))
//!   - Newline normalization, line/column positions, literal lookahead
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data escapes and CDATA
//!   - Named and numeric character references, backed by a prefix trie over
//!     the full named reference table
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes, the stack of open elements, the list of active
//!     formatting elements and the adoption agency algorithm
//!   - Foster parenting, template contents, quirks mode from the DOCTYPE
//!
//! # Not Yet Implemented
//!
//! - Fragment parsing with a context element
//! - The rules for parsing tokens in foreign content; descendants of `svg`
//!   and `math` are parsed as HTML
//! - Encoding sniffing (input is already a `&str`)

/// Position-tracking reader over the input.
pub mod cursor;
/// Parse errors and the sinks that receive them.
pub mod error;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use quill_common::warning::warn_once;
use quill_dom::DomTree;

pub use cursor::{Cursor, SourcePosition};
pub use error::{DiscardParseErrors, ParseError, ParseErrorKind, ParseErrorSink, WarningSink};
pub use parser::{HTMLParser, InsertionMode, format_tree, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState};

/// Parse `input` into a new Document, discarding parse errors.
///
/// `is_fragment` is reserved: fragment parsing needs a context element, which
/// this parser does not take, so the input is parsed as a whole document.
#[must_use]
pub fn parse(input: &str, is_fragment: bool) -> DomTree {
    parse_with_sink(input, is_fragment, &mut DiscardParseErrors)
}

/// Parse `input`, reporting every parse error to `sink`.
#[must_use]
pub fn parse_with_sink(input: &str, is_fragment: bool, sink: &mut dyn ParseErrorSink) -> DomTree {
    if is_fragment {
        warn_once(
            "HTML Parser",
            "fragment parsing without a context element is not supported; parsing as a document",
        );
    }
    HTMLParser::new(input, sink).run()
}

/// Parse `input` and collect the parse errors in the order they were found.
#[must_use]
pub fn parse_with_errors(input: &str, is_fragment: bool) -> (DomTree, Vec<ParseError>) {
    let mut errors = Vec::new();
    let tree = parse_with_sink(input, is_fragment, &mut errors);
    (tree, errors)
}
