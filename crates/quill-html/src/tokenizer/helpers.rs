//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token")
//! - End tag helpers for the raw text states
//! - Attribute helpers for duplicate detection
//! - Parse error reporting

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::{ParseError, ParseErrorKind};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// The next character is consumed in `new_state`. The tree constructor
    /// calls this to move the tokenizer into RCDATA, RAWTEXT, script data or
    /// PLAINTEXT after inserting the matching element.
    pub const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// NOTE: the tokenizer never sees CR, the cursor normalizes it away.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// Apply `f` to the current token, if there is one.
    pub(super) fn with_current_token(&mut self, f: impl FnOnce(&mut Token)) {
        if let Some(token) = self.current_token.as_mut() {
            f(token);
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token"
    ///
    /// "When a start tag token is emitted with its self-closing flag set, if
    /// the flag is not acknowledged when it is processed by the tree
    /// construction stage, that is a parse error." That check belongs to the
    /// tree constructor; here the token only leaves the tokenizer.
    pub(super) fn emit_token(&mut self) {
        if self.current_attribute_is_duplicate {
            self.current_attribute_is_duplicate = false;
            self.with_current_token(Token::remove_current_attribute);
        }
        let Some(token) = self.current_token.take() else {
            return;
        };
        match &token {
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
                if self.content_model_switching {
                    self.switch_content_model(name);
                }
            }
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            // "When an end tag token is emitted with its self-closing flag set,
            // that is an end-tag-with-trailing-solidus parse error."
            Token::EndTag {
                self_closing,
                attributes,
                ..
            } => {
                if !attributes.is_empty() {
                    self.log_parse_error(ParseErrorKind::EndTagWithAttributes);
                }
                if *self_closing {
                    self.log_parse_error(ParseErrorKind::EndTagWithTrailingSolidus);
                }
            }
            _ => {}
        }
        self.token_stream.push_back(token);
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// Without a tree constructor attached, apply the content model the
    /// tree constructor would set for these start tags.
    fn switch_content_model(&mut self, name: &str) {
        match name {
            // [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
            // "Switch the tokenizer to the RCDATA state."
            "title" | "textarea" => self.switch_to(TokenizerState::RCDATA),
            // [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
            // "Switch the tokenizer to the RAWTEXT state."
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                self.switch_to(TokenizerState::RAWTEXT);
            }
            // "Switch the tokenizer to the script data state."
            "script" => self.switch_to(TokenizerState::ScriptData),
            // "Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => self.switch_to(TokenizerState::PLAINTEXT),
            _ => {}
        }
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.token_stream.push_back(Token::new_character(c));
    }

    /// Emit one character token per character of `s`.
    pub(super) fn emit_characters(&mut self, s: &str) {
        self.token_stream.extend(s.chars().map(Token::new_character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push_back(Token::new_eof());
        self.at_eof = true;
    }

    /// Emit the current token (a comment or DOCTYPE cut short by the end of
    /// input), then an end-of-file token.
    pub(super) fn emit_token_then_eof(&mut self) {
        self.emit_token();
        self.emit_eof_token();
    }
}

// =============================================================================
// RCDATA/RAWTEXT/Script Data End Tag Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// RCDATA state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text: TokenizerState) {
        // STEP 1: "Emit a U+003C LESS-THAN SIGN character token"
        // STEP 2: "Emit a U+002F SOLIDUS character token"
        self.emit_characters("</");
        // STEP 3: "Emit a character token for each of the characters in the temporary buffer"
        let buffer = core::mem::take(&mut self.temporary_buffer);
        self.emit_characters(&buffer);
        // STEP 4: Discard the current end tag token
        self.current_token = None;
        // STEP 5: "Reconsume in the RCDATA state"
        self.reconsume_in(text);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token." A pending duplicate
    /// is dropped first, so it never shadows the new attribute.
    pub(super) fn start_new_attribute(&mut self) {
        if self.current_attribute_is_duplicate {
            self.current_attribute_is_duplicate = false;
            self.with_current_token(Token::remove_current_attribute);
        }
        self.with_current_token(Token::start_new_attribute);
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// The attribute is only marked here: its value is still being read and
    /// must not spill into the attribute before it.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.log_parse_error(ParseErrorKind::DuplicateAttribute);
            self.current_attribute_is_duplicate = true;
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a parse error at the current input position. Parse errors are
    /// not fatal: the state machine recovers and continues.
    pub(super) fn log_parse_error(&mut self, kind: ParseErrorKind) {
        self.errors
            .push(ParseError::new(self.cursor.position(), kind));
    }
}
