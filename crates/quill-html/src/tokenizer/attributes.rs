//! Attribute and self-closing states.
//!
//! [§ 13.2.5.32](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
//! to [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseErrorKind;

impl HTMLTokenizer {
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    pub(super) fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE"
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF"
            // "Reconsume in the after attribute name state."
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=)"
            // "This is an unexpected-equals-sign-before-attribute-name parse
            // error. Start a new attribute in the current tag token. Set that
            // attribute's name to the current input character, and its value to
            // the empty string. Switch to the attribute name state."
            Some('=') => {
                self.log_parse_error(ParseErrorKind::UnexpectedEqualsSignBeforeAttributeName);
                self.start_new_attribute();
                self.with_current_token(|token| token.append_to_current_attribute_name('='));
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else"
            // "Start a new attribute in the current tag token. Set that attribute
            // name and value to the empty string. Reconsume in the attribute name
            // state."
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    pub(super) fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE, U+002F SOLIDUS (/),
            // U+003E GREATER-THAN SIGN (>), EOF"
            // "Reconsume in the after attribute name state."
            Some('/' | '>') | None => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some(c) if Self::is_whitespace_char(c) => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=)"
            // "Switch to the before attribute value state."
            Some('=') => {
                self.check_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD
            // REPLACEMENT CHARACTER character to the current attribute's name."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_current_attribute_name('\u{FFFD}'));
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<)"
            // "This is an unexpected-character-in-attribute-name parse error.
            // Treat it as per the "anything else" entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_parse_error(ParseErrorKind::UnexpectedCharacterInAttributeName);
                self.with_current_token(|token| token.append_to_current_attribute_name(c));
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the
            // current attribute's name."
            // "Anything else"
            // "Append the current input character to the current attribute's name."
            Some(c) => {
                self.with_current_token(|token| {
                    token.append_to_current_attribute_name(c.to_ascii_lowercase());
                });
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    pub(super) fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/)"
            // "Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003D EQUALS SIGN (=)"
            // "Switch to the before attribute value state."
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_tag(),
            // "Anything else"
            // "Start a new attribute in the current tag token. Set that attribute
            // name and value to the empty string. Reconsume in the attribute name
            // state."
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    pub(super) fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (")"
            // "Switch to the attribute value (double-quoted) state."
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            // "U+0027 APOSTROPHE (')"
            // "Switch to the attribute value (single-quoted) state."
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-attribute-value parse error. Switch to the data
            // state. Emit the current tag token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::MissingAttributeValue);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "Anything else"
            // "Reconsume in the attribute value (unquoted) state."
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    pub(super) fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            // "U+0022 QUOTATION MARK (")"
            // "Switch to the after attribute value (quoted) state."
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            // "U+0026 AMPERSAND (&)"
            // "Set the return state to the attribute value (double-quoted) state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = self.state;
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD
            // REPLACEMENT CHARACTER character to the current attribute's value."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_current_attribute_value('\u{FFFD}'));
            }
            None => self.eof_in_tag(),
            // "Anything else"
            // "Append the current input character to the current attribute's value."
            Some(c) => {
                self.with_current_token(|token| token.append_to_current_attribute_value(c));
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    pub(super) fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            // "Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+0026 AMPERSAND (&)"
            // "Set the return state to the attribute value (unquoted) state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = TokenizerState::AttributeValueUnquoted;
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_current_attribute_value('\u{FFFD}'));
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN
            // SIGN (<), U+003D EQUALS SIGN (=), U+0060 GRAVE ACCENT (`)"
            // "This is an unexpected-character-in-unquoted-attribute-value parse
            // error. Treat it as per the "anything else" entry below."
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.log_parse_error(ParseErrorKind::UnexpectedCharacterInUnquotedAttributeValue);
                self.with_current_token(|token| token.append_to_current_attribute_value(c));
            }
            None => self.eof_in_tag(),
            Some(c) => {
                self.with_current_token(|token| token.append_to_current_attribute_value(c));
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    pub(super) fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_tag(),
            // "Anything else"
            // "This is a missing-whitespace-between-attributes parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::MissingWhitespaceBetweenAttributes);
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    pub(super) fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Set the self-closing flag of the current tag token. Switch to the
            // data state. Emit the current tag token."
            Some('>') => {
                self.with_current_token(Token::set_self_closing);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_tag(),
            // "Anything else"
            // "This is an unexpected-solidus-in-tag parse error. Reconsume in the
            // before attribute name state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::UnexpectedSolidusInTag);
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// "EOF: This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The unfinished tag is dropped.
    fn eof_in_tag(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInTag);
        self.current_token = None;
        self.emit_eof_token();
    }
}
