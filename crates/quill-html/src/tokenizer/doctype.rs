//! DOCTYPE states.
//!
//! [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through
//! [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseErrorKind;

/// Which identifier a DOCTYPE state is reading.
#[derive(Clone, Copy)]
enum Identifier {
    Public,
    System,
}

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE"
            // "Switch to the before DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Reconsume in the before DOCTYPE name state."
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            // "EOF"
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an
            // end-of-file token."
            None => {
                self.current_token = Some(Token::new_doctype());
                self.eof_in_doctype();
            }
            // "Anything else"
            // "This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Create a new
            // DOCTYPE token. Set the token's name to a U+FFFD REPLACEMENT
            // CHARACTER character. Switch to the DOCTYPE name state."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.start_doctype_name('\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::MissingDoctypeName);
                let mut doctype = Token::new_doctype();
                doctype.set_force_quirks();
                self.current_token = Some(doctype);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.current_token = Some(Token::new_doctype());
                self.eof_in_doctype();
            }
            // "ASCII upper alpha"
            // "Create a new DOCTYPE token. Set the token's name to the lowercase
            // version of the current input character (add 0x0020 to the
            // character's code point). Switch to the DOCTYPE name state."
            // "Anything else"
            // "Create a new DOCTYPE token. Set the token's name to the current
            // input character. Switch to the DOCTYPE name state."
            Some(c) => self.start_doctype_name(c.to_ascii_lowercase()),
        }
    }

    fn start_doctype_name(&mut self, first: char) {
        let mut doctype = Token::new_doctype();
        doctype.append_to_doctype_name(first);
        self.current_token = Some(doctype);
        self.switch_to(TokenizerState::DOCTYPEName);
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "Switch to the after DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| token.append_to_doctype_name('\u{FFFD}'));
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                self.with_current_token(|token| token.append_to_doctype_name(c.to_ascii_lowercase()));
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        let current = self.current_input_character;
        match current {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            // "If the six characters starting from the current input character
            // are an ASCII case-insensitive match for the word "PUBLIC", then
            // consume those characters and switch to the after DOCTYPE public
            // keyword state."
            Some(c) if c.eq_ignore_ascii_case(&'p')
                && self.cursor.matches_literal_ignore_ascii_case("UBLIC") =>
            {
                self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
            }
            // "Otherwise, if the six characters starting from the current input
            // character are an ASCII case-insensitive match for the word
            // "SYSTEM", then consume those characters and switch to the after
            // DOCTYPE system keyword state."
            Some(c) if c.eq_ignore_ascii_case(&'s')
                && self.cursor.matches_literal_ignore_ascii_case("YSTEM") =>
            {
                self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
            }
            // "Otherwise, this is an invalid-character-sequence-after-doctype-name
            // parse error. Set the current DOCTYPE token's force-quirks flag to
            // on. Reconsume in the bogus DOCTYPE state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName);
                self.with_current_token(Token::set_force_quirks);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        self.handle_after_doctype_keyword(
            Identifier::Public,
            TokenizerState::BeforeDOCTYPEPublicIdentifier,
            ParseErrorKind::MissingWhitespaceAfterDoctypePublicKeyword,
        );
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        self.handle_after_doctype_keyword(
            Identifier::System,
            TokenizerState::BeforeDOCTYPESystemIdentifier,
            ParseErrorKind::MissingWhitespaceAfterDoctypeSystemKeyword,
        );
    }

    /// Both keyword states:
    ///
    /// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM
    /// FEED (FF), U+0020 SPACE: Switch to the before DOCTYPE public identifier
    /// state."
    ///
    /// "U+0022 QUOTATION MARK ("): This is a
    /// missing-whitespace-after-doctype-public-keyword parse error. Set the
    /// current DOCTYPE token's public identifier to the empty string (not
    /// missing), then switch to the DOCTYPE public identifier (double-quoted)
    /// state."
    ///
    /// The remaining entries match the before-identifier state.
    fn handle_after_doctype_keyword(
        &mut self,
        identifier: Identifier,
        before_identifier: TokenizerState,
        missing_whitespace: ParseErrorKind,
    ) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => self.switch_to(before_identifier),
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(missing_whitespace);
                self.start_doctype_identifier(identifier, quote);
            }
            _ => self.handle_before_doctype_identifier(identifier),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        self.handle_before_doctype_identifier(Identifier::Public);
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        self.handle_before_doctype_identifier(Identifier::System);
    }

    fn handle_before_doctype_identifier(&mut self, identifier: Identifier) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (")"
            // "Set the current DOCTYPE token's public identifier to the empty
            // string (not missing), then switch to the DOCTYPE public identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => self.start_doctype_identifier(identifier, quote),
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.log_parse_error(match identifier {
                    Identifier::Public => ParseErrorKind::MissingDoctypePublicIdentifier,
                    Identifier::System => ParseErrorKind::MissingDoctypeSystemIdentifier,
                });
                self.with_current_token(Token::set_force_quirks);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            // "Anything else"
            // "This is a missing-quote-before-doctype-public-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on.
            // Reconsume in the bogus DOCTYPE state."
            Some(_) => {
                self.log_parse_error(match identifier {
                    Identifier::Public => ParseErrorKind::MissingQuoteBeforeDoctypePublicIdentifier,
                    Identifier::System => ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier,
                });
                self.with_current_token(Token::set_force_quirks);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    fn start_doctype_identifier(&mut self, identifier: Identifier, quote: char) {
        let next = match (identifier, quote) {
            (Identifier::Public, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (Identifier::Public, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (Identifier::System, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (Identifier::System, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        };
        self.with_current_token(|token| match identifier {
            Identifier::Public => token.set_public_identifier_empty(),
            Identifier::System => token.set_system_identifier_empty(),
        });
        self.switch_to(next);
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        self.handle_doctype_identifier_quoted(
            Identifier::Public,
            quote,
            TokenizerState::AfterDOCTYPEPublicIdentifier,
        );
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        self.handle_doctype_identifier_quoted(
            Identifier::System,
            quote,
            TokenizerState::AfterDOCTYPESystemIdentifier,
        );
    }

    fn handle_doctype_identifier_quoted(
        &mut self,
        identifier: Identifier,
        quote: char,
        after: TokenizerState,
    ) {
        let append = |token: &mut Token, c: char| match identifier {
            Identifier::Public => token.append_to_public_identifier(c),
            Identifier::System => token.append_to_system_identifier(c),
        };
        match self.current_input_character {
            // "Switch to the after DOCTYPE public identifier state."
            Some(c) if c == quote => self.switch_to(after),
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| append(token, '\u{FFFD}'));
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an abrupt-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.log_parse_error(match identifier {
                    Identifier::Public => ParseErrorKind::AbruptDoctypePublicIdentifier,
                    Identifier::System => ParseErrorKind::AbruptDoctypeSystemIdentifier,
                });
                self.with_current_token(Token::set_force_quirks);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.with_current_token(|token| append(token, c)),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            // "Switch to the between DOCTYPE public and system identifiers state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE (')"
            // "This is a missing-whitespace-between-doctype-public-and-system-identifiers
            // parse error. Set the current DOCTYPE token's system identifier to the
            // empty string (not missing), then switch to the DOCTYPE system
            // identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(
                    ParseErrorKind::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.start_doctype_identifier(Identifier::System, quote);
            }
            _ => self.handle_between_doctype_public_and_system_identifiers_state(),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.start_doctype_identifier(Identifier::System, quote);
            }
            None => self.eof_in_doctype(),
            // "This is a missing-quote-before-doctype-system-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on.
            // Reconsume in the bogus DOCTYPE state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.with_current_token(Token::set_force_quirks);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does not
            // set the current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.log_parse_error(ParseErrorKind::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "This is an unexpected-null-character parse error. Ignore the character."
            Some('\0') => self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter),
            // "Emit the DOCTYPE token. Emit an end-of-file token."
            None => self.emit_token_then_eof(),
            Some(_) => {}
        }
    }

    /// "EOF: This is an eof-in-doctype parse error. Set the current DOCTYPE
    /// token's force-quirks flag to on. Emit the current DOCTYPE token. Emit
    /// an end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInDoctype);
        self.with_current_token(Token::set_force_quirks);
        self.emit_token_then_eof();
    }
}
