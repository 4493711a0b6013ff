//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through
//! [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use core::iter;

use super::core::{HTMLTokenizer, TokenizerState};
use super::named_character_references::reference_trie;
use crate::error::ParseErrorKind;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column."
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'), // EURO SIGN
    (0x82, '\u{201A}'), // SINGLE LOW-9 QUOTATION MARK
    (0x83, '\u{0192}'), // LATIN SMALL LETTER F WITH HOOK
    (0x84, '\u{201E}'), // DOUBLE LOW-9 QUOTATION MARK
    (0x85, '\u{2026}'), // HORIZONTAL ELLIPSIS
    (0x86, '\u{2020}'), // DAGGER
    (0x87, '\u{2021}'), // DOUBLE DAGGER
    (0x88, '\u{02C6}'), // MODIFIER LETTER CIRCUMFLEX ACCENT
    (0x89, '\u{2030}'), // PER MILLE SIGN
    (0x8A, '\u{0160}'), // LATIN CAPITAL LETTER S WITH CARON
    (0x8B, '\u{2039}'), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    (0x8C, '\u{0152}'), // LATIN CAPITAL LIGATURE OE
    (0x8E, '\u{017D}'), // LATIN CAPITAL LETTER Z WITH CARON
    (0x91, '\u{2018}'), // LEFT SINGLE QUOTATION MARK
    (0x92, '\u{2019}'), // RIGHT SINGLE QUOTATION MARK
    (0x93, '\u{201C}'), // LEFT DOUBLE QUOTATION MARK
    (0x94, '\u{201D}'), // RIGHT DOUBLE QUOTATION MARK
    (0x95, '\u{2022}'), // BULLET
    (0x96, '\u{2013}'), // EN DASH
    (0x97, '\u{2014}'), // EM DASH
    (0x98, '\u{02DC}'), // SMALL TILDE
    (0x99, '\u{2122}'), // TRADE MARK SIGN
    (0x9A, '\u{0161}'), // LATIN SMALL LETTER S WITH CARON
    (0x9B, '\u{203A}'), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    (0x9C, '\u{0153}'), // LATIN SMALL LIGATURE OE
    (0x9E, '\u{017E}'), // LATIN SMALL LETTER Z WITH CARON
    (0x9F, '\u{0178}'), // LATIN CAPITAL LETTER Y WITH DIAERESIS
];

fn c1_replacement(code: u32) -> Option<char> {
    C1_REPLACEMENTS
        .iter()
        .find(|&&(number, _)| number == code)
        .map(|&(_, replacement)| replacement)
}

/// [Infra § 4.6 Code points](https://infra.spec.whatwg.org/#noncharacter)
///
/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE == 0xFFFE && code <= 0x10_FFFF)
}

/// "A control is a C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive."
const fn is_control(code: u32) -> bool {
    matches!(code, 0x00..=0x1F | 0x7F..=0x9F)
}

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "A character reference is said to be consumed as part of an attribute
    /// if the return state is either the attribute value (double-quoted)
    /// state, the attribute value (single-quoted) state, or the attribute
    /// value (unquoted) state."
    const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "When a state says to flush code points consumed as a character
    /// reference, it means that for each code point in the temporary buffer
    /// (in the order they were added to the buffer) user agent must append
    /// the code point from the buffer to the current attribute's value if the
    /// character reference was consumed as part of an attribute, or emit the
    /// code point as a character token otherwise."
    fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = core::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            self.with_current_token(|token| {
                buffer.chars().for_each(|c| token.append_to_current_attribute_value(c));
            });
        } else {
            self.emit_characters(&buffer);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#)"
            // "Append the current input character to the temporary buffer.
            // Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else"
            // "Flush code points consumed as a character reference. Reconsume in
            // the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// The first alphanumeric has already been consumed (it was reconsumed
    /// into this state), so the trie walk starts from it and continues over
    /// the unread input.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let Some(first) = self.current_input_character else {
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(self.return_state);
            return;
        };

        // "Consume the maximum number of characters possible, where the
        // consumed characters are one of the identifiers in the named character
        // references table. Append each character to the temporary buffer when
        // it's consumed."
        let found = reference_trie()
            .longest_match(iter::once(first).chain(self.cursor.remaining().chars()));

        let Some(found) = found else {
            // "Otherwise: Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            //
            // Only the ampersand belongs to the reference; the alphanumeric is
            // handed to the ambiguous ampersand state.
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.temporary_buffer.push(first);
        for _ in 1..found.length {
            if let Some(c) = self.cursor.read() {
                self.temporary_buffer.push(c);
            }
        }

        // "If the character reference was consumed as part of an attribute,
        // and the last character matched is not a U+003B SEMICOLON character
        // (;), and the next input character is either a U+003D EQUALS SIGN
        // character (=) or an ASCII alphanumeric, then, for historical reasons,
        // flush code points consumed as a character reference and switch to
        // the return state."
        if self.is_consumed_as_part_of_attribute()
            && !found.has_semicolon
            && self
                .cursor
                .peek()
                .is_some_and(|next| next == '=' || next.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
            return;
        }

        // STEP 1: "If the last character matched is not a U+003B SEMICOLON
        // character (;), then this is a missing-semicolon-after-character-reference
        // parse error."
        if !found.has_semicolon {
            self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
        }
        // STEP 2: "Set the temporary buffer to the empty string. Append one or
        // two characters corresponding to the character reference name (as
        // given by the second column of the named character references table)
        // to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(found.value);
        // STEP 3: "Flush code points consumed as a character reference. Switch
        // to the return state."
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "If the character reference was consumed as part of an attribute,
            // then append the current input character to the current attribute's
            // value. Otherwise, emit the current input character as a character
            // token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.with_current_token(|token| token.append_to_current_attribute_value(c));
                } else {
                    self.emit_character_token(c);
                }
            }
            // "U+003B SEMICOLON (;)"
            // "This is an unknown-named-character-reference parse error.
            // Reconsume in the return state."
            Some(';') => {
                self.log_parse_error(ParseErrorKind::UnknownNamedCharacterReference);
                self.reconsume_in(self.return_state);
            }
            // "Anything else"
            // "Reconsume in the return state."
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X"
            // "Append the current input character to the temporary buffer.
            // Switch to the hexadecimal character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else"
            // "Reconsume in the decimal character reference start state."
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            // "ASCII hex digit"
            // "Reconsume in the hexadecimal character reference state."
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// "Anything else: This is an
    /// absence-of-digits-in-numeric-character-reference parse error. Flush
    /// code points consumed as a character reference. Reconsume in the return
    /// state."
    fn absence_of_digits(&mut self) {
        self.log_parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference();
        self.reconsume_in(self.return_state);
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_numeric_digits_state(&mut self, radix: u32) {
        match self.current_input_character {
            // "ASCII digit" / "ASCII hex digit"
            // "Multiply the character reference code by 16. Add a numeric version
            // of the current input character to the character reference code."
            //
            // The code saturates: anything past U+10FFFF is treated the same.
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            // "U+003B SEMICOLON"
            // "Switch to the numeric character reference end state."
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "Anything else"
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            _ => {
                self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Runs without consuming. A pending reconsume stays pending, so the
    /// character that ended the digits is handled by the return state.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        // "Check the character reference code:"
        let code = self.character_reference_code;
        let value = match code {
            // "If the number is 0x00, then this is a null-character-reference
            // parse error. Set the character reference code to 0xFFFD."
            0 => {
                self.log_parse_error(ParseErrorKind::NullCharacterReference);
                '\u{FFFD}'
            }
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error. Set the
            // character reference code to 0xFFFD."
            0x11_0000.. => {
                self.log_parse_error(ParseErrorKind::CharacterReferenceOutsideUnicodeRange);
                '\u{FFFD}'
            }
            // "If the number is a surrogate, then this is a
            // surrogate-character-reference parse error. Set the character
            // reference code to 0xFFFD."
            0xD800..=0xDFFF => {
                self.log_parse_error(ParseErrorKind::SurrogateCharacterReference);
                '\u{FFFD}'
            }
            _ => {
                // "If the number is a noncharacter, then this is a
                // noncharacter-character-reference parse error."
                if is_noncharacter(code) {
                    self.log_parse_error(ParseErrorKind::NoncharacterCharacterReference);
                }
                // "If the number is 0x0D, or a control that's not ASCII
                // whitespace, then this is a control-character-reference parse
                // error."
                let is_ascii_whitespace = matches!(code, 0x09 | 0x0A | 0x0C | 0x0D | 0x20);
                if code == 0x0D || (is_control(code) && !is_ascii_whitespace) {
                    self.log_parse_error(ParseErrorKind::ControlCharacterReference);
                }
                c1_replacement(code)
                    .or_else(|| char::from_u32(code))
                    .unwrap_or('\u{FFFD}')
            }
        };

        // "Set the temporary buffer to the empty string. Append a code point
        // equal to the character reference code to the temporary buffer. Flush
        // code points consumed as a character reference. Switch to the return
        // state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push(value);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c1_replacement_table() {
        assert_eq!(c1_replacement(0x80), Some('€'));
        assert_eq!(c1_replacement(0x9F), Some('Ÿ'));
        // Holes in the table stay unmapped.
        assert_eq!(c1_replacement(0x81), None);
        assert_eq!(c1_replacement(0x41), None);
    }

    #[test]
    fn test_noncharacters() {
        assert!(is_noncharacter(0xFDD0));
        assert!(is_noncharacter(0xFFFF));
        assert!(is_noncharacter(0x10_FFFE));
        assert!(!is_noncharacter(0xFFFD));
    }
}
