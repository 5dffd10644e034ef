//! Character reference states for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through
//! [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
//!
//! The sub-machine is entered from the data, RCDATA and attribute value
//! states and always hands control back to the return state.

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorKind;
use super::named_character_references::longest_match;

/// Anything above this is outside the Unicode range. Accumulation stops
/// growing here so long digit runs cannot overflow.
const CODE_POINT_CAP: u32 = 0x11_0000;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set
/// the character reference code to the number in the second column of that
/// row."
const C1_REPLACEMENTS: [(u32, u32); 27] = [
    (0x80, 0x20AC), // EURO SIGN (€)
    (0x82, 0x201A), // SINGLE LOW-9 QUOTATION MARK (‚)
    (0x83, 0x0192), // LATIN SMALL LETTER F WITH HOOK (ƒ)
    (0x84, 0x201E), // DOUBLE LOW-9 QUOTATION MARK („)
    (0x85, 0x2026), // HORIZONTAL ELLIPSIS (…)
    (0x86, 0x2020), // DAGGER (†)
    (0x87, 0x2021), // DOUBLE DAGGER (‡)
    (0x88, 0x02C6), // MODIFIER LETTER CIRCUMFLEX ACCENT (ˆ)
    (0x89, 0x2030), // PER MILLE SIGN (‰)
    (0x8A, 0x0160), // LATIN CAPITAL LETTER S WITH CARON (Š)
    (0x8B, 0x2039), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK (‹)
    (0x8C, 0x0152), // LATIN CAPITAL LIGATURE OE (Œ)
    (0x8E, 0x017D), // LATIN CAPITAL LETTER Z WITH CARON (Ž)
    (0x91, 0x2018), // LEFT SINGLE QUOTATION MARK (‘)
    (0x92, 0x2019), // RIGHT SINGLE QUOTATION MARK (’)
    (0x93, 0x201C), // LEFT DOUBLE QUOTATION MARK (“)
    (0x94, 0x201D), // RIGHT DOUBLE QUOTATION MARK (”)
    (0x95, 0x2022), // BULLET (•)
    (0x96, 0x2013), // EN DASH (–)
    (0x97, 0x2014), // EM DASH (—)
    (0x98, 0x02DC), // SMALL TILDE (˜)
    (0x99, 0x2122), // TRADE MARK SIGN (™)
    (0x9A, 0x0161), // LATIN SMALL LETTER S WITH CARON (š)
    (0x9B, 0x203A), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK (›)
    (0x9C, 0x0153), // LATIN SMALL LIGATURE OE (œ)
    (0x9E, 0x017E), // LATIN SMALL LETTER Z WITH CARON (ž)
    (0x9F, 0x0178), // LATIN CAPITAL LETTER Y WITH DIAERESIS (Ÿ)
];

/// Map a byte in 0x80..=0x9F to the character windows-1252 puts there.
/// Bytes without an entry in the table map to themselves.
#[must_use]
pub fn windows_1252_c1(code: u32) -> Option<u32> {
    C1_REPLACEMENTS
        .iter()
        .find(|&&(from, _)| from == code)
        .map(|&(_, to)| to)
}

/// [Infra § 4.5 Code points](https://infra.spec.whatwg.org/#noncharacter)
///
/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
#[must_use]
pub const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code <= 0x10_FFFF && code & 0xFFFE == 0xFFFE)
}

/// [Infra § 4.5 Code points](https://infra.spec.whatwg.org/#surrogate)
///
/// "A surrogate is a leading surrogate or a trailing surrogate."
#[must_use]
pub const fn is_surrogate(code: u32) -> bool {
    matches!(code, 0xD800..=0xDFFF)
}

/// [Infra § 4.5 Code points](https://infra.spec.whatwg.org/#control)
///
/// "A control is a C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive."
#[must_use]
pub const fn is_control(code: u32) -> bool {
    code <= 0x1F || matches!(code, 0x7F..=0x9F)
}

/// [Infra § 4.5 Code points](https://infra.spec.whatwg.org/#ascii-whitespace)
const fn is_ascii_whitespace(code: u32) -> bool {
    matches!(code, 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "Check the character reference code". Returns the character to emit and
/// the parse error the code raises, if any. The checks run in the order the
/// algorithm lists them and the first that applies wins.
#[must_use]
pub fn resolve_numeric_reference(code: u32) -> (char, Option<ParseErrorKind>) {
    // "If the number is 0x00, then this is a null-character-reference parse error.
    // Set the character reference code to 0xFFFD."
    if code == 0 {
        return (
            char::REPLACEMENT_CHARACTER,
            Some(ParseErrorKind::NullCharacterReference),
        );
    }
    // "If the number is greater than 0x10FFFF, then this is a
    // character-reference-outside-unicode-range parse error. Set the character
    // reference code to 0xFFFD."
    if code > 0x10_FFFF {
        return (
            char::REPLACEMENT_CHARACTER,
            Some(ParseErrorKind::CharacterReferenceOutsideUnicodeRange),
        );
    }
    // "If the number is a surrogate, then this is a surrogate-character-reference
    // parse error. Set the character reference code to 0xFFFD."
    if is_surrogate(code) {
        return (
            char::REPLACEMENT_CHARACTER,
            Some(ParseErrorKind::SurrogateCharacterReference),
        );
    }

    let (code, error) = if is_noncharacter(code) {
        // "If the number is a noncharacter, then this is a
        // noncharacter-character-reference parse error."
        (code, Some(ParseErrorKind::NoncharacterCharacterReference))
    } else if code == 0x0D || (is_control(code) && !is_ascii_whitespace(code)) {
        // "If the number is 0x0D, or a control that's not ASCII whitespace, then this
        // is a control-character-reference parse error."
        (
            windows_1252_c1(code).unwrap_or(code),
            Some(ParseErrorKind::ControlCharacterReference),
        )
    } else {
        (code, None)
    };

    // Surrogates and out-of-range values were replaced above.
    (
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        error,
    )
}

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "A character reference is said to be consumed as part of an attribute if
    /// the return state is either the attribute value (double-quoted) state, the
    /// attribute value (single-quoted) state, or the attribute value (unquoted) state."
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "When a state says to flush code points consumed as a character reference,
    /// it means that for each code point in the temporary buffer (in the order
    /// they were added to the buffer) user agent must append the code point from
    /// the buffer to the current attribute's value if the character reference was
    /// consumed as part of an attribute, or emit the code point as a character
    /// token otherwise."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            self.with_current_token(|token| {
                for c in buffer.chars() {
                    token.append_to_current_attribute_value(c);
                }
            });
        } else {
            self.emit_character_tokens(&buffer);
        }
    }

    /// Append `c` to the attribute value or emit it, depending on where the
    /// character reference started.
    fn emit_or_append_to_attribute(&mut self, c: char) {
        if self.is_consumed_as_part_of_attribute() {
            self.with_current_token(|token| token.append_to_current_attribute_value(c));
        } else {
            self.emit_character_token(c);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026 AMPERSAND (&)
        // character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to the temporary
            // buffer. Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_state(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table. Append each character to the temporary buffer
    /// when it's consumed."
    ///
    /// Entered with the cursor on the first character of the name; the match is
    /// found by looking ahead, then exactly the matched characters are consumed.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let Some(found) = longest_match(self.input.remaining()) else {
            // "Otherwise - Flush code points consumed as a character reference. Switch to
            // the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.switch_state(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.input.skip(found.consumed_len);
        self.temporary_buffer.push_str(found.entity);

        // "If the character reference was consumed as part of an attribute, and the last
        // character matched is not a U+003B SEMICOLON character (;), and the next input
        // character is either a U+003D EQUALS SIGN character (=) or an ASCII alphanumeric,
        // then, for historical reasons, flush code points consumed as a character reference
        // and switch to the return state."
        if self.is_consumed_as_part_of_attribute()
            && !found.ends_with_semicolon()
            && self
                .input
                .peek_code_point(0)
                .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to_return_state();
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;), then this
        // is a missing-semicolon-after-character-reference parse error."
        if !found.ends_with_semicolon() {
            self.parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two characters
        // corresponding to the character reference name (as given by the second column of
        // the named character references table) to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(found.code_points);

        // "Flush code points consumed as a character reference. Switch to the return state."
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to_return_state();
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric - If the character reference was consumed as part of an
            // attribute, then append the current input character to the current attribute's
            // value. Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => self.emit_or_append_to_attribute(c),
            // "U+003B SEMICOLON (;) - This is an unknown-named-character-reference parse error.
            // Reconsume in the return state."
            Some(';') => {
                self.parse_error(ParseErrorKind::UnknownNamedCharacterReference);
                self.reconsume_in_return_state();
            }
            // "Anything else - Reconsume in the return state."
            _ => self.reconsume_in_return_state(),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;

        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X - Append the current
            // input character to the temporary buffer. Switch to the hexadecimal character
            // reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_state(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else - Reconsume in the decimal character reference start state."
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        self.numeric_reference_start(16, TokenizerState::HexadecimalCharacterReference);
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        self.numeric_reference_start(10, TokenizerState::DecimalCharacterReference);
    }

    fn numeric_reference_start(&mut self, radix: u32, digits_state: TokenizerState) {
        if self.current_input_character.is_some_and(|c| c.is_digit(radix)) {
            // "ASCII hex digit - Reconsume in the hexadecimal character reference state."
            self.reconsume_in(digits_state);
        } else {
            // "Anything else - This is an absence-of-digits-in-numeric-character-reference
            // parse error. Flush code points consumed as a character reference. Reconsume in
            // the return state."
            self.parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in_return_state();
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.numeric_reference_digits(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.numeric_reference_digits(10);
    }

    fn numeric_reference_digits(&mut self, radix: u32) {
        match self.current_input_character {
            // "ASCII digit - Multiply the character reference code by 10. Add a numeric
            // version of the current input character (subtract 0x0030 from the character's
            // code point) to the character reference code."
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit)
                    .min(CODE_POINT_CAP);
            }
            // "U+003B SEMICOLON - Switch to the numeric character reference end state."
            Some(';') => {
                self.switch_state(TokenizerState::NumericCharacterReferenceEnd);
            }
            // "Anything else - This is a missing-semicolon-after-character-reference parse
            // error. Reconsume in the numeric character reference end state."
            _ => {
                self.parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// This state does not consume a character.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let (c, error) = resolve_numeric_reference(self.character_reference_code);
        if let Some(kind) = error {
            self.parse_error(kind);
        }

        // "Set the temporary buffer to the empty string. Append a code point equal to the
        // character reference code to the temporary buffer. Flush code points consumed as a
        // character reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push(c);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to_return_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_out_of_range_become_replacement() {
        assert_eq!(
            resolve_numeric_reference(0),
            ('\u{FFFD}', Some(ParseErrorKind::NullCharacterReference))
        );
        assert_eq!(
            resolve_numeric_reference(0x11_0000),
            (
                '\u{FFFD}',
                Some(ParseErrorKind::CharacterReferenceOutsideUnicodeRange)
            )
        );
        assert_eq!(
            resolve_numeric_reference(0xD800),
            ('\u{FFFD}', Some(ParseErrorKind::SurrogateCharacterReference))
        );
    }

    #[test]
    fn test_c1_controls_are_remapped() {
        assert_eq!(
            resolve_numeric_reference(0x80),
            ('\u{20AC}', Some(ParseErrorKind::ControlCharacterReference))
        );
        assert_eq!(
            resolve_numeric_reference(0x9F),
            ('\u{0178}', Some(ParseErrorKind::ControlCharacterReference))
        );
        // 0x81 has no windows-1252 mapping and stays as it is.
        assert_eq!(
            resolve_numeric_reference(0x81),
            ('\u{0081}', Some(ParseErrorKind::ControlCharacterReference))
        );
    }

    #[test]
    fn test_carriage_return_is_an_error_but_whitespace_is_not() {
        assert_eq!(
            resolve_numeric_reference(0x0D),
            ('\r', Some(ParseErrorKind::ControlCharacterReference))
        );
        assert_eq!(resolve_numeric_reference(0x09), ('\t', None));
        assert_eq!(resolve_numeric_reference(0x41), ('A', None));
    }

    #[test]
    fn test_noncharacters_keep_their_value() {
        assert!(is_noncharacter(0xFDD0));
        assert!(is_noncharacter(0x1_FFFE));
        assert!(is_noncharacter(0x10_FFFF));
        assert!(!is_noncharacter(0xFFFD));
        assert_eq!(
            resolve_numeric_reference(0xFFFF),
            ('\u{FFFF}', Some(ParseErrorKind::NoncharacterCharacterReference))
        );
    }

    #[test]
    fn test_windows_1252_table_has_holes() {
        assert_eq!(windows_1252_c1(0x99), Some(0x2122));
        assert_eq!(windows_1252_c1(0x8D), None);
        assert_eq!(C1_REPLACEMENTS.len(), 27);
    }
}
