//! Script data states.
//!
//! [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
//! through
//! [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
//!
//! Script bodies may contain `<!--` "escapes" in which a nested `<script>`
//! puts the tokenizer into the double-escaped states, where `</script>` no
//! longer ends the element.

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorKind;

/// The temporary buffer is compared against this to enter and leave the
/// double-escaped states.
const SCRIPT: &str = "script";

impl HTMLTokenizer {
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    pub(super) fn handle_script_data_state(&mut self) {
        if self.current_input_character == Some('<') {
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data less-than sign state."
            self.switch_state(TokenizerState::ScriptDataLessThanSign);
        } else {
            self.emit_text_content_character();
        }
    }

    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/) - Set the temporary buffer to the empty string. Switch to
            // the script data end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_state(TokenizerState::ScriptDataEndTagOpen);
            }
            // "U+0021 EXCLAMATION MARK (!) - Switch to the script data escape start state.
            // Emit a U+003C LESS-THAN SIGN character token and a U+0021 EXCLAMATION MARK
            // character token."
            Some('!') => {
                self.switch_state(TokenizerState::ScriptDataEscapeStart);
                self.emit_character_tokens("<!");
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token. Reconsume in
            // the script data state."
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    pub(super) fn handle_script_data_end_tag_open_state(&mut self) {
        self.handle_end_tag_open_in_text(
            TokenizerState::ScriptDataEndTagName,
            TokenizerState::ScriptData,
        );
    }

    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    pub(super) fn handle_script_data_end_tag_name_state(&mut self) {
        self.handle_end_tag_name_in_text(TokenizerState::ScriptData);
    }

    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn handle_script_data_escape_start_state(&mut self) {
        if self.current_input_character == Some('-') {
            // "Switch to the script data escape start dash state. Emit a U+002D
            // HYPHEN-MINUS character token."
            self.switch_state(TokenizerState::ScriptDataEscapeStartDash);
            self.emit_character_token('-');
        } else {
            // "Reconsume in the script data state."
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn handle_script_data_escape_start_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            // "Switch to the script data escaped dash dash state. Emit a U+002D
            // HYPHEN-MINUS character token."
            self.switch_state(TokenizerState::ScriptDataEscapedDashDash);
            self.emit_character_token('-');
        } else {
            // "Reconsume in the script data state."
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn handle_script_data_escaped_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the script data escaped dash state. Emit a
            // U+002D HYPHEN-MINUS character token."
            Some('-') => {
                self.switch_state(TokenizerState::ScriptDataEscapedDash);
                self.emit_character_token('-');
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data escaped less-than sign state."
            Some('<') => {
                self.switch_state(TokenizerState::ScriptDataEscapedLessThanSign);
            }
            _ => self.escaped_script_character(TokenizerState::ScriptDataEscaped),
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn handle_script_data_escaped_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the script data escaped dash dash state.
            // Emit a U+002D HYPHEN-MINUS character token."
            Some('-') => {
                self.switch_state(TokenizerState::ScriptDataEscapedDashDash);
                self.emit_character_token('-');
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data escaped less-than sign state."
            Some('<') => {
                self.switch_state(TokenizerState::ScriptDataEscapedLessThanSign);
            }
            _ => self.escaped_script_character(TokenizerState::ScriptDataEscaped),
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn handle_script_data_escaped_dash_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Emit a U+002D HYPHEN-MINUS character token."
            Some('-') => self.emit_character_token('-'),
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data escaped less-than sign state."
            Some('<') => {
                self.switch_state(TokenizerState::ScriptDataEscapedLessThanSign);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the script data state. Emit a U+003E
            // GREATER-THAN SIGN character token."
            Some('>') => {
                self.switch_state(TokenizerState::ScriptData);
                self.emit_character_token('>');
            }
            _ => self.escaped_script_character(TokenizerState::ScriptDataEscaped),
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_escaped_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/) - Set the temporary buffer to the empty string. Switch to
            // the script data escaped end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_state(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            // "ASCII alpha - Set the temporary buffer to the empty string. Emit a U+003C
            // LESS-THAN SIGN character token. Reconsume in the script data double escape
            // start state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.clear();
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // script data escaped state."
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.24 Script data escaped end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state)
    pub(super) fn handle_script_data_escaped_end_tag_open_state(&mut self) {
        self.handle_end_tag_open_in_text(
            TokenizerState::ScriptDataEscapedEndTagName,
            TokenizerState::ScriptDataEscaped,
        );
    }

    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    pub(super) fn handle_script_data_escaped_end_tag_name_state(&mut self) {
        self.handle_end_tag_name_in_text(TokenizerState::ScriptDataEscaped);
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    pub(super) fn handle_script_data_double_escape_start_state(&mut self) {
        self.double_escape_boundary(
            TokenizerState::ScriptDataDoubleEscaped,
            TokenizerState::ScriptDataEscaped,
        );
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn handle_script_data_double_escaped_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the script data double escaped dash state.
            // Emit a U+002D HYPHEN-MINUS character token."
            Some('-') => {
                self.switch_state(TokenizerState::ScriptDataDoubleEscapedDash);
                self.emit_character_token('-');
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data double escaped less-than
            // sign state. Emit a U+003C LESS-THAN SIGN character token."
            Some('<') => {
                self.switch_state(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_character_token('<');
            }
            _ => self.escaped_script_character(TokenizerState::ScriptDataDoubleEscaped),
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the script data double escaped dash dash
            // state. Emit a U+002D HYPHEN-MINUS character token."
            Some('-') => {
                self.switch_state(TokenizerState::ScriptDataDoubleEscapedDashDash);
                self.emit_character_token('-');
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data double escaped less-than
            // sign state. Emit a U+003C LESS-THAN SIGN character token."
            Some('<') => {
                self.switch_state(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_character_token('<');
            }
            _ => self.escaped_script_character(TokenizerState::ScriptDataDoubleEscaped),
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Emit a U+002D HYPHEN-MINUS character token."
            Some('-') => self.emit_character_token('-'),
            // "U+003C LESS-THAN SIGN (<) - Switch to the script data double escaped less-than
            // sign state. Emit a U+003C LESS-THAN SIGN character token."
            Some('<') => {
                self.switch_state(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_character_token('<');
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the script data state. Emit a U+003E
            // GREATER-THAN SIGN character token."
            Some('>') => {
                self.switch_state(TokenizerState::ScriptData);
                self.emit_character_token('>');
            }
            _ => self.escaped_script_character(TokenizerState::ScriptDataDoubleEscaped),
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_double_escaped_less_than_sign_state(&mut self) {
        if self.current_input_character == Some('/') {
            // "Set the temporary buffer to the empty string. Switch to the script data
            // double escape end state. Emit a U+002F SOLIDUS character token."
            self.temporary_buffer.clear();
            self.switch_state(TokenizerState::ScriptDataDoubleEscapeEnd);
            self.emit_character_token('/');
        } else {
            // "Reconsume in the script data double escaped state."
            self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped);
        }
    }

    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    pub(super) fn handle_script_data_double_escape_end_state(&mut self) {
        self.double_escape_boundary(
            TokenizerState::ScriptDataEscaped,
            TokenizerState::ScriptDataDoubleEscaped,
        );
    }

    /// Shared body of the double escape start and end states, which mirror
    /// each other.
    ///
    /// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM
    /// FEED (FF), U+0020 SPACE, U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN
    /// (>) - If the temporary buffer is the string "script", then switch to
    /// the script data double escaped state. Otherwise, switch to the script
    /// data escaped state. Emit the current input character as a character
    /// token."
    ///
    /// Anything that is not a boundary or a letter is reconsumed in `otherwise`.
    fn double_escape_boundary(&mut self, if_script: TokenizerState, otherwise: TokenizerState) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) || c == '/' || c == '>' => {
                let next = if self.temporary_buffer == SCRIPT {
                    if_script
                } else {
                    otherwise
                };
                self.switch_state(next);
                self.emit_character_token(c);
            }
            // "ASCII upper alpha - Append the lowercase version of the current input character
            // (add 0x0020 to the character's code point) to the temporary buffer. Emit the
            // current input character as a character token."
            // "ASCII lower alpha - Append the current input character to the temporary buffer.
            // Emit the current input character as a character token."
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.push(c.to_ascii_lowercase());
                self.emit_character_token(c);
            }
            // "Anything else - Reconsume in the script data (double) escaped state."
            _ => self.reconsume_in(otherwise),
        }
    }

    /// The NULL, EOF and "anything else" entries of the escaped and double
    /// escaped states. The dash states switch back to `fallback` as well.
    ///
    /// "U+0000 NULL - This is an unexpected-null-character parse error. Emit a
    /// U+FFFD REPLACEMENT CHARACTER character token."
    /// "EOF - This is an eof-in-script-html-comment-like-text parse error. Emit
    /// an end-of-file token."
    fn escaped_script_character(&mut self, fallback: TokenizerState) {
        match self.current_input_character {
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.switch_state(fallback);
                self.emit_character_token(char::REPLACEMENT_CHARACTER);
            }
            None => {
                self.parse_error(ParseErrorKind::EofInScriptHtmlCommentLikeText);
                self.emit_eof_token();
            }
            Some(c) => {
                self.switch_state(fallback);
                self.emit_character_token(c);
            }
        }
    }
}
