//! DOCTYPE states.
//!
//! [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through
//! [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
//!
//! Anything malformed sets the force-quirks flag and ends up in the bogus
//! DOCTYPE state, which skips to the next `>`.

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorKind;
use super::input::CaseSensitivity;
use super::token::{Token, TokenKind};

/// Which of the two DOCTYPE identifiers a state is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Identifier {
    Public,
    System,
}

impl Identifier {
    const fn double_quoted_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            Self::System => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
        }
    }

    const fn single_quoted_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            Self::System => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        }
    }

    const fn after_identifier_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::AfterDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::AfterDOCTYPESystemIdentifier,
        }
    }

    const fn missing_whitespace_after_keyword(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::MissingWhitespaceAfterDoctypePublicKeyword,
            Self::System => ParseErrorKind::MissingWhitespaceAfterDoctypeSystemKeyword,
        }
    }

    const fn missing_identifier(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::MissingDoctypePublicIdentifier,
            Self::System => ParseErrorKind::MissingDoctypeSystemIdentifier,
        }
    }

    const fn missing_quote(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::MissingQuoteBeforeDoctypePublicIdentifier,
            Self::System => ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier,
        }
    }

    const fn abrupt_end(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::AbruptDoctypePublicIdentifier,
            Self::System => ParseErrorKind::AbruptDoctypeSystemIdentifier,
        }
    }

    /// "Set the current DOCTYPE token's public/system identifier to the empty
    /// string (not missing)"
    fn begin(self, token: &mut Token) {
        match self {
            Self::Public => token.begin_public_identifier(),
            Self::System => token.begin_system_identifier(),
        }
    }

    fn append(self, token: &mut Token, c: char) {
        match self {
            Self::Public => token.append_to_public_identifier(c),
            Self::System => token.append_to_system_identifier(c),
        }
    }
}

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Switch to the before DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(TokenizerState::BeforeDOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Reconsume in the before DOCTYPE name state."
            Some('>') => {
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
            // "EOF - This is an eof-in-doctype parse error. Create a new DOCTYPE token. Set its
            // force-quirks flag to on. Emit the current token. Emit an end-of-file token."
            None => {
                self.begin_token(TokenKind::Doctype);
                self.eof_in_doctype();
            }
            // "Anything else - This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.parse_error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0000 NULL - This is an unexpected-null-character parse error. Create a new
            // DOCTYPE token. Set the token's name to a U+FFFD REPLACEMENT CHARACTER character.
            // Switch to the DOCTYPE name state."
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.begin_token(TokenKind::Doctype);
                self.with_current_token(|token| {
                    token.append_to_doctype_name(char::REPLACEMENT_CHARACTER);
                });
                self.switch_state(TokenizerState::DOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-name parse error. Create
            // a new DOCTYPE token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            Some('>') => {
                self.parse_error(ParseErrorKind::MissingDoctypeName);
                self.begin_token(TokenKind::Doctype);
                self.with_current_token(Token::set_force_quirks);
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF - This is an eof-in-doctype parse error. Create a new DOCTYPE token. Set its
            // force-quirks flag to on. Emit the current token. Emit an end-of-file token."
            None => {
                self.begin_token(TokenKind::Doctype);
                self.eof_in_doctype();
            }
            // "ASCII upper alpha - Create a new DOCTYPE token. Set the token's name to the
            // lowercase version of the current input character (add 0x0020 to the character's
            // code point). Switch to the DOCTYPE name state."
            // "Anything else - Create a new DOCTYPE token. Set the token's name to the current
            // input character. Switch to the DOCTYPE name state."
            Some(c) => {
                self.begin_token(TokenKind::Doctype);
                self.with_current_token(|token| token.append_to_doctype_name(c));
                self.switch_state(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Switch to the after DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(TokenizerState::AfterDOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // DOCTYPE token."
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a U+FFFD
            // REPLACEMENT CHARACTER character to the current DOCTYPE token's name."
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| {
                    token.append_to_doctype_name(char::REPLACEMENT_CHARACTER);
                });
            }
            // "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "ASCII upper alpha - Append the lowercase version of the current input character
            // (add 0x0020 to the character's code point) to the current DOCTYPE token's name."
            // "Anything else - Append the current input character to the current DOCTYPE
            // token's name."
            Some(c) => self.with_current_token(|token| token.append_to_doctype_name(c)),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // DOCTYPE token."
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else - If the six characters starting from the current input character
            // are an ASCII case-insensitive match for the word "PUBLIC", then consume those
            // characters and switch to the after DOCTYPE public keyword state. Otherwise, if
            // the six characters starting from the current input character are an ASCII
            // case-insensitive match for the word "SYSTEM", then consume those characters and
            // switch to the after DOCTYPE system keyword state."
            Some(_) => {
                // Step back so the keyword match starts at the current input character.
                self.input.reconsume();
                if self
                    .input
                    .consume_if_matches("PUBLIC", CaseSensitivity::CaseInsensitive)
                {
                    self.switch_state(TokenizerState::AfterDOCTYPEPublicKeyword);
                } else if self
                    .input
                    .consume_if_matches("SYSTEM", CaseSensitivity::CaseInsensitive)
                {
                    self.switch_state(TokenizerState::AfterDOCTYPESystemKeyword);
                } else {
                    // "Otherwise, this is an invalid-character-sequence-after-doctype-name parse
                    // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume
                    // in the bogus DOCTYPE state."
                    self.parse_error(ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName);
                    self.with_current_token(Token::set_force_quirks);
                    // The cursor already sits before the current input character.
                    self.switch_state(TokenizerState::BogusDOCTYPE);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        self.after_doctype_keyword(
            Identifier::Public,
            TokenizerState::BeforeDOCTYPEPublicIdentifier,
        );
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        self.after_doctype_keyword(
            Identifier::System,
            TokenizerState::BeforeDOCTYPESystemIdentifier,
        );
    }

    /// The after DOCTYPE public keyword and after DOCTYPE system keyword
    /// states have the same shape.
    fn after_doctype_keyword(&mut self, identifier: Identifier, before_identifier: TokenizerState) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Switch to the before DOCTYPE public identifier state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(before_identifier);
            }
            // "U+0022 QUOTATION MARK (") - This is a missing-whitespace-after-doctype-public-keyword
            // parse error. Set the current DOCTYPE token's public identifier to the empty string
            // (not missing), then switch to the DOCTYPE public identifier (double-quoted) state."
            // "U+0027 APOSTROPHE (') - ... (single-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(identifier.missing_whitespace_after_keyword());
                self.begin_identifier(identifier, quote);
            }
            _ => self.doctype_identifier_missing_or_unquoted(identifier),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        self.before_doctype_identifier(Identifier::Public);
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        self.before_doctype_identifier(Identifier::System);
    }

    fn before_doctype_identifier(&mut self, identifier: Identifier) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (") - Set the current DOCTYPE token's public identifier to
            // the empty string (not missing), then switch to the DOCTYPE public identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => self.begin_identifier(identifier, quote),
            _ => self.doctype_identifier_missing_or_unquoted(identifier),
        }
    }

    /// The `>`, EOF and "anything else" entries shared by the keyword and
    /// before-identifier states.
    fn doctype_identifier_missing_or_unquoted(&mut self, identifier: Identifier) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-public-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(identifier.missing_identifier());
                self.with_current_token(Token::set_force_quirks);
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else - This is a missing-quote-before-doctype-public-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume in the
            // bogus DOCTYPE state."
            Some(_) => {
                self.parse_error(identifier.missing_quote());
                self.with_current_token(Token::set_force_quirks);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// Set the identifier to the empty string and switch to the state that
    /// reads it up to the matching `quote`.
    fn begin_identifier(&mut self, identifier: Identifier, quote: char) {
        self.with_current_token(|token| identifier.begin(token));
        let next = if quote == '"' {
            identifier.double_quoted_state()
        } else {
            identifier.single_quoted_state()
        };
        self.switch_state(next);
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        self.doctype_identifier_quoted(Identifier::Public, quote);
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        self.doctype_identifier_quoted(Identifier::System, quote);
    }

    fn doctype_identifier_quoted(&mut self, identifier: Identifier, quote: char) {
        match self.current_input_character {
            // "U+0022 QUOTATION MARK (") - Switch to the after DOCTYPE public identifier state."
            Some(c) if c == quote => {
                self.switch_state(identifier.after_identifier_state());
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a U+FFFD
            // REPLACEMENT CHARACTER character to the current DOCTYPE token's public identifier."
            Some('\0') => {
                self.parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.with_current_token(|token| {
                    identifier.append(token, char::REPLACEMENT_CHARACTER);
                });
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-doctype-public-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(identifier.abrupt_end());
                self.with_current_token(Token::set_force_quirks);
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else - Append the current input character to the current DOCTYPE
            // token's public identifier."
            Some(c) => self.with_current_token(|token| identifier.append(token, c)),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Switch to the between DOCTYPE public and system identifiers state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            // "U+0022 QUOTATION MARK (") - This is a
            // missing-whitespace-between-doctype-public-and-system-identifiers parse error. Set
            // the current DOCTYPE token's system identifier to the empty string (not missing),
            // then switch to the DOCTYPE system identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    ParseErrorKind::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_identifier(Identifier::System, quote);
            }
            _ => self.system_identifier_optional(),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (") - Set the current DOCTYPE token's system identifier to
            // the empty string (not missing), then switch to the DOCTYPE system identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => self.begin_identifier(Identifier::System, quote),
            _ => self.system_identifier_optional(),
        }
    }

    /// The `>`, EOF and "anything else" entries after a public identifier,
    /// where the system identifier may be left out.
    fn system_identifier_optional(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // DOCTYPE token."
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else - This is a missing-quote-before-doctype-system-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume in the
            // bogus DOCTYPE state."
            Some(_) => {
                self.parse_error(ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.with_current_token(Token::set_force_quirks);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // DOCTYPE token."
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else - This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does not set the current
            // DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(ParseErrorKind::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the DOCTYPE token."
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Ignore the
            // character."
            Some('\0') => self.parse_error(ParseErrorKind::UnexpectedNullCharacter),
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            // "Anything else - Ignore the character."
            Some(_) => {}
        }
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(ParseErrorKind::EofInDoctype);
        self.with_current_token(Token::set_force_quirks);
        self.emit_token();
        self.emit_eof_token();
    }
}
