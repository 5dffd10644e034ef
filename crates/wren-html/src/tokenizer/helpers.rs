//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token") and the output queue
//! - End tag matching inside RCDATA, RAWTEXT and script data
//! - Attribute helpers for duplicate detection
//! - Parse error recording

use log::debug;

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::{ParseError, ParseErrorKind};
use super::input::SourceSpan;
use super::token::{SpannedToken, Token, TokenKind};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed when
    /// the new state runs.
    pub(super) const fn switch_state(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Steps the cursor back over the current input character so the new
    /// state consumes it again.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.input.reconsume();
        self.state = new_state;
    }

    /// "Switch to the return state."
    pub(super) const fn switch_to_return_state(&mut self) {
        self.state = self.return_state;
    }

    /// "Reconsume in the return state."
    pub(super) fn reconsume_in_return_state(&mut self) {
        self.reconsume_in(self.return_state);
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// NOTE: HTML tokenizer uses a subset excluding CR (which is normalized earlier).
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Construction Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Create a new ... token"
    ///
    /// Replaces whatever token was under construction. Every kind built up
    /// this way starts at the `<` that opened the markup.
    pub(super) fn begin_token(&mut self, kind: TokenKind) {
        self.current_token = Some(Token::begin(kind));
        self.current_token_start = self.markup_start;
    }

    /// Apply a mutation to the token under construction.
    pub(super) fn with_current_token(&mut self, mutate: impl FnOnce(&mut Token)) {
        if let Some(token) = self.current_token.as_mut() {
            mutate(token);
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token" - moves the token under construction to the
    /// output queue.
    pub(super) fn emit_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        if matches!(token, Token::StartTag { .. } | Token::EndTag { .. }) {
            token.remove_duplicate_attributes();
        }
        match &token {
            // Track the last start tag name for appropriate end tag detection
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            Token::EndTag { attributes, .. } if !attributes.is_empty() => {
                self.parse_error(ParseErrorKind::EndTagWithAttributes);
            }
            _ => {}
        }
        let span = SourceSpan {
            start: self.current_token_start,
            end: self.input.position(),
        };
        self.queue.push_back(SpannedToken { token, span });
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.push_unbuilt_token(Token::new_character(c));
    }

    /// Emit each character of `text` as its own character token.
    pub(super) fn emit_character_tokens(&mut self, text: &str) {
        for c in text.chars() {
            self.emit_character_token(c);
        }
    }

    /// "Emit an end-of-file token."
    ///
    /// After this the tokenizer hands out what is queued and then nothing.
    pub(super) fn emit_eof_token(&mut self) {
        self.push_unbuilt_token(Token::EndOfFile);
        self.has_emitted_eof = true;
    }

    /// Queue a token that was never under construction, spanning the input
    /// character being processed.
    fn push_unbuilt_token(&mut self, token: Token) {
        let span = SourceSpan {
            start: self.input.current_position(),
            end: self.input.position(),
        };
        self.queue.push_back(SpannedToken { token, span });
    }
}

// =============================================================================
// RCDATA/RAWTEXT/Script Data Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_token) {
            (Some(last_start_tag), Some(Token::EndTag { name, .. })) => name == last_start_tag,
            _ => false,
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    /// and its RAWTEXT and script data counterparts.
    pub(super) fn handle_end_tag_open_in_text(
        &mut self,
        end_tag_name_state: TokenizerState,
        text_state: TokenizerState,
    ) {
        if self.current_input_character.is_some_and(|c| c.is_ascii_alphabetic()) {
            // "ASCII alpha - Create a new end tag token, set its tag name to the empty
            // string. Reconsume in the RCDATA end tag name state."
            self.begin_token(TokenKind::EndTag);
            self.reconsume_in(end_tag_name_state);
        } else {
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token and a
            // U+002F SOLIDUS character token. Reconsume in the RCDATA state."
            self.emit_character_tokens("</");
            self.reconsume_in(text_state);
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// and its RAWTEXT, script data and script data escaped counterparts,
    /// which differ only in the state they fall back to.
    pub(super) fn handle_end_tag_name_in_text(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - If the current end tag token is an appropriate end tag token,
            // then switch to the before attribute name state. Otherwise, treat it as per the
            // "anything else" entry below."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_state(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - If the current end tag token is an appropriate end tag
            // token, then switch to the self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_state(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>) - If the current end tag token is an appropriate
            // end tag token, then switch to the data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII upper alpha - Append the lowercase version of the current input character
            // (add 0x0020 to the character's code point) to the current tag token's tag name.
            // Append the current input character to the temporary buffer."
            // "ASCII lower alpha - Append the current input character to the current tag
            // token's tag name. Append the current input character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                self.with_current_token(|token| token.append_to_tag_name(c));
                self.temporary_buffer.push(c);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token, and a character token for each of the characters in the
            // temporary buffer (in the order they were added to the buffer). Reconsume in the
            // RCDATA state."
            _ => self.emit_end_tag_name_anything_else(text_state),
        }
    }

    /// The "anything else" entry of the end tag name states: the would-be end
    /// tag turns back into text.
    fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_character_tokens("</");
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_character_tokens(&buffer);
        self.current_token = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// The error is reported here. The attribute itself goes when the tag is
    /// emitted, since its value is still to come.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.parse_error(ParseErrorKind::DuplicateAttribute);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors in HTML are not fatal - the tokenizer recovers and continues.
    /// The error is logged and, unless disabled, kept for [`HTMLTokenizer::parse_errors`].
    pub(super) fn parse_error(&mut self, kind: ParseErrorKind) {
        let error = ParseError {
            kind,
            position: self.input.current_position(),
        };
        debug!("parse error at {error}");
        if self.options.record_parse_errors {
            self.parse_errors.push(error);
        }
    }
}
