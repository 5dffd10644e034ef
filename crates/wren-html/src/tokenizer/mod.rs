//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference parsing per § 13.2.5.72 - § 13.2.5.80.
pub mod character_reference;
/// Comment, bogus comment, markup declaration and CDATA section states.
mod comment;
/// HTML tokenizer state machine implementation.
pub mod core;
/// DOCTYPE states per § 13.2.5.53 - § 13.2.5.68.
mod doctype;
/// Decoding of the byte stream handed to the tokenizer.
pub mod encoding;
/// Parse errors and tokenizer errors.
pub mod error;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// The input stream cursor.
pub mod input;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Script data states per § 13.2.5.15 - § 13.2.5.31.
mod script_data;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerOptions, TokenizerState};
pub use error::{ParseError, ParseErrorKind, TokenizerError};
pub use input::{SourcePosition, SourceSpan};
pub use token::{Attribute, SpannedToken, Token, TokenKind};
