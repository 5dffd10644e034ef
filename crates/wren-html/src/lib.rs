//! HTML tokenizer for the wren toolkit.
//!
//! # Scope
//!
//! This crate implements the **HTML Tokenizer**
//! ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)):
//! - Data, RCDATA, RAWTEXT, PLAINTEXT and script data states, including the
//!   escaped and double-escaped script data variants
//! - Tag, attribute, comment, DOCTYPE and CDATA section states
//! - Named and numeric character references
//!
//! Tree construction is not part of this crate. A tree builder drives the
//! tokenizer through [`HTMLTokenizer::next_token`] and pushes content-model
//! overrides back through [`HTMLTokenizer::switch_to`].
//!
//! # Example
//!
//! ```
//! use wren_html::{HTMLTokenizer, Token};
//!
//! let mut tokenizer = HTMLTokenizer::new("<p class=intro>Hi");
//! assert!(matches!(tokenizer.next_token(), Some(Token::StartTag { .. })));
//! assert_eq!(tokenizer.next_token(), Some(Token::Character { data: 'H' }));
//! ```

/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use tokenizer::{
    Attribute, HTMLTokenizer, ParseError, ParseErrorKind, SourcePosition, SourceSpan,
    SpannedToken, Token, TokenKind, TokenizerError, TokenizerOptions, TokenizerState,
};
