//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not. Certain points in the parsing
//! algorithm are said to be parse errors."
//!
//! Parse errors never stop the tokenizer. They are recorded with the position
//! of the offending input and handed to the `log` facade; the token stream
//! already contains whatever the recovery rule substituted.

use std::fmt;

use strum_macros::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

use super::input::SourcePosition;

/// The parse error codes raised by the tokenization stage.
///
/// The string form of each variant is its WHATWG error code, e.g.
/// `ParseErrorKind::EofInTag` displays as `eof-in-tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorKind {
    /// `<!-->` or `<!--->`
    AbruptClosingOfEmptyComment,
    /// `>` inside a quoted DOCTYPE public identifier
    AbruptDoctypePublicIdentifier,
    /// `>` inside a quoted DOCTYPE system identifier
    AbruptDoctypeSystemIdentifier,
    /// `&#` or `&#x` not followed by a digit
    AbsenceOfDigitsInNumericCharacterReference,
    /// `<![CDATA[` outside foreign content
    CdataInHtmlContent,
    /// Numeric character reference above U+10FFFF
    CharacterReferenceOutsideUnicodeRange,
    /// Numeric character reference to a control character
    ControlCharacterReference,
    /// An attribute name that already exists on the tag
    DuplicateAttribute,
    /// An end tag carrying attributes
    EndTagWithAttributes,
    /// An end tag with a trailing `/`
    EndTagWithTrailingSolidus,
    /// EOF right after `<` or `</`
    EofBeforeTagName,
    /// EOF inside a CDATA section
    EofInCdata,
    /// EOF inside a comment
    EofInComment,
    /// EOF inside a DOCTYPE
    EofInDoctype,
    /// EOF inside `<!--` in script data
    EofInScriptHtmlCommentLikeText,
    /// EOF inside a start or end tag
    EofInTag,
    /// `--!>` closing a comment
    IncorrectlyClosedComment,
    /// `<!` not followed by `--`, `DOCTYPE` or `[CDATA[`
    IncorrectlyOpenedComment,
    /// Garbage after the DOCTYPE name
    InvalidCharacterSequenceAfterDoctypeName,
    /// `<` or `</` followed by something that cannot start a tag name
    InvalidFirstCharacterOfTagName,
    /// `=` followed directly by `>`
    MissingAttributeValue,
    /// `<!DOCTYPE>`
    MissingDoctypeName,
    /// `PUBLIC` without an identifier
    MissingDoctypePublicIdentifier,
    /// `SYSTEM` without an identifier
    MissingDoctypeSystemIdentifier,
    /// `</>`
    MissingEndTagName,
    /// Unquoted DOCTYPE public identifier
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// Unquoted DOCTYPE system identifier
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// Character reference not terminated by `;`
    MissingSemicolonAfterCharacterReference,
    /// `PUBLIC"`
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `SYSTEM"`
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `<!DOCTYPEhtml>`
    MissingWhitespaceBeforeDoctypeName,
    /// `a="1"b="2"`
    MissingWhitespaceBetweenAttributes,
    /// Public and system identifiers with nothing between them
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `<!--` inside a comment
    NestedComment,
    /// Numeric character reference to a noncharacter
    NoncharacterCharacterReference,
    /// `&#0;`
    NullCharacterReference,
    /// Numeric character reference to a surrogate
    SurrogateCharacterReference,
    /// Garbage after the DOCTYPE system identifier
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `"`, `'` or `<` in an attribute name
    UnexpectedCharacterInAttributeName,
    /// `"`, `'`, `<`, `=` or `` ` `` in an unquoted attribute value
    UnexpectedCharacterInUnquotedAttributeValue,
    /// `=` where an attribute name should start
    UnexpectedEqualsSignBeforeAttributeName,
    /// U+0000 in the input
    UnexpectedNullCharacter,
    /// `<?`
    UnexpectedQuestionMarkInsteadOfTagName,
    /// `/` inside a tag not followed by `>`
    UnexpectedSolidusInTag,
    /// `&name;` that matches no named character reference
    UnknownNamedCharacterReference,
}

impl ParseErrorKind {
    /// The WHATWG error code, e.g. `"unexpected-null-character"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// A parse error together with where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    /// Which parse error this is
    pub kind: ParseErrorKind,
    /// Position of the input character that triggered it
    pub position: SourcePosition,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)
    }
}

/// Errors a caller can act on. Malformed markup is never one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizerError {
    /// The decoder has no implementation for the requested encoding label.
    #[error("unsupported encoding label: {0:?}")]
    UnsupportedEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_whatwg_names() {
        assert_eq!(ParseErrorKind::EofInTag.code(), "eof-in-tag");
        assert_eq!(ParseErrorKind::CdataInHtmlContent.code(), "cdata-in-html-content");
        assert_eq!(
            ParseErrorKind::MissingSemicolonAfterCharacterReference.code(),
            "missing-semicolon-after-character-reference"
        );
        assert_eq!(
            ParseErrorKind::UnexpectedNullCharacter.to_string(),
            "unexpected-null-character"
        );
    }

    #[test]
    fn test_codes_parse_back() {
        let kind: ParseErrorKind = "surrogate-character-reference".parse().unwrap();
        assert_eq!(kind, ParseErrorKind::SurrogateCharacterReference);
        assert!("not-a-real-error".parse::<ParseErrorKind>().is_err());
    }

    #[test]
    fn test_display_includes_position() {
        let error = ParseError {
            kind: ParseErrorKind::EofInComment,
            position: SourcePosition { line: 2, column: 7 },
        };
        assert_eq!(error.to_string(), "3:8: eof-in-comment");
    }
}
