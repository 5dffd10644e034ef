//! Byte-to-text decoding ahead of tokenization.
//!
//! [§ 13.2.3 The input byte stream](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream)
//!
//! The tokenizer works on code points, so bytes are decoded once, eagerly,
//! before the [`InputCursor`](super::input::InputCursor) walks them. Only the
//! two encodings that matter in practice for HTML are implemented: UTF-8 and
//! windows-1252 (which the Encoding Standard also uses for `latin1`,
//! `iso-8859-1` and `ascii`). Newline normalisation happens in the cursor.

use super::character_reference::windows_1252_c1;
use super::error::TokenizerError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encodings [`decode`] knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Utf8,
    Windows1252,
}

impl Encoding {
    /// [Encoding § 4.2 Names and labels](https://encoding.spec.whatwg.org/#names-and-labels)
    ///
    /// "ASCII whitespace" is stripped and matching is ASCII case-insensitive.
    fn for_label(label: &str) -> Option<Self> {
        let label = label
            .trim_matches(|c: char| matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' '))
            .to_ascii_lowercase();
        match label.as_str() {
            "unicode-1-1-utf-8" | "unicode11utf8" | "unicode20utf8" | "utf-8" | "utf8"
            | "x-unicode20utf8" => Some(Self::Utf8),
            "ansi_x3.4-1968" | "ascii" | "cp1252" | "cp819" | "csisolatin1" | "ibm819"
            | "iso-8859-1" | "iso-ir-100" | "iso8859-1" | "iso88591" | "iso_8859-1"
            | "iso_8859-1:1987" | "l1" | "latin1" | "us-ascii" | "windows-1252"
            | "x-cp1252" => Some(Self::Windows1252),
            _ => None,
        }
    }
}

/// Decode `bytes` as the encoding named by `label`.
///
/// UTF-8 decoding is lossy: malformed sequences become U+FFFD. A leading
/// byte order mark is dropped.
///
/// # Errors
///
/// Returns [`TokenizerError::UnsupportedEncoding`] for any label that does
/// not name UTF-8 or windows-1252.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, TokenizerError> {
    let encoding = Encoding::for_label(label)
        .ok_or_else(|| TokenizerError::UnsupportedEncoding(label.to_string()))?;

    Ok(match encoding {
        Encoding::Utf8 => {
            let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            String::from_utf8_lossy(bytes).into_owned()
        }
        Encoding::Windows1252 => bytes.iter().map(|&b| decode_windows_1252(b)).collect(),
    })
}

/// Every windows-1252 byte is a single code point. Outside 0x80..=0x9F it is
/// the byte itself; inside, the C1 table decides.
fn decode_windows_1252(byte: u8) -> char {
    let code = u32::from(byte);
    windows_1252_c1(code)
        .and_then(char::from_u32)
        .unwrap_or_else(|| char::from(byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_bom_is_stripped() {
        let text = decode(b"\xEF\xBB\xBF<p>", "utf-8").unwrap();
        assert_eq!(text, "<p>");
    }

    #[test]
    fn test_utf8_is_lossy() {
        let text = decode(b"a\xFFb", "UTF8").unwrap();
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn test_labels_are_trimmed_and_case_insensitive() {
        assert_eq!(Encoding::for_label("  Latin1\n"), Some(Encoding::Windows1252));
        assert_eq!(Encoding::for_label("Unicode-1-1-UTF-8"), Some(Encoding::Utf8));
        assert_eq!(Encoding::for_label("shift_jis"), None);
    }

    #[test]
    fn test_windows_1252_c1_range() {
        let text = decode(&[0x80, 0x41, 0x8D, 0xE9, 0x99], "windows-1252").unwrap();
        assert_eq!(text, "\u{20AC}A\u{8D}\u{E9}\u{2122}");
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let err = decode(b"", "koi8-r").unwrap_err();
        assert!(matches!(err, TokenizerError::UnsupportedEncoding(ref label) if label == "koi8-r"));
    }
}
