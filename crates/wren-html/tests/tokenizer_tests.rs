//! Integration tests for the HTML tokenizer.

use wren_html::{
    Attribute, HTMLTokenizer, ParseErrorKind, SourcePosition, SourceSpan, SpannedToken, Token,
    TokenizerOptions, TokenizerState,
};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).into_tokens()
}

/// Tokenize the way a tree builder would drive the tokenizer, switching into
/// RCDATA, RAWTEXT, script data or PLAINTEXT after the matching start tags.
fn tokenize_with_content_models(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        if let Token::StartTag { name, .. } = &token
            && let Some(state) = TokenizerState::for_text_element(name)
        {
            tokenizer.switch_to(state);
        }
        tokens.push(token);
    }
    tokens
}

/// Concatenate the character tokens.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

/// Tokenize and return only the kinds of parse errors seen.
fn error_kinds(input: &str) -> Vec<ParseErrorKind> {
    let mut tokenizer = HTMLTokenizer::new(input);
    while tokenizer.next_token().is_some() {}
    tokenizer.parse_errors().iter().map(|e| e.kind).collect()
}

fn attributes_of(token: &Token) -> &[Attribute] {
    match token {
        Token::StartTag { attributes, .. } | Token::EndTag { attributes, .. } => attributes,
        _ => panic!("Expected a tag token, got {token:?}"),
    }
}

// =============================================================================
// Basic tokens
// =============================================================================

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_nothing_after_eof() {
    let mut tokenizer = HTMLTokenizer::new("a");
    assert_eq!(tokenizer.next_token(), Some(Token::Character { data: 'a' }));
    assert_eq!(tokenizer.next_token(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next_token(), None);
    assert_eq!(tokenizer.next_token(), None);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let tokens = tokenize("<DiV CLASS=Intro>");
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(
        attributes_of(&tokens[0]),
        &[Attribute::new("class".to_string(), "Intro".to_string())]
    );
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => assert_eq!(name, "div"),
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: " hello ".to_string()
        }
    );
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].tag_name(), Some("p"));
    assert_eq!(text_of(&tokens), "Hi");
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(tokens[4].is_eof());
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_attribute_value_forms() {
    let tokens = tokenize(r#"<input a="1" b='2' c=3 disabled>"#);
    assert_eq!(
        attributes_of(&tokens[0]),
        &[
            Attribute::new("a".to_string(), "1".to_string()),
            Attribute::new("b".to_string(), "2".to_string()),
            Attribute::new("c".to_string(), "3".to_string()),
            Attribute::new("disabled".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let mut tokenizer = HTMLTokenizer::new("<a x=1 X=2 y=3>");
    let token = tokenizer.next_token().unwrap();
    assert_eq!(
        attributes_of(&token),
        &[
            Attribute::new("x".to_string(), "1".to_string()),
            Attribute::new("y".to_string(), "3".to_string()),
        ]
    );
    let kinds: Vec<_> = tokenizer.parse_errors().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ParseErrorKind::DuplicateAttribute]);
}

#[test]
fn test_missing_attribute_value() {
    let tokens = tokenize("<a href=>");
    assert_eq!(
        attributes_of(&tokens[0]),
        &[Attribute::new("href".to_string(), String::new())]
    );
    assert_eq!(
        error_kinds("<a href=>"),
        vec![ParseErrorKind::MissingAttributeValue]
    );
}

#[test]
fn test_missing_whitespace_between_attributes() {
    assert_eq!(
        error_kinds(r#"<a b="1"c="2">"#),
        vec![ParseErrorKind::MissingWhitespaceBetweenAttributes]
    );
}

#[test]
fn test_end_tag_with_attributes() {
    let tokens = tokenize("</p class=x>");
    assert_eq!(attributes_of(&tokens[0]).len(), 1);
    assert_eq!(
        error_kinds("</p class=x>"),
        vec![ParseErrorKind::EndTagWithAttributes]
    );
}

#[test]
fn test_end_tag_with_trailing_solidus() {
    let tokens = tokenize("</br/>");
    assert!(matches!(&tokens[0], Token::EndTag { name, .. } if name == "br"));
    assert_eq!(
        error_kinds("</br/>"),
        vec![ParseErrorKind::EndTagWithTrailingSolidus]
    );
}

// =============================================================================
// Tag open edge cases
// =============================================================================

#[test]
fn test_less_than_before_non_letter_is_text() {
    let tokens = tokenize("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert_eq!(
        error_kinds("a < b"),
        vec![ParseErrorKind::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn test_eof_before_tag_name() {
    let tokens = tokenize("<");
    assert_eq!(tokens, vec![Token::new_character('<'), Token::EndOfFile]);
    assert_eq!(error_kinds("<"), vec![ParseErrorKind::EofBeforeTagName]);
}

#[test]
fn test_missing_end_tag_name_is_dropped() {
    assert_eq!(tokenize("</>"), vec![Token::EndOfFile]);
    assert_eq!(error_kinds("</>"), vec![ParseErrorKind::MissingEndTagName]);
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    assert_eq!(tokenize("<div class="), vec![Token::EndOfFile]);
    assert_eq!(error_kinds("<div class="), vec![ParseErrorKind::EofInTag]);
}

#[test]
fn test_processing_instruction_becomes_bogus_comment() {
    let tokens = tokenize("<?xml version?>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "?xml version?".to_string()
        }
    );
    assert_eq!(
        error_kinds("<?xml version?>"),
        vec![ParseErrorKind::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

#[test]
fn test_null_in_data_is_replaced() {
    let tokens = tokenize("a\0b");
    assert_eq!(text_of(&tokens), "a\u{FFFD}b");
    assert_eq!(
        error_kinds("a\0b"),
        vec![ParseErrorKind::UnexpectedNullCharacter]
    );
}

#[test]
fn test_null_in_text_states_is_replaced() {
    for state in [
        TokenizerState::RCDATA,
        TokenizerState::RAWTEXT,
        TokenizerState::PLAINTEXT,
    ] {
        let mut tokenizer = HTMLTokenizer::with_options(
            "a\0b",
            TokenizerOptions::default().with_initial_state(state),
        );
        let mut tokens = Vec::new();
        while let Some(token) = tokenizer.next_token() {
            tokens.push(token);
        }
        assert_eq!(text_of(&tokens), "a\u{FFFD}b", "in the {state} state");
        let kinds: Vec<_> = tokenizer.parse_errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ParseErrorKind::UnexpectedNullCharacter],
            "in the {state} state"
        );
    }
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn test_abrupt_empty_comment() {
    let tokens = tokenize("<!-->");
    assert_eq!(tokens[0], Token::Comment { data: String::new() });
    assert_eq!(
        error_kinds("<!-->"),
        vec![ParseErrorKind::AbruptClosingOfEmptyComment]
    );
}

#[test]
fn test_incorrectly_opened_comment() {
    let tokens = tokenize("<!x>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "x".to_string()
        }
    );
    assert_eq!(
        error_kinds("<!x>"),
        vec![ParseErrorKind::IncorrectlyOpenedComment]
    );
}

#[test]
fn test_eof_in_comment_emits_comment() {
    let tokens = tokenize("<!--abc");
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: "abc".to_string()
            },
            Token::EndOfFile
        ]
    );
    assert_eq!(error_kinds("<!--abc"), vec![ParseErrorKind::EofInComment]);
}

#[test]
fn test_comment_with_dashes_inside() {
    let tokens = tokenize("<!--a-b--c-->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "a-b--c".to_string()
        }
    );
}

// =============================================================================
// DOCTYPE
// =============================================================================

#[test]
fn test_doctype_name_is_lowercased() {
    let tokens = tokenize("<!doctype HTML>");
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(name), .. } if name == "html"));
}

#[test]
fn test_doctype_public_and_system_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_identifier: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_system_identifier_only() {
    let tokens = tokenize("<!DOCTYPE html SYSTEM 'about:legacy-compat'>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: None,
            system_identifier: Some("about:legacy-compat".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            name: None,
            force_quirks: true,
            ..
        }
    ));
    assert_eq!(
        error_kinds("<!DOCTYPE>"),
        vec![ParseErrorKind::MissingDoctypeName]
    );
}

#[test]
fn test_doctype_with_junk_after_name() {
    let tokens = tokenize("<!DOCTYPE html junk>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            force_quirks: true,
            public_identifier: None,
            ..
        }
    ));
    assert_eq!(
        error_kinds("<!DOCTYPE html junk>"),
        vec![ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName]
    );
}

#[test]
fn test_doctype_missing_quote_before_identifier() {
    let tokens = tokenize("<!DOCTYPE html PUBLIC foo>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            force_quirks: true,
            ..
        }
    ));
    assert_eq!(
        error_kinds("<!DOCTYPE html PUBLIC foo>"),
        vec![ParseErrorKind::MissingQuoteBeforeDoctypePublicIdentifier]
    );
}

#[test]
fn test_eof_in_doctype() {
    let tokens = tokenize("<!DOCTYPE html");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            force_quirks: true,
            ..
        }
    ));
    assert!(tokens[1].is_eof());
    assert_eq!(
        error_kinds("<!DOCTYPE html"),
        vec![ParseErrorKind::EofInDoctype]
    );
}

// =============================================================================
// Character references
// =============================================================================

#[test]
fn test_character_reference_bare_ampersand() {
    let tokens = tokenize("a & b");
    assert_eq!(text_of(&tokens), "a & b");
    assert!(error_kinds("a & b").is_empty());
}

#[test]
fn test_named_character_references() {
    assert_eq!(text_of(&tokenize("&amp;&lt;&gt;")), "&<>");
    assert_eq!(text_of(&tokenize("&notin;")), "\u{2209}");
}

#[test]
fn test_full_names_win_over_legacy_prefixes() {
    assert_eq!(text_of(&tokenize("&copysr;")), "\u{2117}");
    assert_eq!(text_of(&tokenize("&gtrless;")), "\u{2277}");
    assert_eq!(text_of(&tokenize("&Aopf;&rightarrow;")), "\u{1D538}\u{2192}");
    assert!(error_kinds("&copysr;&hookrightarrow;&NotEqual;&lbrace;").is_empty());
}

#[test]
fn test_named_character_reference_without_semicolon() {
    let tokens = tokenize("&notit;");
    assert_eq!(text_of(&tokens), "\u{AC}it;");
    assert_eq!(
        error_kinds("&notit;"),
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_named_character_reference_unknown() {
    let tokens = tokenize("&foo;");
    assert_eq!(text_of(&tokens), "&foo;");
    assert_eq!(
        error_kinds("&foo;"),
        vec![ParseErrorKind::UnknownNamedCharacterReference]
    );
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a title="&lt;b&gt;">"#);
    assert_eq!(attributes_of(&tokens[0])[0].value, "<b>");
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_alphanumeric() {
    let tokens = tokenize(r#"<a href="?x=1&not=2&notit">"#);
    assert_eq!(attributes_of(&tokens[0])[0].value, "?x=1&not=2&notit");
    assert!(error_kinds(r#"<a href="?x=1&not=2&notit">"#).is_empty());
}

#[test]
fn test_legacy_reference_followed_by_equals_in_attribute() {
    let tokens = tokenize(r#"<a href="&amp=1">"#);
    assert_eq!(attributes_of(&tokens[0])[0].value, "&amp=1");
}

#[test]
fn test_legacy_reference_at_end_of_attribute() {
    let tokens = tokenize(r#"<a title="&amp">"#);
    assert_eq!(attributes_of(&tokens[0])[0].value, "&");
    assert_eq!(
        error_kinds(r#"<a title="&amp">"#),
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X43;")), "ABC");
}

#[test]
fn test_numeric_reference_without_semicolon() {
    assert_eq!(text_of(&tokenize("&#65x")), "Ax");
    assert_eq!(
        error_kinds("&#65x"),
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_numeric_reference_without_digits() {
    assert_eq!(text_of(&tokenize("&#;")), "&#;");
    assert_eq!(text_of(&tokenize("&#xg;")), "&#xg;");
    assert_eq!(
        error_kinds("&#;"),
        vec![ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference]
    );
}

#[test]
fn test_numeric_reference_c1_remapping() {
    assert_eq!(text_of(&tokenize("&#x80;&#150;")), "\u{20AC}\u{2013}");
    assert_eq!(
        error_kinds("&#x80;"),
        vec![ParseErrorKind::ControlCharacterReference]
    );
}

#[test]
fn test_numeric_reference_replacements() {
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#xD800;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
    assert_eq!(
        error_kinds("&#0;"),
        vec![ParseErrorKind::NullCharacterReference]
    );
    assert_eq!(
        error_kinds("&#xD800;"),
        vec![ParseErrorKind::SurrogateCharacterReference]
    );
}

#[test]
fn test_huge_numeric_reference_does_not_overflow() {
    let input = "&#99999999999999999999999999;";
    assert_eq!(text_of(&tokenize(input)), "\u{FFFD}");
    assert_eq!(
        error_kinds(input),
        vec![ParseErrorKind::CharacterReferenceOutsideUnicodeRange]
    );
}

#[test]
fn test_character_references_in_rcdata() {
    let tokens = tokenize_with_content_models("<textarea>&lt;p&gt;</textarea>");
    assert_eq!(text_of(&tokens), "<p>");
}

// =============================================================================
// Text element content models
// =============================================================================

#[test]
fn test_style_element_rawtext() {
    let tokens = tokenize_with_content_models("<style>p > a { color: red }</style>");
    assert_eq!(tokens[0].tag_name(), Some("style"));
    assert_eq!(text_of(&tokens), "p > a { color: red }");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_title_element_rcdata() {
    let tokens = tokenize_with_content_models("<title>a <b> &amp; c</title>");
    assert_eq!(text_of(&tokens), "a <b> & c");
    let tags: Vec<_> = tokens.iter().filter_map(Token::tag_name).collect();
    assert_eq!(tags, vec!["title", "title"]);
}

#[test]
fn test_rawtext_ignores_character_references() {
    let tokens = tokenize_with_content_models("<style>&amp;</style>");
    assert_eq!(text_of(&tokens), "&amp;");
}

#[test]
fn test_style_with_wrong_end_tag() {
    let tokens = tokenize_with_content_models("<style>a</p>b</style>");
    assert_eq!(text_of(&tokens), "a</p>b");
}

#[test]
fn test_end_tag_name_is_case_insensitive_in_rawtext() {
    let tokens = tokenize_with_content_models("<xmp>x</XMP>");
    assert_eq!(text_of(&tokens), "x");
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "xmp"));
}

#[test]
fn test_appropriate_end_tag_with_attributes_in_rcdata() {
    let tokens = tokenize_with_content_models("<title>x</title id=a>");
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_script_data_with_comment_like_text() {
    let tokens = tokenize_with_content_models("<script><!--<script></script>--></script>");
    assert_eq!(text_of(&tokens), "<!--<script></script>-->");
    let tags: Vec<_> = tokens.iter().filter_map(Token::tag_name).collect();
    assert_eq!(tags, vec!["script", "script"]);
}

#[test]
fn test_script_data_ignores_inappropriate_end_tag() {
    let tokens = tokenize_with_content_models("<script>a</scrip>b</script>");
    assert_eq!(text_of(&tokens), "a</scrip>b");
    let tags: Vec<_> = tokens.iter().filter_map(Token::tag_name).collect();
    assert_eq!(tags, vec!["script", "script"]);
}

#[test]
fn test_script_data_escaped_end_tag() {
    let tokens = tokenize_with_content_models("<script><!-- a </script>");
    assert_eq!(text_of(&tokens), "<!-- a ");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_eof_in_escaped_script() {
    let mut tokenizer = HTMLTokenizer::with_options(
        "<!-- a",
        TokenizerOptions::default()
            .with_initial_state(TokenizerState::ScriptData)
            .with_last_start_tag("script"),
    );
    while tokenizer.next_token().is_some() {}
    let kinds: Vec<_> = tokenizer.parse_errors().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ParseErrorKind::EofInScriptHtmlCommentLikeText]);
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_with_content_models("<plaintext></plaintext><b>");
    assert_eq!(text_of(&tokens), "</plaintext><b>");
}

#[test]
fn test_end_tag_without_start_tag_is_not_appropriate() {
    let tokenizer = HTMLTokenizer::with_options(
        "</title>",
        TokenizerOptions::default().with_initial_state(TokenizerState::RCDATA),
    );
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "</title>");
}

#[test]
fn test_initial_state_and_last_start_tag_options() {
    let tokenizer = HTMLTokenizer::with_options(
        "a<b></textarea>",
        TokenizerOptions::default()
            .with_initial_state(TokenizerState::RCDATA)
            .with_last_start_tag("textarea"),
    );
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "a<b>");
    assert!(matches!(&tokens[4], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_for_text_element() {
    assert_eq!(
        TokenizerState::for_text_element("title"),
        Some(TokenizerState::RCDATA)
    );
    assert_eq!(
        TokenizerState::for_text_element("iframe"),
        Some(TokenizerState::RAWTEXT)
    );
    assert_eq!(
        TokenizerState::for_text_element("script"),
        Some(TokenizerState::ScriptData)
    );
    assert_eq!(TokenizerState::for_text_element("div"), None);
}

#[test]
fn test_state_names_parse() {
    assert_eq!(
        "RCDATA state".parse::<TokenizerState>(),
        Ok(TokenizerState::RCDATA)
    );
    assert_eq!(
        "script data state".parse::<TokenizerState>(),
        Ok(TokenizerState::ScriptData)
    );
    assert_eq!("Data".parse::<TokenizerState>(), Ok(TokenizerState::Data));
}

// =============================================================================
// CDATA
// =============================================================================

#[test]
fn test_cdata_outside_foreign_content_is_a_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "[CDATA[x]]".to_string()
        }
    );
    assert_eq!(
        error_kinds("<![CDATA[x]]>"),
        vec![ParseErrorKind::CdataInHtmlContent]
    );
}

#[test]
fn test_cdata_outside_foreign_content_warns() {
    let _ = tokenize("<![CDATA[y]]>");
    assert!(wren_common::warning::has_warned(
        "HTML Tokenizer",
        "CDATA section outside foreign content"
    ));
}

#[test]
fn test_cdata_in_foreign_content() {
    let tokenizer = HTMLTokenizer::with_options(
        "<![CDATA[a]b]]c]]>d",
        TokenizerOptions::default().with_foreign_content(true),
    );
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "a]b]]cd");
}

#[test]
fn test_eof_in_cdata() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[abc");
    tokenizer.set_foreign_content(true);
    while tokenizer.next_token().is_some() {}
    let kinds: Vec<_> = tokenizer.parse_errors().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ParseErrorKind::EofInCdata]);
}

// =============================================================================
// Parse errors, positions and the public surface
// =============================================================================

#[test]
fn test_parse_error_position() {
    let mut tokenizer = HTMLTokenizer::new("a\n<b");
    while tokenizer.next_token().is_some() {}
    let errors = tokenizer.take_parse_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::EofInTag);
    assert_eq!(errors[0].position, SourcePosition { line: 1, column: 2 });
    assert_eq!(errors[0].to_string(), "2:3: eof-in-tag");
    assert!(tokenizer.parse_errors().is_empty());
}

#[test]
fn test_parse_errors_can_be_disabled() {
    let mut tokenizer = HTMLTokenizer::with_options(
        "</>&#0;",
        TokenizerOptions::default().with_record_parse_errors(false),
    );
    while tokenizer.next_token().is_some() {}
    assert!(tokenizer.parse_errors().is_empty());
}

#[test]
fn test_tokenizer_is_an_iterator() {
    let names: Vec<String> = HTMLTokenizer::new("<a><b>text</b></a>")
        .filter_map(|token| match token {
            Token::StartTag { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_switch_to_between_tokens() {
    let mut tokenizer = HTMLTokenizer::new("<x><y></x>");
    let first = tokenizer.next_token().unwrap();
    assert_eq!(first.tag_name(), Some("x"));
    tokenizer.switch_to(TokenizerState::RAWTEXT);
    assert_eq!(tokenizer.state(), TokenizerState::RAWTEXT);
    let rest = tokenizer.into_tokens();
    assert_eq!(text_of(&rest), "<y>");
    assert!(matches!(&rest[3], Token::EndTag { name, .. } if name == "x"));
}

#[test]
fn test_set_last_start_tag_makes_end_tag_appropriate() {
    let mut tokenizer = HTMLTokenizer::new("a</title>b");
    tokenizer.set_last_start_tag(Some("title".to_string()));
    tokenizer.switch_to(TokenizerState::RCDATA);
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "ab");
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "title"));

    let mut tokenizer = HTMLTokenizer::with_options(
        "</title>",
        TokenizerOptions::default().with_last_start_tag("title"),
    );
    tokenizer.set_last_start_tag(None);
    tokenizer.switch_to(TokenizerState::RCDATA);
    assert_eq!(text_of(&tokenizer.into_tokens()), "</title>");
}

// =============================================================================
// Source spans
// =============================================================================

fn spanned_tokens(input: &str) -> Vec<SpannedToken> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_spanned_token() {
        tokens.push(token);
    }
    tokens
}

const fn at(line: usize, column: usize) -> SourcePosition {
    SourcePosition { line, column }
}

#[test]
fn test_span_of_multi_line_tag() {
    let tokens = spanned_tokens("<a\nhref=x\n>");
    assert_eq!(tokens[0].token.tag_name(), Some("a"));
    assert_eq!(
        tokens[0].span,
        SourceSpan {
            start: at(0, 0),
            end: at(2, 1)
        }
    );
    assert_eq!(tokens[0].span.to_string(), "1:1-3:2");
}

#[test]
fn test_spans_of_text_comment_and_eof() {
    let tokens = spanned_tokens("ab\n<!-- c -->");
    assert_eq!(tokens[0].token, Token::new_character('a'));
    assert_eq!(tokens[0].span, SourceSpan { start: at(0, 0), end: at(0, 1) });
    assert_eq!(tokens[2].token, Token::new_character('\n'));
    assert_eq!(tokens[2].span, SourceSpan { start: at(0, 2), end: at(1, 0) });

    assert!(matches!(tokens[3].token, Token::Comment { .. }));
    assert_eq!(tokens[3].span, SourceSpan { start: at(1, 0), end: at(1, 10) });

    assert_eq!(tokens[4].token, Token::EndOfFile);
    assert_eq!(tokens[4].span, SourceSpan { start: at(1, 10), end: at(1, 10) });
}

#[test]
fn test_span_of_end_tag_in_rcdata() {
    let mut tokenizer = HTMLTokenizer::with_options(
        "x\n</title>",
        TokenizerOptions::default()
            .with_initial_state(TokenizerState::RCDATA)
            .with_last_start_tag("title"),
    );
    let _ = tokenizer.next_spanned_token();
    let _ = tokenizer.next_spanned_token();
    let end_tag = tokenizer.next_spanned_token().unwrap();
    assert_eq!(end_tag.token.tag_name(), Some("title"));
    assert_eq!(end_tag.span, SourceSpan { start: at(1, 0), end: at(1, 8) });
}

#[test]
fn test_spans_are_not_part_of_token_equality() {
    let first = spanned_tokens("<p>");
    let second = spanned_tokens("\n\n<p>");
    assert_eq!(first[0].token, second[2].token);
    assert_ne!(first[0].span, second[2].span);
}

#[test]
fn test_from_bytes_windows_1252() {
    let tokenizer = HTMLTokenizer::from_bytes(b"<p>\x80\xE9", "latin1").unwrap();
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "\u{20AC}\u{E9}");
}

#[test]
fn test_from_bytes_unknown_encoding() {
    assert!(HTMLTokenizer::from_bytes(b"", "x-mystery").is_err());
}

#[test]
fn test_token_serializes_with_type_tag() {
    let json = serde_json::to_value(Token::new_character('a')).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "Character", "data": "a" }));
}
