//! Conformance tests in the html5lib-tests tokenizer format.
//!
//! <https://github.com/html5lib/html5lib-tests/tree/master/tokenizer>
//!
//! Each case lists an input, optional initial states and last start tag, and
//! the expected tokens with adjacent character tokens merged. Only the token
//! output is compared; parse errors are covered by `tokenizer_tests.rs`.

use serde_json::{Map, Value, json};
use wren_html::{HTMLTokenizer, Token, TokenizerOptions, TokenizerState};

const FIXTURE: &str = include_str!("fixtures/tokenizer.test");

/// Convert tokens to the html5lib output format.
fn to_html5lib_output(tokens: Vec<Token>) -> Value {
    let mut output: Vec<Value> = Vec::new();
    let mut pending_text = String::new();

    for token in tokens {
        if let Token::Character { data } = token {
            pending_text.push(data);
            continue;
        }
        if !pending_text.is_empty() {
            output.push(json!(["Character", std::mem::take(&mut pending_text)]));
        }
        match token {
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => output.push(json!([
                "DOCTYPE",
                name,
                public_identifier,
                system_identifier,
                !force_quirks
            ])),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                let attributes: Map<String, Value> = attributes
                    .into_iter()
                    .map(|attr| (attr.name, Value::String(attr.value)))
                    .collect();
                if self_closing {
                    output.push(json!(["StartTag", name, attributes, true]));
                } else {
                    output.push(json!(["StartTag", name, attributes]));
                }
            }
            Token::EndTag { name, .. } => output.push(json!(["EndTag", name])),
            Token::Comment { data } => output.push(json!(["Comment", data])),
            Token::Character { .. } | Token::EndOfFile => {}
        }
    }
    if !pending_text.is_empty() {
        output.push(json!(["Character", pending_text]));
    }
    Value::Array(output)
}

fn run_case(test: &Value, initial_state: &str) {
    let description = test["description"].as_str().unwrap_or("<unnamed>");
    let input = test["input"].as_str().unwrap();

    let state: TokenizerState = initial_state
        .parse()
        .unwrap_or_else(|_| panic!("{description}: unknown state {initial_state:?}"));
    let mut options = TokenizerOptions::default().with_initial_state(state);
    if let Some(last_start_tag) = test["lastStartTag"].as_str() {
        options = options.with_last_start_tag(last_start_tag);
    }

    let tokens = HTMLTokenizer::with_options(input, options).into_tokens();
    assert_eq!(
        to_html5lib_output(tokens),
        test["output"],
        "{description} (initial state: {initial_state})"
    );
}

#[test]
fn test_html5lib_tokenizer_fixture() {
    let fixture: Value = serde_json::from_str(FIXTURE).unwrap();
    let tests = fixture["tests"].as_array().unwrap();
    assert!(!tests.is_empty());

    for test in tests {
        match test["initialStates"].as_array() {
            Some(states) => {
                for state in states {
                    run_case(test, state.as_str().unwrap());
                }
            }
            None => run_case(test, "Data state"),
        }
    }
}

#[test]
fn test_output_coalesces_characters() {
    let tokens = HTMLTokenizer::new("ab<i>c").into_tokens();
    assert_eq!(
        to_html5lib_output(tokens),
        json!([["Character", "ab"], ["StartTag", "i", {}], ["Character", "c"]])
    );
}
