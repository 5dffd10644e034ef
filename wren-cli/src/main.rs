//! Wren CLI
//!
//! Tokenizes an HTML document and prints the token stream.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use owo_colors::OwoColorize;
use wren_html::tokenizer::encoding;
use wren_html::{HTMLTokenizer, ParseError, SpannedToken, Token, TokenizerOptions, TokenizerState};

/// Wren - dump the tokens of an HTML document
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Tokenize a file
    wren ./index.html

    # Tokenize inline HTML and show parse errors
    wren --errors --html '<p class=a class=b>&notit;'

    # Start in the RAWTEXT state, as inside <style>
    wren --state 'RAWTEXT state' --last-start-tag style --html 'a</style>'

    # One JSON object per token
    wren --json --follow-content-models page.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Tokenize this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Encoding label used to decode the file
    #[arg(long, value_name = "LABEL", default_value = "utf-8")]
    encoding: String,

    /// Initial tokenizer state, e.g. "RCDATA state" or "ScriptData"
    #[arg(long, value_name = "STATE", value_parser = parse_state)]
    state: Option<TokenizerState>,

    /// Name of the start tag an end tag must match to close RCDATA, RAWTEXT or script data
    #[arg(long, value_name = "TAG")]
    last_start_tag: Option<String>,

    /// Switch content models after title, textarea, style, script and similar start tags
    #[arg(long)]
    follow_content_models: bool,

    /// Print one JSON object per token
    #[arg(long)]
    json: bool,

    /// Print parse errors to stderr
    #[arg(long)]
    errors: bool,

    /// Show where in the input each token came from
    #[arg(long)]
    spans: bool,

    /// Log parse errors as they are found (RUST_LOG=trace also logs state switches)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_state(s: &str) -> Result<TokenizerState, String> {
    s.parse::<TokenizerState>()
        .map_err(|e| format!("unknown tokenizer state {s:?}: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(cli.verbose)),
    )
    .init();

    let input = load_input(&cli)?;
    debug!("decoded {} bytes of input", input.len());

    let mut options = TokenizerOptions::default();
    if let Some(state) = cli.state {
        options = options.with_initial_state(state);
    }
    if let Some(ref tag) = cli.last_start_tag {
        options = options.with_last_start_tag(tag.clone());
    }

    let mut tokenizer = HTMLTokenizer::with_options(&input, options);
    let mut printer = TokenPrinter::new(cli.json, cli.spans);
    let mut count = 0usize;

    while let Some(spanned) = tokenizer.next_spanned_token() {
        if cli.follow_content_models {
            follow_content_model(&mut tokenizer, &spanned.token);
        }
        printer.print(&spanned)?;
        count += 1;
    }
    printer.flush_text()?;
    info!("{count} tokens");

    if cli.errors {
        print_parse_errors(tokenizer.parse_errors());
    }

    Ok(())
}

/// Log filter used when `RUST_LOG` is unset. `--verbose` shows each parse
/// error as it is found.
const fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Read the input named on the command line.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    let Some(ref path) = cli.path else {
        anyhow::bail!("nothing to tokenize: pass a file path or --html");
    };
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    encoding::decode(&bytes, &cli.encoding)
        .with_context(|| format!("failed to decode {}", path.display()))
}

/// Do what tree construction would do after inserting a text element.
fn follow_content_model(tokenizer: &mut HTMLTokenizer, token: &Token) {
    if let Token::StartTag { name, .. } = token
        && let Some(state) = TokenizerState::for_text_element(name)
    {
        tokenizer.switch_to(state);
    }
}

fn print_parse_errors(errors: &[ParseError]) {
    for error in errors {
        eprintln!(
            "{} {} {}",
            error.position.dimmed(),
            "parse error:".red().bold(),
            error.kind
        );
    }
    if !errors.is_empty() {
        eprintln!("{} parse error(s)", errors.len());
    }
}

/// Writes tokens to stdout, merging runs of character tokens into one line
/// in the human-readable format.
struct TokenPrinter {
    json: bool,
    spans: bool,
    pending_text: String,
}

impl TokenPrinter {
    const fn new(json: bool, spans: bool) -> Self {
        Self {
            json,
            spans,
            pending_text: String::new(),
        }
    }

    fn print(&mut self, spanned: &SpannedToken) -> Result<()> {
        let token = &spanned.token;
        if self.json {
            let line = if self.spans {
                serde_json::to_string(spanned)?
            } else {
                serde_json::to_string(token)?
            };
            println!("{line}");
            return Ok(());
        }
        if let Token::Character { data } = token {
            self.pending_text.push(*data);
            return Ok(());
        }
        self.flush_text()?;
        if self.spans {
            print!("{} ", spanned.span.dimmed());
        }
        match token {
            Token::StartTag { .. } => println!("{}", token.green()),
            Token::EndTag { .. } => println!("{}", token.red()),
            Token::Comment { .. } => println!("{}", token.dimmed()),
            Token::Doctype { .. } => println!("{}", token.cyan()),
            Token::EndOfFile => println!("{}", "EOF".bold()),
            Token::Character { .. } => {}
        }
        Ok(())
    }

    fn flush_text(&mut self) -> Result<()> {
        if !self.pending_text.is_empty() {
            let text = std::mem::take(&mut self.pending_text);
            println!("{}", serde_json::to_string(&text)?.yellow());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_filter_to_debug() {
        assert_eq!(default_log_filter(true), "debug");
        assert_eq!(default_log_filter(false), "warn");
    }

    #[test]
    fn test_cli_accepts_spans_and_verbose() {
        let cli = Cli::try_parse_from(["wren", "--spans", "-v", "--html", "<p>"]).unwrap();
        assert!(cli.spans);
        assert!(cli.verbose);
        assert_eq!(cli.html.as_deref(), Some("<p>"));
    }
}
