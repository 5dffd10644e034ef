//! Common utilities for the wren tokenizer crates.
//!
//! This crate provides shared infrastructure used by the tokenizer and its hosts:
//! - **Warning System** - de-duplicated reports of unsupported constructs

pub mod warning;
