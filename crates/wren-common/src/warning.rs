//! De-duplicated warnings for unsupported constructs.
//!
//! A tokenizer can see the same unsupported construct many times on one
//! page, e.g. every `<![CDATA[` in an HTML document. Each distinct message is reported once
//! through the `log` facade at `warn` level; repeats are dropped until
//! [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already reported (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about an unsupported construct (reported once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "CDATA section in HTML content");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_report = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_report {
        log::warn!(target: "wren", "[{component}] {message}");
    }
}

/// Returns true if this exact warning has already been reported.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when starting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_is_recorded_once() {
        warn_once("Test", "recorded once");
        warn_once("Test", "recorded once");
        assert!(has_warned("Test", "recorded once"));
        assert!(!has_warned("Test", "never reported"));
    }

    #[test]
    fn test_component_is_part_of_the_key() {
        warn_once("First", "shared message");
        assert!(has_warned("First", "shared message"));
        assert!(!has_warned("Second", "shared message"));
    }
}
