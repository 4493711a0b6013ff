//! Parser warnings with colored terminal output.
//!
//! Messages are deduplicated so a document that trips the same unsupported
//! path thousands of times prints it once. Used by the HTML crate to report
//! reserved options and, through `WarningSink`, individual parse errors.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning for `component`, printing it to stderr the first time
/// this exact message is seen.
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "fragment parsing without a context element");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(component, message) {
        eprintln!("{}", format!("[quill {component}] warning: {message}").yellow());
    }
}

/// Like [`warn_once`], for messages that recur at many places in one input.
///
/// Only `message` is recorded, so the set of seen warnings stays bounded by the
/// number of distinct messages. `location` is printed alongside the first
/// occurrence.
pub fn warn_once_at(component: &str, message: &str, location: &str) {
    if record(component, message) {
        eprintln!(
            "{}",
            format!("[quill {component}] warning: {message} at {location}").yellow()
        );
    }
}

/// Add `[component] message` to the seen set; true if it was not there yet.
fn record(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

/// Forget every recorded warning (call before parsing an unrelated input).
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
    fn test_repeated_message_is_recorded_once() {
        let before = warning_count();
        warn_once("Test", "repeated message");
        warn_once("Test", "repeated message");
        assert_eq!(warning_count(), before + 1);

        warn_once("Other", "repeated message");
        assert_eq!(warning_count(), before + 2);

        warn_once_at("Other", "located message", "1:1");
        warn_once_at("Other", "located message", "7:3");
        warn_once_at("Other", "located message", "9:12");
        assert_eq!(warning_count(), before + 3);

        clear_warnings();
        assert_eq!(warning_count(), 0);
    }
}
