//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple
//! times. Used by the HTML parser and the box builder to report tolerated
//! oddities (stray end tags, unknown charsets, unknown tags) without
//! failing the load.

use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already printed (to deduplicate).
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a tolerated oddity (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("html", "unexpected </td> outside a table row");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[wren {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call when loading a new document).
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
