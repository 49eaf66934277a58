//! Layout diagnostics with deduplication.
//!
//! Parse failures and similar recoverable problems are reported here. The
//! same message for the same component is only logged once, so a node that
//! fails to parse the same shorthand on every tick does not flood the log.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (logged once per unique message).
///
/// Returns `true` if the warning was emitted, `false` if it had already been
/// seen.
///
/// # Example
/// ```
/// use harmonia_common::warning::warn_once;
///
/// assert!(warn_once("units", "unknown unit suffix 'em' in '2em'"));
/// assert!(!warn_once("units", "unknown unit suffix 'em' in '2em'"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let fresh = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if fresh {
        tracing::warn!(component, "{message}");
    }
    fresh
}

/// Clear all recorded warnings (call when loading a new scene).
///
/// ```
/// use harmonia_common::warning::{clear_warnings, warn_once};
///
/// assert!(warn_once("scene", "node 'list' has no height"));
/// clear_warnings();
/// assert!(warn_once("scene", "node 'list' has no height"));
/// ```
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
