//! # Validation Outcomes — Path-Addressed Errors and the Fatal Depth Breaker
//!
//! An instance that fails a check is never a fault: every mismatch becomes
//! one [`ValidationError`] in the returned list and the walk continues.
//! The single fatal condition is [`MaxDepthExceededError`] — when the
//! `ref` recursion limit is hit, validity is undecided rather than
//! "has errors", so no list is produced at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation error: where in the instance, and where in the
/// schema.
///
/// Both paths are owned snapshots taken at the moment the error was
/// detected; the tokens are unescaped. An error reached through a `ref`
/// carries a schema path relative to the referenced definition, rooted at
/// `["definitions", name]`, not a path from the schema root.
///
/// `Display` and the pointer accessors render the JSON-Pointer analogy
/// (`"/" + tokens joined by "/"`, with RFC 6901 `~0`/`~1` escaping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path tokens locating the offending instance value.
    pub instance_path: Vec<String>,
    /// Path tokens locating the schema construct that raised the error.
    pub schema_path: Vec<String>,
}

impl ValidationError {
    /// The instance path as an RFC 6901 JSON Pointer (empty for the root).
    pub fn instance_pointer(&self) -> String {
        json_pointer(&self.instance_path)
    }

    /// The schema path as an RFC 6901 JSON Pointer (empty for the root).
    pub fn schema_pointer(&self) -> String {
        json_pointer(&self.schema_path)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let instance = self.instance_pointer();
        let schema = self.schema_pointer();
        write!(
            f,
            "instance {} does not conform to schema {}",
            if instance.is_empty() { "(root)" } else { instance.as_str() },
            if schema.is_empty() { "(root)" } else { schema.as_str() },
        )
    }
}

/// The `ref` recursion depth limit was reached; the result is undecided.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("max ref depth exceeded during validation")]
pub struct MaxDepthExceededError;

/// Render path tokens as an RFC 6901 JSON Pointer. `~` must be escaped
/// before `/`, or the escape itself would be re-escaped.
fn json_pointer(tokens: &[String]) -> String {
    let mut pointer = String::new();
    for token in tokens {
        pointer.push('/');
        pointer.push_str(&token.replace('~', "~0").replace('/', "~1"));
    }
    pointer
}
