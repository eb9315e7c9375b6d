//! # jddf-validate — Validation Engine for JDDF Schemas
//!
//! Validates JSON instances against schemas from `jddf-core`, producing a
//! list of path-addressed errors rather than a yes/no answer. Each error
//! pairs an instance path (where the bad value sits) with a schema path
//! (which schema construct rejected it), both as plain token sequences in
//! the JSON Pointer style.
//!
//! ## Key Design Principles
//!
//! 1. **Mismatches are data, not faults.** Validation walks past every
//!    failed check and keeps collecting. The one fatal condition is the
//!    `ref` depth breaker, which means the answer is unknown rather than
//!    "invalid".
//!
//! 2. **Bounded by configuration, not by luck.** `max_depth` caps `ref`
//!    recursion (mutually-recursive definitions are legal schemas);
//!    `max_errors` caps the list a pathological instance can produce.
//!
//! 3. **No shared state.** A call builds its own path stacks and error
//!    list; schemas are read-only throughout, so one schema can serve
//!    many threads concurrently.
//!
//! ## Example
//!
//! ```
//! use jddf_core::Schema;
//! use jddf_validate::Validator;
//!
//! let schema: Schema = serde_json::from_str(
//!     r#"{"properties":{"name":{"type":"string"}}}"#,
//! )?;
//! schema.verify()?;
//!
//! let instance = serde_json::json!({"name": 42});
//! let errors = Validator::new().validate(&schema, &instance)?;
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].instance_path, vec!["name"]);
//! assert_eq!(errors[0].schema_path, vec!["properties", "name", "type"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Purely synchronous; callers needing timeouts wrap the call.

pub mod engine;
pub mod error;
mod path;

// Re-export primary types for ergonomic imports.
pub use engine::Validator;
pub use error::{MaxDepthExceededError, ValidationError};
