//! # jddf-core — Schema Model for the JSON Data Definition Format
//!
//! This crate is the foundation of the JDDF validation workspace. It
//! defines the schema form model, the JSON text encoding of schema
//! documents, and the structural verifier that gates a schema before any
//! instance is validated against it. The validation engine itself lives
//! in `jddf-validate`; this crate depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Forms are a sum type.** A schema node is exactly one of eight
//!    forms ([`Form`]), each variant carrying only its own payload. The
//!    dialect's "at most one form keyword per node" rule is enforced once,
//!    when a raw document is classified during deserialization — after
//!    that, a two-form node is unrepresentable.
//!
//! 2. **Document order is data.** `definitions`, `properties`,
//!    `optionalProperties`, `discriminator.mapping`, and `enum` preserve
//!    insertion order (`IndexMap` / `IndexSet`), because validation errors
//!    are reported in schema document order.
//!
//! 3. **Verification before use.** [`Schema::verify`] enforces the
//!    meta-rules the type system cannot: `ref` resolution against the
//!    root's definitions, non-empty enums, key disjointness across the two
//!    property maps, and the discriminator mapping rules.
//!
//! ## Crate Policy
//!
//! - No dependencies on other crates in this workspace.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Public types derive `Debug`, `Clone`, `PartialEq`, and implement
//!   `Serialize`/`Deserialize` where they appear on the wire.

pub mod encoding;
pub mod error;
pub mod schema;
pub mod types;
mod verify;

// Re-export primary types for ergonomic imports.
pub use encoding::{RawDiscriminator, RawSchema};
pub use error::SchemaError;
pub use schema::{Form, FormKind, Schema};
pub use types::Type;
