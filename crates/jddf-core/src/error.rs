//! # Schema Errors — Structural Failure Taxonomy
//!
//! One error type covers every way a schema document can be structurally
//! invalid. The verifier reports the first problem it encounters in
//! traversal order; it is a validity gate, not an error collector.
//!
//! Part of the taxonomy is decided at deserialization time rather than by
//! the verifier: a raw document that sets more than one form keyword, or a
//! `discriminator` without its `tag` or `mapping`, never produces a
//! [`Schema`](crate::Schema) value at all. Those variants are returned
//! through the deserializer instead.

use thiserror::Error;

/// Structural failure in a schema document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A single node sets more than one form keyword.
    ///
    /// Raised while classifying a raw document into the form sum type.
    /// Hand-constructed schemas cannot express this state.
    #[error("schema sets more than one form keyword on a single node")]
    MultipleForms,

    /// A `ref` names a definition the root schema does not declare.
    #[error("no such definition: {0:?}")]
    NoSuchDefinition(String),

    /// An `enum` with no members can match nothing.
    #[error("enum must have at least one member")]
    EmptyEnum,

    /// A property key is claimed more than once, by some combination of
    /// `properties`, `optionalProperties`, and `discriminator.tag`.
    #[error("repeated property: {0:?}")]
    RepeatedProperty(String),

    /// A `discriminator` without a `tag`.
    ///
    /// Raised at deserialization; the sum type carries the tag by value.
    #[error("discriminator is missing its tag")]
    MissingDiscriminatorTag,

    /// A `discriminator` without a `mapping`.
    ///
    /// Raised at deserialization; the sum type carries the mapping by value.
    #[error("discriminator is missing its mapping")]
    MissingDiscriminatorMapping,

    /// A discriminator mapping entry whose schema is not of the properties
    /// form. The named key is the offending mapping entry.
    #[error("discriminator mapping {0:?} is not of the properties form")]
    NonPropertiesMapping(String),

    /// `additionalProperties` on a node with neither `properties` nor
    /// `optionalProperties`. Raised at deserialization; the flag belongs to
    /// the properties form alone.
    #[error("additionalProperties requires properties or optionalProperties")]
    StrayAdditionalProperties,
}
