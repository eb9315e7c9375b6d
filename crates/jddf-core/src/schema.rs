//! # Schema Form Model — The Eight-Form Sum Type
//!
//! A schema node takes exactly one of eight mutually-exclusive forms. The
//! source dialect expresses this as "at most one of several optional
//! keywords"; here the forms are an explicit sum type, so a node with two
//! forms is unrepresentable once a document has been classified. The
//! classification itself (and the rejection of multi-keyword nodes) lives
//! in [`crate::encoding`].
//!
//! ## Key Design Principles
//!
//! 1. **One payload per node.** Each [`Form`] variant carries only its own
//!    data. There are no dormant `None` fields to keep consistent.
//!
//! 2. **Document order survives.** All keyed collections are `IndexMap` /
//!    `IndexSet`, so validation errors come out in the order the schema
//!    author wrote the keys.
//!
//! 3. **`definitions` on every node.** Only the root's map is consulted
//!    when a `ref` resolves, but nested nodes may carry the keyword and it
//!    must survive a round-trip through JSON text.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::encoding::RawSchema;
use crate::types::Type;

/// A schema node: an optional `definitions` namespace plus one form.
///
/// Construct schemas in code with struct literals or [`Schema::empty`],
/// or parse them from JSON text with `serde_json` (the deserializer
/// classifies the raw keywords into [`Form`] and rejects ambiguous
/// documents). Before validating instances against a schema, gate it
/// through [`Schema::verify`](crate::Schema::verify).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
pub struct Schema {
    /// The `ref` namespace. Kept on every node for round-trip fidelity;
    /// reference resolution consults only the root schema's map.
    pub definitions: Option<IndexMap<String, Schema>>,
    /// The node's single form payload.
    pub form: Form,
}

impl Schema {
    /// The empty form with no definitions: matches any instance.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fieldless classification tag of this node's form.
    pub fn form_kind(&self) -> FormKind {
        match &self.form {
            Form::Empty => FormKind::Empty,
            Form::Ref(_) => FormKind::Ref,
            Form::Type(_) => FormKind::Type,
            Form::Enum(_) => FormKind::Enum,
            Form::Elements(_) => FormKind::Elements,
            Form::Properties { .. } => FormKind::Properties,
            Form::Values(_) => FormKind::Values,
            Form::Discriminator { .. } => FormKind::Discriminator,
        }
    }
}

impl From<Form> for Schema {
    fn from(form: Form) -> Self {
        Self {
            definitions: None,
            form,
        }
    }
}

/// The eight forms a schema node may take, each carrying its payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Form {
    /// Matches any instance.
    #[default]
    Empty,

    /// Matches whatever the named definition in the root schema matches.
    Ref(String),

    /// Primitive type check.
    Type(Type),

    /// The instance must be a string drawn from this set.
    Enum(IndexSet<String>),

    /// The instance must be an array; every element is validated against
    /// the sub-schema.
    Elements(Box<Schema>),

    /// The instance must be an object with the given required and/or
    /// optional keys. At least one of the two maps is present on any
    /// classified document.
    Properties {
        /// Required keys; a missing key is a validation error.
        properties: Option<IndexMap<String, Schema>>,
        /// Optional keys; a missing key is silently skipped.
        optional_properties: Option<IndexMap<String, Schema>>,
        /// When `Some(true)`, instance keys outside both maps are allowed;
        /// otherwise each unlisted key is a validation error.
        additional_properties: Option<bool>,
    },

    /// The instance must be an object; every value is validated against
    /// the sub-schema.
    Values(Box<Schema>),

    /// The instance must be an object whose string-valued `tag` property
    /// selects the mapped properties-form schema governing the rest.
    Discriminator {
        /// The property whose value routes the instance.
        tag: String,
        /// Tag value to properties-form schema.
        mapping: IndexMap<String, Schema>,
    },
}

/// Fieldless classification tag for the eight forms.
///
/// Derived from a node with [`Schema::form_kind`]; useful where only the
/// shape matters, such as the verifier's discriminator mapping check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Matches anything.
    Empty,
    /// Reference into the root's definitions.
    Ref,
    /// Primitive type check.
    Type,
    /// Closed string set.
    Enum,
    /// Homogeneous array.
    Elements,
    /// Keyed object.
    Properties,
    /// Homogeneous object.
    Values,
    /// Tagged union over properties-form branches.
    Discriminator,
}
