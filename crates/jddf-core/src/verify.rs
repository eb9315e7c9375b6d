//! # Schema Verifier — Structural Validity Gate
//!
//! A schema must pass verification before instances are validated against
//! it. Verification is a pure depth-first read of the tree; the first
//! problem encountered in traversal order is returned and nothing else is
//! collected.
//!
//! Reference resolution is root-relative: recursion threads the original
//! root alongside the current node, because `ref` always resolves against
//! the root's `definitions`, never a nested node's.

use crate::error::SchemaError;
use crate::schema::{Form, Schema};

impl Schema {
    /// Check this schema, as a root, against the dialect's meta-rules.
    ///
    /// Every definition is verified first, then the root's own form tree.
    /// Verification is a precondition of
    /// `Validator::validate`; an unverified schema validates instances
    /// with unspecified (though memory-safe) results.
    ///
    /// # Errors
    ///
    /// The first [`SchemaError`] encountered: an unresolved `ref`, an
    /// empty `enum`, a key in both `properties` and `optionalProperties`,
    /// a discriminator mapping to a non-properties schema, or a mapping
    /// branch redeclaring the discriminator's tag.
    pub fn verify(&self) -> Result<(), SchemaError> {
        if let Some(definitions) = &self.definitions {
            for definition in definitions.values() {
                definition.verify_with_root(self)?;
            }
        }

        self.verify_with_root(self)
    }

    fn verify_with_root(&self, root: &Schema) -> Result<(), SchemaError> {
        match &self.form {
            Form::Empty | Form::Type(_) => Ok(()),

            Form::Ref(definition) => {
                let resolves = root
                    .definitions
                    .as_ref()
                    .is_some_and(|definitions| definitions.contains_key(definition));
                if resolves {
                    Ok(())
                } else {
                    Err(SchemaError::NoSuchDefinition(definition.clone()))
                }
            }

            Form::Enum(members) => {
                if members.is_empty() {
                    Err(SchemaError::EmptyEnum)
                } else {
                    Ok(())
                }
            }

            Form::Elements(schema) | Form::Values(schema) => schema.verify_with_root(root),

            Form::Properties {
                properties,
                optional_properties,
                ..
            } => {
                if let Some(required) = properties {
                    for schema in required.values() {
                        schema.verify_with_root(root)?;
                    }
                }

                if let Some(optional) = optional_properties {
                    for schema in optional.values() {
                        schema.verify_with_root(root)?;
                    }
                }

                if let (Some(required), Some(optional)) = (properties, optional_properties) {
                    if let Some(repeated) = required.keys().find(|key| optional.contains_key(*key))
                    {
                        return Err(SchemaError::RepeatedProperty(repeated.clone()));
                    }
                }

                Ok(())
            }

            Form::Discriminator { tag, mapping } => {
                for (value, schema) in mapping {
                    schema.verify_with_root(root)?;

                    let Form::Properties {
                        properties,
                        optional_properties,
                        ..
                    } = &schema.form
                    else {
                        return Err(SchemaError::NonPropertiesMapping(value.clone()));
                    };

                    // The tag is implicitly reserved on every branch.
                    let redeclares_tag = properties
                        .as_ref()
                        .is_some_and(|map| map.contains_key(tag))
                        || optional_properties
                            .as_ref()
                            .is_some_and(|map| map.contains_key(tag));

                    if redeclares_tag {
                        return Err(SchemaError::RepeatedProperty(tag.clone()));
                    }
                }

                Ok(())
            }
        }
    }
}
