//! # JSON Text Encoding — Raw Keywords to Classified Forms
//!
//! Schema documents arrive as plain JSON objects with up to ten optional
//! keywords. Deserialization is two-stage: serde populates [`RawSchema`],
//! a field-per-keyword mirror, and the fallible conversion into
//! [`Schema`] classifies which form the keywords spell out.
//!
//! The conversion is the only construction path from text, so the "at most
//! one form per node" invariant is decided here, once, at parse time: a
//! node with two form keywords never becomes a `Schema` value. The same is
//! true of a `discriminator` missing its `tag` or `mapping`, and of an
//! `additionalProperties` flag with no properties form to govern.
//!
//! Serialization runs the conversion in reverse and is lossless: every
//! keyword present on a well-formed node is reproduced exactly, so
//! `serialize(deserialize(text))` reproduces `text` up to JSON whitespace.
//!
//! Unknown keywords are ignored on input.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::schema::{Form, Schema};
use crate::types::Type;

/// The raw, field-per-keyword mirror of a schema document.
///
/// All fields are optional; absence and presence are both preserved.
/// Nested schemas deserialize through [`Schema`] directly, so a malformed
/// node anywhere in the tree fails the whole parse with the offending
/// [`SchemaError`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
    /// The `definitions` namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, Schema>>,

    /// The `ref` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#ref: Option<String>,

    /// The `type` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Type>,

    /// The `enum` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<IndexSet<String>>,

    /// The `elements` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Box<Schema>>,

    /// The `properties` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    /// The `optionalProperties` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_properties: Option<IndexMap<String, Schema>>,

    /// The `additionalProperties` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,

    /// The `values` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Box<Schema>>,

    /// The `discriminator` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<RawDiscriminator>,
}

/// The raw mirror of the `discriminator` keyword's `{tag, mapping}` object.
///
/// Both fields are optional at this layer so that a missing one surfaces
/// as the dialect's own error rather than a generic missing-field failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDiscriminator {
    /// The `tag` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// The `mapping` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<IndexMap<String, Schema>>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = SchemaError;

    /// Classify raw keywords into a form.
    ///
    /// The keywords are consumed in the fixed priority order `ref` >
    /// `type` > `enum` > `elements` > `properties`/`optionalProperties` >
    /// `values` > `discriminator`; with the multi-keyword rejection below,
    /// the order is a classification convenience, never a tiebreak.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MultipleForms`] when more than one form keyword is set.
    /// - [`SchemaError::MissingDiscriminatorTag`] / [`SchemaError::MissingDiscriminatorMapping`]
    ///   for an incomplete `discriminator`.
    /// - [`SchemaError::StrayAdditionalProperties`] when `additionalProperties`
    ///   appears without `properties` or `optionalProperties`.
    fn try_from(raw: RawSchema) -> Result<Self, SchemaError> {
        let RawSchema {
            definitions,
            r#ref,
            r#type,
            r#enum,
            elements,
            properties,
            optional_properties,
            additional_properties,
            values,
            discriminator,
        } = raw;

        let keywords_set = [
            r#ref.is_some(),
            r#type.is_some(),
            r#enum.is_some(),
            elements.is_some(),
            properties.is_some() || optional_properties.is_some(),
            values.is_some(),
            discriminator.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count();

        if keywords_set > 1 {
            return Err(SchemaError::MultipleForms);
        }

        if additional_properties.is_some()
            && properties.is_none()
            && optional_properties.is_none()
        {
            return Err(SchemaError::StrayAdditionalProperties);
        }

        let form = if let Some(definition) = r#ref {
            Form::Ref(definition)
        } else if let Some(primitive) = r#type {
            Form::Type(primitive)
        } else if let Some(members) = r#enum {
            Form::Enum(members)
        } else if let Some(schema) = elements {
            Form::Elements(schema)
        } else if properties.is_some() || optional_properties.is_some() {
            Form::Properties {
                properties,
                optional_properties,
                additional_properties,
            }
        } else if let Some(schema) = values {
            Form::Values(schema)
        } else if let Some(raw_discriminator) = discriminator {
            Form::Discriminator {
                tag: raw_discriminator
                    .tag
                    .ok_or(SchemaError::MissingDiscriminatorTag)?,
                mapping: raw_discriminator
                    .mapping
                    .ok_or(SchemaError::MissingDiscriminatorMapping)?,
            }
        } else {
            Form::Empty
        };

        Ok(Schema { definitions, form })
    }
}

impl From<Schema> for RawSchema {
    fn from(schema: Schema) -> Self {
        let mut raw = RawSchema {
            definitions: schema.definitions,
            ..RawSchema::default()
        };

        match schema.form {
            Form::Empty => {}
            Form::Ref(definition) => raw.r#ref = Some(definition),
            Form::Type(primitive) => raw.r#type = Some(primitive),
            Form::Enum(members) => raw.r#enum = Some(members),
            Form::Elements(schema) => raw.elements = Some(schema),
            Form::Properties {
                properties,
                optional_properties,
                additional_properties,
            } => {
                raw.properties = properties;
                raw.optional_properties = optional_properties;
                raw.additional_properties = additional_properties;
            }
            Form::Values(schema) => raw.values = Some(schema),
            Form::Discriminator { tag, mapping } => {
                raw.discriminator = Some(RawDiscriminator {
                    tag: Some(tag),
                    mapping: Some(mapping),
                });
            }
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{Form, FormKind, Schema};
    use crate::types::Type;

    fn parse(text: &str) -> Result<Schema, serde_json::Error> {
        serde_json::from_str(text)
    }

    // ---- round-trip fidelity ----

    #[test]
    fn test_roundtrip_all_forms_in_one_document() {
        // Every form appears at some node; each node carries one form.
        let text = concat!(
            r#"{"definitions":{"a":{"type":"uint32"},"b":{"enum":["x","y"]}},"#,
            r#""properties":{"r":{"ref":"a"},"e":{"elements":{"type":"string"}},"#,
            r#""v":{"values":{"type":"boolean"}},"#,
            r#""d":{"discriminator":{"tag":"kind","mapping":{"one":{"properties":{"p":{"type":"timestamp"}}}}}}},"#,
            r#""optionalProperties":{"o":{"ref":"b"}},"#,
            r#""additionalProperties":true}"#
        );

        let schema = parse(text).unwrap();
        assert_eq!(schema.form_kind(), FormKind::Properties);
        assert_eq!(serde_json::to_string(&schema).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_preserves_key_order() {
        let text = r#"{"properties":{"z":{},"m":{},"a":{}}}"#;
        let schema = parse(text).unwrap();
        assert_eq!(serde_json::to_string(&schema).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_nested_definitions() {
        // Nested nodes may carry definitions; they must survive even though
        // only the root's are consulted at resolution time.
        let text = r#"{"elements":{"definitions":{"inner":{}},"type":"int8"}}"#;
        let schema = parse(text).unwrap();
        assert_eq!(serde_json::to_string(&schema).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_through_value_equality() {
        let text = r#"{"discriminator":{"tag":"t","mapping":{"a":{"properties":{"p":{}}}}}}"#;
        let schema = parse(text).unwrap();
        let reparsed: Schema =
            serde_json::from_str(&serde_json::to_string(&schema).unwrap()).unwrap();
        assert_eq!(schema, reparsed);
    }

    #[test]
    fn test_empty_document_is_empty_form() {
        let schema = parse("{}").unwrap();
        assert_eq!(schema, Schema::empty());
        assert_eq!(serde_json::to_string(&schema).unwrap(), "{}");
    }

    // ---- classification ----

    #[test]
    fn test_classification_per_keyword() {
        let cases = [
            (r#"{"ref":"a","definitions":{"a":{}}}"#, FormKind::Ref),
            (r#"{"type":"boolean"}"#, FormKind::Type),
            (r#"{"enum":["a"]}"#, FormKind::Enum),
            (r#"{"elements":{}}"#, FormKind::Elements),
            (r#"{"properties":{"a":{}}}"#, FormKind::Properties),
            (r#"{"optionalProperties":{"a":{}}}"#, FormKind::Properties),
            (r#"{"values":{}}"#, FormKind::Values),
            (
                r#"{"discriminator":{"tag":"t","mapping":{}}}"#,
                FormKind::Discriminator,
            ),
        ];

        for (text, kind) in cases {
            assert_eq!(parse(text).unwrap().form_kind(), kind, "for {text}");
        }
    }

    #[test]
    fn test_properties_and_optional_properties_are_one_form() {
        let schema = parse(r#"{"properties":{"a":{}},"optionalProperties":{"b":{}}}"#).unwrap();
        match schema.form {
            Form::Properties {
                properties,
                optional_properties,
                ..
            } => {
                assert!(properties.is_some());
                assert!(optional_properties.is_some());
            }
            other => panic!("expected properties form, got {other:?}"),
        }
    }

    #[test]
    fn test_type_wire_name() {
        let schema = parse(r#"{"type":"uint8"}"#).unwrap();
        assert_eq!(schema.form, Form::Type(Type::Uint8));
    }

    #[test]
    fn test_unknown_keywords_ignored() {
        let schema = parse(r#"{"type":"string","nullable":true}"#).unwrap();
        assert_eq!(schema.form, Form::Type(Type::String));
    }

    // ---- rejection ----

    #[test]
    fn test_multiple_forms_rejected() {
        let err = parse(r#"{"ref":"a","type":"boolean"}"#).unwrap_err();
        assert!(err.to_string().contains("more than one form"));
    }

    #[test]
    fn test_multiple_forms_rejected_on_nested_node() {
        assert!(parse(r#"{"elements":{"enum":["a"],"values":{}}}"#).is_err());
    }

    #[test]
    fn test_discriminator_missing_tag_rejected() {
        let err = parse(r#"{"discriminator":{"mapping":{}}}"#).unwrap_err();
        assert!(err.to_string().contains("missing its tag"));
    }

    #[test]
    fn test_discriminator_missing_mapping_rejected() {
        let err = parse(r#"{"discriminator":{"tag":"t"}}"#).unwrap_err();
        assert!(err.to_string().contains("missing its mapping"));
    }

    #[test]
    fn test_stray_additional_properties_rejected() {
        assert!(parse(r#"{"additionalProperties":true}"#).is_err());
        assert!(parse(r#"{"type":"string","additionalProperties":false}"#).is_err());
    }

    #[test]
    fn test_additional_properties_with_properties_accepted() {
        let text = r#"{"properties":{"a":{}},"additionalProperties":false}"#;
        let schema = parse(text).unwrap();
        assert_eq!(serde_json::to_string(&schema).unwrap(), text);
    }
}
