//! # Validation Engine — Lock-Step Schema/Instance Walk
//!
//! The engine walks a schema and an instance together, depth-first,
//! appending one [`ValidationError`] per failed check and recursing into
//! children in schema document order. Two circuit breakers govern the
//! walk:
//!
//! - **max errors** (soft): once the list reaches the cap, collection
//!   stops and the truncated list is returned successfully;
//! - **max depth** (fatal): a `ref` chain deeper than the cap aborts the
//!   whole call with [`MaxDepthExceededError`], because an undecided
//!   answer must not masquerade as a truncated one.
//!
//! Both breakers travel the call tree as an explicit interrupt signal
//! rather than a fault. All evaluation state lives in a per-call VM, so a
//! schema may be validated against concurrently from any number of
//! threads.

use chrono::DateTime;
use indexmap::{IndexMap, IndexSet};
use jddf_core::{Form, Schema, Type};
use serde_json::Value;

use crate::error::{MaxDepthExceededError, ValidationError};
use crate::path::PathTracker;

/// Validator configuration, applied per [`validate`](Validator::validate)
/// call.
///
/// Both limits default to `0`, meaning unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validator {
    /// Maximum live `ref` frames before the call aborts; 0 = unlimited.
    pub max_depth: usize,
    /// Maximum errors collected before the walk stops; 0 = unlimited.
    pub max_errors: usize,
}

impl Validator {
    /// A validator with both circuit breakers disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `ref` recursion depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the error-count limit.
    #[must_use]
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Validate `instance` against `schema`, returning every mismatch in
    /// traversal order (schema document order for keys, index order for
    /// array elements).
    ///
    /// `schema` must have passed [`Schema::verify`]; validating against an
    /// unverified schema never panics, but a `ref` to a missing definition
    /// constrains nothing.
    ///
    /// # Errors
    ///
    /// [`MaxDepthExceededError`] when a `ref` chain exceeds `max_depth`.
    /// Hitting `max_errors` is not an error: the truncated list is
    /// returned as a success.
    pub fn validate(
        &self,
        schema: &Schema,
        instance: &Value,
    ) -> Result<Vec<ValidationError>, MaxDepthExceededError> {
        let mut vm = Vm {
            root: schema,
            path: PathTracker::new(),
            errors: Vec::new(),
            max_depth: self.max_depth,
            max_errors: self.max_errors,
        };

        match vm.validate(schema, instance, None) {
            Ok(()) | Err(Interrupt::MaxErrors) => Ok(vm.errors),
            Err(Interrupt::MaxDepth) => Err(MaxDepthExceededError),
        }
    }
}

/// Early-exit signals internal to the walk.
///
/// `MaxErrors` is swallowed at the top of the call; `MaxDepth` surfaces as
/// the fatal [`MaxDepthExceededError`]. Neither carries data; each means
/// only "stop now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    MaxErrors,
    MaxDepth,
}

/// One validation call's evaluation state.
struct Vm<'a> {
    /// The original root, threaded through for `ref` resolution.
    root: &'a Schema,
    path: PathTracker,
    errors: Vec<ValidationError>,
    max_depth: usize,
    max_errors: usize,
}

impl<'a> Vm<'a> {
    fn validate(
        &mut self,
        schema: &'a Schema,
        instance: &Value,
        parent_tag: Option<&str>,
    ) -> Result<(), Interrupt> {
        match &schema.form {
            Form::Empty => Ok(()),
            Form::Ref(definition) => self.validate_ref(definition, instance),
            Form::Type(primitive) => self.validate_type(*primitive, instance),
            Form::Enum(members) => self.validate_enum(members, instance),
            Form::Elements(sub) => self.validate_elements(sub, instance),
            Form::Properties {
                properties,
                optional_properties,
                additional_properties,
            } => self.validate_properties(
                properties.as_ref(),
                optional_properties.as_ref(),
                additional_properties.unwrap_or(false),
                instance,
                parent_tag,
            ),
            Form::Values(sub) => self.validate_values(sub, instance),
            Form::Discriminator { tag, mapping } => {
                self.validate_discriminator(tag, mapping, instance)
            }
        }
    }

    fn validate_ref(&mut self, definition: &str, instance: &Value) -> Result<(), Interrupt> {
        if self.max_depth != 0 && self.path.frames() == self.max_depth {
            return Err(Interrupt::MaxDepth);
        }

        let root = self.root;
        let Some(resolved) = root
            .definitions
            .as_ref()
            .and_then(|definitions| definitions.get(definition))
        else {
            // Only reachable on an unverified schema; nothing to check
            // against, so nothing constrains the instance.
            return Ok(());
        };

        self.path.push_frame(definition);
        let result = self.validate(resolved, instance, None);
        self.path.pop_frame();
        result
    }

    fn validate_type(&mut self, primitive: Type, instance: &Value) -> Result<(), Interrupt> {
        self.with_schema_token("type", |vm| {
            let ok = match primitive {
                Type::Boolean => instance.is_boolean(),
                Type::Float32 | Type::Float64 => instance.is_number(),
                Type::Int8
                | Type::Uint8
                | Type::Int16
                | Type::Uint16
                | Type::Int32
                | Type::Uint32 => integer_in_range(primitive, instance),
                Type::String => instance.is_string(),
                Type::Timestamp => instance
                    .as_str()
                    .is_some_and(|value| DateTime::parse_from_rfc3339(value).is_ok()),
            };

            if ok { Ok(()) } else { vm.push_error() }
        })
    }

    fn validate_enum(
        &mut self,
        members: &IndexSet<String>,
        instance: &Value,
    ) -> Result<(), Interrupt> {
        self.with_schema_token("enum", |vm| {
            let ok = instance
                .as_str()
                .is_some_and(|value| members.contains(value));
            if ok { Ok(()) } else { vm.push_error() }
        })
    }

    fn validate_elements(&mut self, sub: &'a Schema, instance: &Value) -> Result<(), Interrupt> {
        self.with_schema_token("elements", |vm| {
            let Some(items) = instance.as_array() else {
                return vm.push_error();
            };

            for (index, item) in items.iter().enumerate() {
                vm.with_instance_token(index.to_string(), |vm| vm.validate(sub, item, None))?;
            }
            Ok(())
        })
    }

    fn validate_properties(
        &mut self,
        properties: Option<&'a IndexMap<String, Schema>>,
        optional_properties: Option<&'a IndexMap<String, Schema>>,
        additional_properties: bool,
        instance: &Value,
        parent_tag: Option<&str>,
    ) -> Result<(), Interrupt> {
        let Some(object) = instance.as_object() else {
            // Report the wrong-type error under whichever keyword the
            // schema actually carries.
            let token = if properties.is_some() {
                "properties"
            } else {
                "optionalProperties"
            };
            return self.with_schema_token(token, |vm| vm.push_error());
        };

        if let Some(required) = properties {
            self.with_schema_token("properties", |vm| {
                for (key, sub) in required {
                    vm.with_schema_token(key, |vm| match object.get(key) {
                        Some(value) => {
                            vm.with_instance_token(key.clone(), |vm| vm.validate(sub, value, None))
                        }
                        None => vm.push_error(),
                    })?;
                }
                Ok(())
            })?;
        }

        if let Some(optional) = optional_properties {
            self.with_schema_token("optionalProperties", |vm| {
                for (key, sub) in optional {
                    vm.with_schema_token(key, |vm| match object.get(key) {
                        Some(value) => {
                            vm.with_instance_token(key.clone(), |vm| vm.validate(sub, value, None))
                        }
                        None => Ok(()),
                    })?;
                }
                Ok(())
            })?;
        }

        if !additional_properties {
            for key in object.keys() {
                let allowed = properties.is_some_and(|map| map.contains_key(key))
                    || optional_properties.is_some_and(|map| map.contains_key(key))
                    || parent_tag == Some(key.as_str());

                // No schema token for an unexpected key; the error points
                // at the properties node itself.
                if !allowed {
                    self.with_instance_token(key.clone(), |vm| vm.push_error())?;
                }
            }
        }

        Ok(())
    }

    fn validate_values(&mut self, sub: &'a Schema, instance: &Value) -> Result<(), Interrupt> {
        self.with_schema_token("values", |vm| {
            let Some(object) = instance.as_object() else {
                return vm.push_error();
            };

            for (key, value) in object {
                vm.with_instance_token(key.clone(), |vm| vm.validate(sub, value, None))?;
            }
            Ok(())
        })
    }

    fn validate_discriminator(
        &mut self,
        tag: &'a str,
        mapping: &'a IndexMap<String, Schema>,
        instance: &Value,
    ) -> Result<(), Interrupt> {
        self.with_schema_token("discriminator", |vm| {
            let Some(object) = instance.as_object() else {
                return vm.push_error();
            };

            let Some(tag_value) = object.get(tag) else {
                return vm.with_schema_token("tag", |vm| vm.push_error());
            };

            let Some(tag_string) = tag_value.as_str() else {
                return vm.with_schema_token("tag", |vm| {
                    vm.with_instance_token(tag.to_string(), |vm| vm.push_error())
                });
            };

            let Some(sub) = mapping.get(tag_string) else {
                return vm.with_schema_token("mapping", |vm| {
                    vm.with_instance_token(tag.to_string(), |vm| vm.push_error())
                });
            };

            // Descend into the selected branch with the whole object,
            // carrying the tag name so the branch's additional-properties
            // check does not flag the tag itself.
            vm.with_schema_token("mapping", |vm| {
                vm.with_schema_token(tag_string, |vm| vm.validate(sub, instance, Some(tag)))
            })
        })
    }

    /// Record one error at the current path pair.
    ///
    /// Returns the soft stop signal when the cap is reached, so the list
    /// returned to the caller holds exactly `max_errors` entries.
    fn push_error(&mut self) -> Result<(), Interrupt> {
        let (instance_path, schema_path) = self.path.capture();
        self.errors.push(ValidationError {
            instance_path,
            schema_path,
        });

        if self.max_errors != 0 && self.errors.len() == self.max_errors {
            return Err(Interrupt::MaxErrors);
        }
        Ok(())
    }

    /// Run `f` with a schema token pushed; the token pops on every exit
    /// path so an interrupt cannot leave it stale.
    fn with_schema_token<F>(&mut self, token: &str, f: F) -> Result<(), Interrupt>
    where
        F: FnOnce(&mut Self) -> Result<(), Interrupt>,
    {
        self.path.push_schema_token(token);
        let result = f(self);
        self.path.pop_schema_token();
        result
    }

    /// Run `f` with an instance token pushed; pops like
    /// [`Vm::with_schema_token`].
    fn with_instance_token<F>(&mut self, token: String, f: F) -> Result<(), Interrupt>
    where
        F: FnOnce(&mut Self) -> Result<(), Interrupt>,
    {
        self.path.push_instance_token(token);
        let result = f(self);
        self.path.pop_instance_token();
        result
    }
}

/// Integral type check: a JSON number whose value is in the type's range
/// and equal to its own rounding.
fn integer_in_range(primitive: Type, instance: &Value) -> bool {
    let Some((min, max)) = primitive.integer_bounds() else {
        return false;
    };
    match instance.as_f64() {
        Some(value) => value >= min && value <= max && value == value.round(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(text: &str) -> Schema {
        let schema: Schema = serde_json::from_str(text).unwrap();
        schema.verify().unwrap();
        schema
    }

    fn paths(errors: &[ValidationError]) -> Vec<(Vec<String>, Vec<String>)> {
        errors
            .iter()
            .map(|e| (e.instance_path.clone(), e.schema_path.clone()))
            .collect()
    }

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|t| t.to_string()).collect()
    }

    // ---- type form ----

    #[test]
    fn test_boolean_type() {
        let schema = schema(r#"{"type":"boolean"}"#);
        let validator = Validator::new();
        assert!(validator.validate(&schema, &json!(true)).unwrap().is_empty());

        let errors = validator.validate(&schema, &json!("true")).unwrap();
        assert_eq!(paths(&errors), vec![(tokens(&[]), tokens(&["type"]))]);
    }

    #[test]
    fn test_float_types_accept_any_number() {
        for ty in ["float32", "float64"] {
            let schema = schema(&format!(r#"{{"type":"{ty}"}}"#));
            let validator = Validator::new();
            assert!(validator.validate(&schema, &json!(1.5)).unwrap().is_empty());
            assert!(validator.validate(&schema, &json!(-3)).unwrap().is_empty());
            assert_eq!(validator.validate(&schema, &json!("1.5")).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_integer_bounds_per_type() {
        let cases = [
            ("int8", -128.0, 127.0),
            ("uint8", 0.0, 255.0),
            ("int16", -32768.0, 32767.0),
            ("uint16", 0.0, 65535.0),
            ("int32", -2147483648.0, 2147483647.0),
            ("uint32", 0.0, 4294967295.0),
        ];

        let validator = Validator::new();
        for (name, min, max) in cases {
            let schema = schema(&format!(r#"{{"type":"{name}"}}"#));
            assert!(validator.validate(&schema, &json!(min)).unwrap().is_empty());
            assert!(validator.validate(&schema, &json!(max)).unwrap().is_empty());
            assert_eq!(
                validator.validate(&schema, &json!(min - 1.0)).unwrap().len(),
                1,
                "below range for {name}"
            );
            assert_eq!(
                validator.validate(&schema, &json!(max + 1.0)).unwrap().len(),
                1,
                "above range for {name}"
            );
        }
    }

    #[test]
    fn test_integer_rejects_fractional_part() {
        let schema = schema(r#"{"type":"int32"}"#);
        let errors = Validator::new().validate(&schema, &json!(1.5)).unwrap();
        assert_eq!(paths(&errors), vec![(tokens(&[]), tokens(&["type"]))]);
    }

    #[test]
    fn test_integral_float_accepted() {
        let schema = schema(r#"{"type":"uint8"}"#);
        assert!(Validator::new()
            .validate(&schema, &json!(3.0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_timestamp_type() {
        let schema = schema(r#"{"type":"timestamp"}"#);
        let validator = Validator::new();

        for ok in [
            "1985-04-12T23:20:50.52Z",
            "1990-12-31T15:59:60-08:00",
            "2026-08-07T00:00:00+05:30",
        ] {
            assert!(
                validator.validate(&schema, &json!(ok)).unwrap().is_empty(),
                "expected valid: {ok}"
            );
        }

        for bad in ["", "not a timestamp", "1985-04-12", "1985-04-12T23:20:50.52"] {
            assert_eq!(
                validator.validate(&schema, &json!(bad)).unwrap().len(),
                1,
                "expected invalid: {bad}"
            );
        }

        // A non-string instance fails the same check.
        assert_eq!(validator.validate(&schema, &json!(12)).unwrap().len(), 1);
    }

    // ---- enum form ----

    #[test]
    fn test_enum_membership() {
        let schema = schema(r#"{"enum":["a","b"]}"#);
        let validator = Validator::new();
        assert!(validator.validate(&schema, &json!("a")).unwrap().is_empty());

        let errors = validator.validate(&schema, &json!("c")).unwrap();
        assert_eq!(paths(&errors), vec![(tokens(&[]), tokens(&["enum"]))]);

        // Non-strings fail membership outright.
        assert_eq!(validator.validate(&schema, &json!(1)).unwrap().len(), 1);
    }

    // ---- values form ----

    #[test]
    fn test_values_walks_every_entry() {
        let schema = schema(r#"{"values":{"type":"uint8"}}"#);
        let errors = Validator::new()
            .validate(&schema, &json!({"a": 1, "b": "x", "c": 300}))
            .unwrap();
        assert_eq!(
            paths(&errors),
            vec![
                (tokens(&["b"]), tokens(&["values", "type"])),
                (tokens(&["c"]), tokens(&["values", "type"])),
            ]
        );
    }

    #[test]
    fn test_values_rejects_non_object() {
        let schema = schema(r#"{"values":{}}"#);
        let errors = Validator::new().validate(&schema, &json!([1])).unwrap();
        assert_eq!(paths(&errors), vec![(tokens(&[]), tokens(&["values"]))]);
    }

    // ---- max errors ----

    #[test]
    fn test_zero_max_errors_is_unlimited() {
        let schema = schema(r#"{"elements":{"type":"string"}}"#);
        let errors = Validator::new()
            .validate(&schema, &json!([1, 1, 1, 1, 1]))
            .unwrap();
        assert_eq!(errors.len(), 5);
    }
}
