// Codec module: conversion between verbose and compact values
//
// Compaction validates first and then walks the validated tree. Inflation
// walks first and validates the rebuilt tree once at the end, so shape
// problems in compact input surface from that final validation.

pub mod types;
pub mod json;
mod compaction;
mod inflation;

use tracing::trace;

use crate::codec::types::Value;
use crate::internal::error::ValidationResult;
use crate::schema::types::SchemaType;
use crate::schema::validator::{SchemaValidator, ValidatorConfig};

/// Converts values between their verbose and compact forms under a schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaCodec {
    validator: SchemaValidator,
}

impl SchemaCodec {
    /// Creates a codec with a default-configured validator
    pub fn new() -> Self {
        Self {
            validator: SchemaValidator::new(),
        }
    }

    /// Creates a codec whose validator uses `config`
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self::with_validator(SchemaValidator::with_config(config))
    }

    pub fn with_validator(validator: SchemaValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// Turns a verbose value into its compact form.
    ///
    /// Fails if `value` does not conform to `schema_type`; nothing is
    /// compacted in that case. Coercions and defaults applied by validation
    /// are part of the output.
    pub fn compact(&self, schema_type: &SchemaType, value: &Value) -> ValidationResult<Value> {
        let validated = self.validator.validate(schema_type, value)?;
        trace!(schema = schema_type.type_name(), "compacting validated value");
        Ok(compaction::compact_validated(schema_type, validated))
    }

    /// Rebuilds a verbose value from its compact form.
    ///
    /// The whole tree is rebuilt before anything is checked; a compact value
    /// with the wrong shape fails at that final validation.
    pub fn inflate(&self, schema_type: &SchemaType, value: &Value) -> ValidationResult<Value> {
        trace!(schema = schema_type.type_name(), "inflating compact value");
        let inflated = inflation::inflate_unchecked(schema_type, value);
        self.validator.validate(schema_type, &inflated)
    }
}

/// Compacts `value` with a default-configured codec.
pub fn compact(schema_type: &SchemaType, value: &Value) -> ValidationResult<Value> {
    SchemaCodec::new().compact(schema_type, value)
}

/// Inflates `value` with a default-configured codec.
pub fn inflate(schema_type: &SchemaType, value: &Value) -> ValidationResult<Value> {
    SchemaCodec::new().inflate(schema_type, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::SchemaField;
    use crate::schema::validator::{KeyOrder, UnknownFields};

    fn tagged() -> SchemaType {
        SchemaType::object_with_catchall(
            vec![SchemaField::new("x", SchemaType::Integer)],
            SchemaType::String,
        )
    }

    #[test]
    fn test_compact_follows_value_key_order() {
        let value = Value::object([("y", Value::from("v1")), ("x", Value::from(2))]);
        let compacted = compact(&tagged(), &value).unwrap();
        assert_eq!(
            compacted,
            Value::from(vec![
                Value::from(vec![Value::from("y"), Value::from("v1")]),
                Value::from(2),
            ])
        );
    }

    #[test]
    fn test_inflate_follows_schema_key_order() {
        let compacted = Value::from(vec![
            Value::from(2),
            Value::from(vec![Value::from("y"), Value::from("v1")]),
        ]);
        let inflated = inflate(&tagged(), &compacted).unwrap();
        assert_eq!(
            inflated,
            Value::object([("x", Value::from(2)), ("y", Value::from("v1"))])
        );
    }

    #[test]
    fn test_schema_key_order_makes_compaction_order_insensitive() {
        let codec = SchemaCodec::with_config(ValidatorConfig {
            key_order: KeyOrder::Schema,
            ..ValidatorConfig::default()
        });
        let value = Value::object([("y", Value::from("v1")), ("x", Value::from(2))]);
        let compacted = codec.compact(&tagged(), &value).unwrap();
        assert_eq!(
            compacted,
            Value::from(vec![
                Value::from(2),
                Value::from(vec![Value::from("y"), Value::from("v1")]),
            ])
        );
        assert_eq!(
            codec.inflate(&tagged(), &compacted).unwrap(),
            Value::object([("x", Value::from(2)), ("y", Value::from("v1"))])
        );
    }

    #[test]
    fn test_passthrough_round_trips_unknown_keys() {
        let codec = SchemaCodec::with_config(ValidatorConfig {
            unknown_fields: UnknownFields::Passthrough,
            ..ValidatorConfig::default()
        });
        let schema = SchemaType::object(vec![SchemaField::new("id", SchemaType::Integer)]);
        let value = Value::object([
            ("id", Value::from(1)),
            ("meta", Value::object([("k", Value::Bool(true))])),
        ]);
        let compacted = codec.compact(&schema, &value).unwrap();
        assert_eq!(
            compacted,
            Value::from(vec![
                Value::from(1),
                Value::from(vec![Value::from("meta"), Value::object([("k", Value::Bool(true))])]),
            ])
        );
        assert_eq!(codec.inflate(&schema, &compacted).unwrap(), value);

        // The default codec rejects the same compact value at final validation
        let err = inflate(&schema, &compacted).unwrap_err();
        assert_eq!(err.path, "$.meta");
    }

    #[test]
    fn test_compact_rejects_before_walking() {
        let err = compact(&tagged(), &Value::object([("x", Value::from("nope"))])).unwrap_err();
        assert_eq!(err.path, "$.x");
        assert_eq!(err.message, "expected integer, got string");
    }
}
