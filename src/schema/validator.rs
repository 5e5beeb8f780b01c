// Schema validator
//
// Checks a value against a schema type and returns the normalized value:
// coerced scalars, filled-in defaults, and object entries in the configured
// key order. The input is never modified.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::debug;

use crate::codec::json::bytes_from_hex;
use crate::codec::types::{Field, Value};
use crate::internal::error::{ValidationError, ValidationResult};
use crate::schema::defaults::DefaultValueStrategy;
use crate::schema::types::{SchemaField, SchemaType};
use crate::schema::utils::{is_integral, ValuePath};

/// What to do with object keys that are neither declared nor covered by a
/// catch-all type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Fail validation
    #[default]
    Reject,
    /// Drop them from the output
    Strip,
    /// Keep them unchecked
    Passthrough,
}

/// Order of entries in a validated object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Keep the input's order
    #[default]
    Preserve,
    /// Declared fields first, in declaration order, then other keys in input
    /// order
    Schema,
}

/// Configuration for schema validation
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Handling of undeclared keys in objects without a catch-all
    pub unknown_fields: UnknownFields,

    /// Entry order of validated objects
    pub key_order: KeyOrder,

    /// Which missing fields get a default value
    pub default_strategy: DefaultValueStrategy,

    /// Whether to validate field constraints (min/max, pattern, etc.)
    pub validate_constraints: bool,

    /// Whether to validate required fields
    pub validate_required: bool,

    /// Integral floats become integers under `Integer`, integers become
    /// floats under `Number`
    pub coerce_numbers: bool,

    /// Hex strings become bytes under `Binary`
    pub coerce_binary_from_hex: bool,

    /// Maximum nesting depth for validation
    pub max_nesting_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
            key_order: KeyOrder::Preserve,
            default_strategy: DefaultValueStrategy::Declared,
            validate_constraints: true,
            validate_required: true,
            coerce_numbers: true,
            coerce_binary_from_hex: true,
            max_nesting_depth: 64,
        }
    }
}

/// Schema validator
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    config: ValidatorConfig,
}

impl SchemaValidator {
    /// Creates a new schema validator with default configuration
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }

    /// Creates a new schema validator with custom configuration
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a value against a schema type, returning the normalized value.
    pub fn validate(&self, schema_type: &SchemaType, value: &Value) -> ValidationResult<Value> {
        self.validate_value(schema_type, value, &ValuePath::root(), 0)
            .inspect_err(|err| {
                debug!(path = %err.path, message = %err.message, "validation failed");
            })
    }

    fn validate_value(
        &self,
        schema_type: &SchemaType,
        value: &Value,
        path: &ValuePath<'_>,
        depth: usize,
    ) -> ValidationResult<Value> {
        if depth > self.config.max_nesting_depth {
            return Err(ValidationError::new(
                path,
                format!(
                    "Maximum nesting depth ({}) exceeded",
                    self.config.max_nesting_depth
                ),
            ));
        }

        match (schema_type, value) {
            (SchemaType::Any, value) => Ok(value.clone()),
            (SchemaType::Null, Value::Null) => Ok(Value::Null),
            (SchemaType::Boolean, Value::Bool(b)) => Ok(Value::Bool(*b)),
            (SchemaType::Integer, Value::Integer(i)) => Ok(Value::Integer(*i)),
            (SchemaType::Integer, Value::Float(f)) if self.config.coerce_numbers && is_integral(*f) => {
                Ok(Value::Integer(*f as i64))
            }
            (SchemaType::Number, Value::Float(f)) => Ok(Value::Float(*f)),
            (SchemaType::Number, Value::Integer(i)) => {
                if self.config.coerce_numbers {
                    Ok(Value::Float(*i as f64))
                } else {
                    Ok(Value::Integer(*i))
                }
            }
            (SchemaType::String, Value::String(s)) => Ok(Value::String(s.clone())),
            (SchemaType::Binary, Value::Bytes(b)) => Ok(Value::Bytes(b.clone())),
            (SchemaType::Binary, Value::String(s)) if self.config.coerce_binary_from_hex => {
                bytes_from_hex(s)
                    .map(Value::Bytes)
                    .ok_or_else(|| ValidationError::new(path, "expected binary, got non-hex string"))
            }
            (SchemaType::Literal(expected), value) => {
                if value == expected {
                    Ok(value.clone())
                } else {
                    Err(ValidationError::new(
                        path,
                        format!("expected literal {:?}, got {:?}", expected, value),
                    ))
                }
            }
            (SchemaType::Enum(names), Value::String(s)) => {
                if names.iter().any(|name| name == s) {
                    Ok(Value::String(s.clone()))
                } else {
                    Err(ValidationError::new(
                        path,
                        format!("'{}' is not one of {:?}", s, names),
                    ))
                }
            }
            (SchemaType::Nullable(_), Value::Null) => Ok(Value::Null),
            (SchemaType::Nullable(inner), value) => self.validate_value(inner, value, path, depth),
            (SchemaType::Union(types), value) => {
                // Try each possible type
                for t in types {
                    if let Ok(validated) = self.validate_value(t, value, path, depth) {
                        return Ok(validated);
                    }
                }
                Err(ValidationError::new(
                    path,
                    format!("{} does not match any type in union", value.value_type()),
                ))
            }
            (SchemaType::Tuple { items, rest }, Value::Array(elements)) => {
                self.validate_tuple(items, rest.as_deref(), elements, path, depth)
            }
            (SchemaType::Array(element_type), Value::Array(elements)) => elements
                .iter()
                .enumerate()
                .map(|(i, element)| self.validate_value(element_type, element, &path.index(i), depth + 1))
                .collect::<ValidationResult<Vec<_>>>()
                .map(Value::Array),
            (SchemaType::Object { fields, catchall }, Value::Object(entries)) => {
                self.validate_object(fields, catchall.as_deref(), entries, path, depth)
            }
            // Type mismatch
            (expected, actual) => Err(ValidationError::new(
                path,
                format!("expected {}, got {}", expected.type_name(), actual.value_type()),
            )),
        }
    }

    fn validate_tuple(
        &self,
        items: &[SchemaType],
        rest: Option<&SchemaType>,
        elements: &[Value],
        path: &ValuePath<'_>,
        depth: usize,
    ) -> ValidationResult<Value> {
        let too_short = elements.len() < items.len();
        let too_long = rest.is_none() && elements.len() > items.len();
        if too_short || too_long {
            let expected = if rest.is_some() {
                format!("at least {}", items.len())
            } else {
                items.len().to_string()
            };
            return Err(ValidationError::new(
                path,
                format!("expected {} elements, got {}", expected, elements.len()),
            ));
        }

        let mut validated = Vec::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            // Length was checked above, so every position has a schema
            if let Some(element_type) = items.get(i).or(rest) {
                validated.push(self.validate_value(element_type, element, &path.index(i), depth + 1)?);
            }
        }
        Ok(Value::Array(validated))
    }

    /// Validates an object against a schema object type
    fn validate_object(
        &self,
        fields: &[SchemaField],
        catchall: Option<&SchemaType>,
        entries: &[Field],
        path: &ValuePath<'_>,
        depth: usize,
    ) -> ValidationResult<Value> {
        // Create a map of field names to declaration index for quick lookup
        let field_map: HashMap<&str, usize> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.name.as_str(), i))
            .collect();

        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
        // Validated entries, each tagged with its declaration index
        let mut output: Vec<(Option<usize>, Field)> = Vec::with_capacity(entries.len());

        for entry in entries {
            let child = path.key(&entry.key);
            if !seen.insert(entry.key.as_str()) {
                return Err(ValidationError::new(&child, "duplicate key"));
            }

            if let Some(&index) = field_map.get(entry.key.as_str()) {
                let field = &fields[index];
                let value = self.validate_field(field, &entry.value, &child, depth)?;
                output.push((Some(index), Field::new(entry.key.clone(), value)));
            } else if let Some(catchall) = catchall {
                let value = self.validate_value(catchall, &entry.value, &child, depth + 1)?;
                output.push((None, Field::new(entry.key.clone(), value)));
            } else {
                match self.config.unknown_fields {
                    UnknownFields::Reject => {
                        return Err(ValidationError::new(&child, "unknown field"));
                    }
                    UnknownFields::Strip => {}
                    UnknownFields::Passthrough => output.push((None, entry.clone())),
                }
            }
        }

        // Fill or reject missing fields
        for (index, field) in fields.iter().enumerate() {
            if seen.contains(field.name.as_str()) {
                continue;
            }
            let child = path.key(&field.name);
            if let Some(default) = self.config.default_strategy.default_for(field) {
                let value = self.validate_field(field, &default, &child, depth)?;
                // Keep declared fields in declaration order relative to each other
                let position = output
                    .iter()
                    .position(|(other, _)| matches!(other, Some(other) if *other > index))
                    .unwrap_or(output.len());
                output.insert(position, (Some(index), Field::new(field.name.clone(), value)));
            } else if field.required && self.config.validate_required {
                return Err(ValidationError::new(
                    &child,
                    format!("Required field '{}' is missing", field.name),
                ));
            }
        }

        if self.config.key_order == KeyOrder::Schema {
            // Stable: undeclared keys keep their input order at the end
            output.sort_by_key(|(index, _)| index.unwrap_or(usize::MAX));
        }

        Ok(Value::Object(output.into_iter().map(|(_, field)| field).collect()))
    }

    fn validate_field(
        &self,
        field: &SchemaField,
        value: &Value,
        path: &ValuePath<'_>,
        depth: usize,
    ) -> ValidationResult<Value> {
        let value = self.validate_value(&field.field_type, value, path, depth + 1)?;
        if self.config.validate_constraints {
            self.validate_constraints(field, &value, path)?;
        }
        Ok(value)
    }

    /// Validates field-specific constraints
    fn validate_constraints(
        &self,
        field: &SchemaField,
        value: &Value,
        path: &ValuePath<'_>,
    ) -> ValidationResult<()> {
        let options = &field.options;

        let number = match value {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        };
        if let Some(n) = number {
            if let Some(min) = options.min_value {
                if n < min {
                    return Err(ValidationError::new(
                        path,
                        format!("Field '{}' value {} is less than minimum {}", field.name, n, min),
                    ));
                }
            }
            if let Some(max) = options.max_value {
                if n > max {
                    return Err(ValidationError::new(
                        path,
                        format!("Field '{}' value {} is greater than maximum {}", field.name, n, max),
                    ));
                }
            }
        }

        let length = match value {
            Value::String(s) => Some(("string", s.len())),
            Value::Bytes(b) => Some(("binary", b.len())),
            Value::Array(items) => Some(("array", items.len())),
            _ => None,
        };
        if let Some((kind, len)) = length {
            if let Some(min_length) = options.min_length {
                if len < min_length {
                    return Err(ValidationError::new(
                        path,
                        format!(
                            "Field '{}' {} length {} is less than minimum {}",
                            field.name, kind, len, min_length
                        ),
                    ));
                }
            }
            if let Some(max_length) = options.max_length {
                if len > max_length {
                    return Err(ValidationError::new(
                        path,
                        format!(
                            "Field '{}' {} length {} is greater than maximum {}",
                            field.name, kind, len, max_length
                        ),
                    ));
                }
            }
        }

        if let (Some(pattern), Value::String(s)) = (&options.pattern, value) {
            let regex = Regex::new(pattern).map_err(|e| {
                ValidationError::new(path, format!("Field '{}' has an invalid pattern: {}", field.name, e))
            })?;
            if !regex.is_match(s) {
                return Err(ValidationError::new(
                    path,
                    format!("Field '{}' value '{}' does not match pattern '{}'", field.name, s, pattern),
                ));
            }
        }

        Ok(())
    }
}
