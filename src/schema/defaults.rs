// Default value strategies
//
// Decides which value the validator fills in for a declared field that is
// missing from an object. Filled values go through validation like any other
// value, so they show up in compacted output.

use crate::codec::types::{Field, Value};
use crate::schema::types::{SchemaField, SchemaType};

/// Represents different strategies for filling in missing fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DefaultValueStrategy {
    /// Missing fields are never filled
    None,

    /// Fill fields that declare a `default_value`
    #[default]
    Declared,

    /// Like `Declared`, and required fields without a declared default get
    /// the zero value of their type
    Zeroed,

    /// Only the named fields get their declared default
    Custom(Vec<String>),
}

impl DefaultValueStrategy {
    /// Value to use for `field` when it is missing, if any.
    pub fn default_for(&self, field: &SchemaField) -> Option<Value> {
        match self {
            DefaultValueStrategy::None => None,
            DefaultValueStrategy::Declared => field.default_value.clone(),
            DefaultValueStrategy::Zeroed => match &field.default_value {
                Some(default) => Some(default.clone()),
                None if field.required => zero_value(&field.field_type),
                None => None,
            },
            DefaultValueStrategy::Custom(field_names) => {
                if field_names.iter().any(|name| *name == field.name) {
                    field.default_value.clone()
                } else {
                    None
                }
            }
        }
    }
}

/// The empty value of a schema type.
///
/// Returns `None` for types that have no value to offer (an empty enum or
/// union, or a tuple containing one).
pub fn zero_value(schema_type: &SchemaType) -> Option<Value> {
    match schema_type {
        SchemaType::Any | SchemaType::Null | SchemaType::Nullable(_) => Some(Value::Null),
        SchemaType::Boolean => Some(Value::Bool(false)),
        SchemaType::Integer => Some(Value::Integer(0)),
        SchemaType::Number => Some(Value::Float(0.0)),
        SchemaType::String => Some(Value::String(String::new())),
        SchemaType::Binary => Some(Value::Bytes(bytes::Bytes::new())),
        SchemaType::Literal(value) => Some(value.clone()),
        SchemaType::Enum(names) => names.first().map(|name| Value::String(name.clone())),
        // Use the first type in the union as the default
        SchemaType::Union(types) => types.first().and_then(zero_value),
        SchemaType::Tuple { items, .. } => items
            .iter()
            .map(zero_value)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        SchemaType::Array(_) => Some(Value::Array(Vec::new())),
        SchemaType::Object { fields, .. } => {
            let mut entries = Vec::new();
            for field in fields.iter().filter(|f| f.required) {
                let value = match &field.default_value {
                    Some(default) => default.clone(),
                    None => zero_value(&field.field_type)?,
                };
                entries.push(Field::new(field.name.clone(), value));
            }
            Some(Value::Object(entries))
        }
    }
}
