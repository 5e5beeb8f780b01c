// Schema type system
//
// This module defines the schema tree that drives compaction and inflation,
// plus the classification helper both walkers share.

use regex::Regex;

use crate::codec::types::Value;
use crate::internal::error::{Error, Result, ValidationResult};
use crate::schema::utils::check_schema_type;
use crate::schema::validator::SchemaValidator;

/// Represents the data shapes supported in the schema
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    /// Accepts any value
    Any,
    /// Null type
    Null,
    /// Boolean type
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// Integer or floating point number
    Number,
    /// UTF-8 string
    String,
    /// Binary data
    Binary,
    /// Exactly this value
    Literal(Value),
    /// One of a fixed set of strings
    Enum(Vec<String>),
    /// Null or the inner type
    Nullable(Box<SchemaType>),
    /// First matching member wins
    Union(Vec<SchemaType>),
    /// Fixed positions, each with its own type, plus an optional type for
    /// any elements past the fixed ones
    Tuple {
        items: Vec<SchemaType>,
        rest: Option<Box<SchemaType>>,
    },
    /// Array of items with the same type
    Array(Box<SchemaType>),
    /// Object with named fields, plus an optional type for values under
    /// any other key
    Object {
        fields: Vec<SchemaField>,
        catchall: Option<Box<SchemaType>>,
    },
}

/// Composite classification of a schema, as seen by the compactor and the
/// inflator.
///
/// Only the outer variant counts: `Nullable` and `Union` are leaves even when
/// they wrap a composite.
#[derive(Debug, Clone, Copy)]
pub enum SchemaKind<'a> {
    Tuple {
        items: &'a [SchemaType],
        rest: Option<&'a SchemaType>,
    },
    Array(&'a SchemaType),
    Object {
        fields: &'a [SchemaField],
        catchall: Option<&'a SchemaType>,
    },
    Leaf,
}

impl<'a> SchemaKind<'a> {
    /// Schema for the tuple element at `index`: the fixed item if there is
    /// one, else the rest schema.
    pub fn child_at(&self, index: usize) -> Option<&'a SchemaType> {
        match *self {
            SchemaKind::Tuple { items, rest } => items.get(index).or(rest),
            SchemaKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Declared field for `name` in an object schema.
    pub fn field(&self, name: &str) -> Option<&'a SchemaField> {
        match *self {
            SchemaKind::Object { fields, .. } => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }
}

impl SchemaType {
    /// Classifies the schema for the walkers.
    pub fn kind(&self) -> SchemaKind<'_> {
        match self {
            SchemaType::Tuple { items, rest } => SchemaKind::Tuple {
                items,
                rest: rest.as_deref(),
            },
            SchemaType::Array(element) => SchemaKind::Array(element),
            SchemaType::Object { fields, catchall } => SchemaKind::Object {
                fields,
                catchall: catchall.as_deref(),
            },
            _ => SchemaKind::Leaf,
        }
    }

    /// Returns true if this type is a tuple, array or object
    pub fn is_composite(&self) -> bool {
        !matches!(self.kind(), SchemaKind::Leaf)
    }

    /// Fixed-size tuple without a rest schema.
    pub fn tuple(items: Vec<SchemaType>) -> Self {
        SchemaType::Tuple { items, rest: None }
    }

    /// Tuple whose elements past `items` all match `rest`.
    pub fn tuple_with_rest(items: Vec<SchemaType>, rest: SchemaType) -> Self {
        SchemaType::Tuple {
            items,
            rest: Some(Box::new(rest)),
        }
    }

    pub fn array(element: SchemaType) -> Self {
        SchemaType::Array(Box::new(element))
    }

    /// Object that only accepts its declared fields.
    pub fn object(fields: Vec<SchemaField>) -> Self {
        SchemaType::Object {
            fields,
            catchall: None,
        }
    }

    /// Object whose undeclared keys hold values of type `catchall`.
    pub fn object_with_catchall(fields: Vec<SchemaField>, catchall: SchemaType) -> Self {
        SchemaType::Object {
            fields,
            catchall: Some(Box::new(catchall)),
        }
    }

    /// String-keyed map: an object with no declared fields.
    pub fn map(values: SchemaType) -> Self {
        Self::object_with_catchall(Vec::new(), values)
    }

    pub fn nullable(inner: SchemaType) -> Self {
        SchemaType::Nullable(Box::new(inner))
    }

    /// Short name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaType::Any => "any",
            SchemaType::Null => "null",
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::String => "string",
            SchemaType::Binary => "binary",
            SchemaType::Literal(_) => "literal",
            SchemaType::Enum(_) => "enum",
            SchemaType::Nullable(_) => "nullable",
            SchemaType::Union(_) => "union",
            SchemaType::Tuple { .. } => "tuple",
            SchemaType::Array(_) => "array",
            SchemaType::Object { .. } => "object",
        }
    }
}

/// Represents a field in an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Field type
    pub field_type: SchemaType,
    /// Whether the field must be present
    pub required: bool,
    /// Value filled in when the field is missing
    pub default_value: Option<Value>,
    /// Field description
    pub description: Option<String>,
    /// Additional field constraints
    pub options: SchemaOptions,
}

impl SchemaField {
    /// Creates a required field with no constraints.
    pub fn new(name: impl Into<String>, field_type: SchemaType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default_value: None,
            description: None,
            options: SchemaOptions::default(),
        }
    }

    /// Creates a field that may be absent.
    pub fn optional(name: impl Into<String>, field_type: SchemaType) -> Self {
        Self {
            required: false,
            ..Self::new(name, field_type)
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Restricts string values to those matching `pattern`.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        Regex::new(pattern).map_err(|e| {
            Error::SchemaError(format!(
                "Invalid pattern for field '{}': {}",
                self.name, e
            ))
        })?;
        self.options.pattern = Some(pattern.to_string());
        Ok(self)
    }
}

/// Additional constraints for schema fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaOptions {
    /// Minimum value (for numeric types)
    pub min_value: Option<f64>,
    /// Maximum value (for numeric types)
    pub max_value: Option<f64>,
    /// Pattern (for string types)
    pub pattern: Option<String>,
    /// Minimum length (for string, binary, array and tuple types)
    pub min_length: Option<usize>,
    /// Maximum length (for string, binary, array and tuple types)
    pub max_length: Option<usize>,
}

/// A named root schema.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Schema name
    pub name: String,
    /// Root schema type
    pub root_type: SchemaType,
    /// Schema description
    pub description: Option<String>,
}

impl Schema {
    /// Creates a new schema, checking the type tree for duplicate field names
    /// and unusable patterns.
    pub fn new(name: impl Into<String>, root_type: SchemaType) -> Result<Self> {
        check_schema_type(&root_type)?;
        Ok(Self {
            name: name.into(),
            root_type,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates a value against this schema with the default validator.
    pub fn validate(&self, value: &Value) -> ValidationResult<Value> {
        SchemaValidator::new().validate(&self.root_type, value)
    }

    /// Compacts a verbose value; see [`crate::codec::compact`].
    pub fn compact(&self, value: &Value) -> ValidationResult<Value> {
        crate::codec::compact(&self.root_type, value)
    }

    /// Inflates a compact value; see [`crate::codec::inflate`].
    pub fn inflate(&self, value: &Value) -> ValidationResult<Value> {
        crate::codec::inflate(&self.root_type, value)
    }
}
