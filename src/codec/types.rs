use std::fmt;

use bytes::Bytes;

/// A single key/value entry of an object value.
#[derive(Debug, PartialEq, Clone)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    /// Creates a new object entry.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Field {
            key: key.into(),
            value,
        }
    }
}

/// A verbose or compact data value.
///
/// Both representations share this type. A verbose value uses `Object` for
/// keyed records; in its compact form every record level governed by a schema
/// becomes a plain `Array`.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Bytes),
    Array(Vec<Value>),
    /// Entries in insertion order. The order is significant: compaction emits
    /// positions in exactly this order.
    Object(Vec<Field>),
}

impl Value {
    /// Returns the corresponding ValueType for the Value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Builds an object from `(key, value)` pairs, keeping their order.
    ///
    /// A repeated key overwrites the earlier value but keeps the earlier
    /// position.
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut value = Value::Object(Vec::new());
        for (key, item) in entries {
            value.insert(key, item);
        }
        value
    }

    /// Inserts an entry into an object value.
    ///
    /// Returns the previous value for the key. Has no effect on non-object
    /// values.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let Value::Object(fields) = self else {
            return None;
        };
        let key = key.into();
        match fields.iter_mut().find(|field| field.key == key) {
            Some(field) => Some(std::mem::replace(&mut field.value, value)),
            None => {
                fields.push(Field { key, value });
                None
            }
        }
    }

    /// Looks up an object entry by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields
                .iter()
                .find(|field| field.key == key)
                .map(|field| &field.value),
            _ => None,
        }
    }

    /// Returns the elements of an array value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of an object value.
    pub fn as_object(&self) -> Option<&[Field]> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

/// Type tag of a Value, used in diagnostics.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueType {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Bytes,
    Array,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Bytes => "bytes",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}
