// Utility functions for the schema module
//
// This module provides shared helpers used by the validator and the codec.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::internal::error::{Error, Result};
use crate::schema::types::SchemaType;

/// One step in a value path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Root,
    Key(&'a str),
    Index(usize),
    /// Any element of an array schema
    Element,
}

/// Location inside a value, built on the stack while recursing.
///
/// Each level borrows its parent, so descending costs no allocation; the
/// path is only rendered when an error is reported.
#[derive(Debug, Clone, Copy)]
pub struct ValuePath<'a> {
    parent: Option<&'a ValuePath<'a>>,
    segment: PathSegment<'a>,
}

impl<'a> ValuePath<'a> {
    /// The root of a value, rendered as `$`.
    pub const fn root() -> Self {
        ValuePath {
            parent: None,
            segment: PathSegment::Root,
        }
    }

    pub fn key<'b>(&'b self, key: &'b str) -> ValuePath<'b> {
        ValuePath {
            parent: Some(self),
            segment: PathSegment::Key(key),
        }
    }

    pub fn index(&self, index: usize) -> ValuePath<'_> {
        ValuePath {
            parent: Some(self),
            segment: PathSegment::Index(index),
        }
    }

    pub fn element(&self) -> ValuePath<'_> {
        ValuePath {
            parent: Some(self),
            segment: PathSegment::Element,
        }
    }
}

impl fmt::Display for ValuePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            fmt::Display::fmt(parent, f)?;
        }
        match self.segment {
            PathSegment::Root => f.write_str("$"),
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Element => f.write_str("[*]"),
        }
    }
}

/// Checks a schema tree for mistakes the validator cannot report per value:
/// duplicate field names and patterns that do not compile.
pub fn check_schema_type(schema_type: &SchemaType) -> Result<()> {
    check_at(schema_type, &ValuePath::root())
}

fn check_at(schema_type: &SchemaType, path: &ValuePath<'_>) -> Result<()> {
    match schema_type {
        SchemaType::Object { fields, catchall } => {
            let mut seen = HashSet::new();
            for field in fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(Error::SchemaError(format!(
                        "Duplicate field '{}' in object at {}",
                        field.name, path
                    )));
                }
                let child = path.key(&field.name);
                if let Some(pattern) = &field.options.pattern {
                    Regex::new(pattern).map_err(|e| {
                        Error::SchemaError(format!("Invalid pattern at {}: {}", child, e))
                    })?;
                }
                check_at(&field.field_type, &child)?;
            }
            if let Some(catchall) = catchall {
                check_at(catchall, &path.element())?;
            }
            Ok(())
        }
        SchemaType::Tuple { items, rest } => {
            for (i, item) in items.iter().enumerate() {
                check_at(item, &path.index(i))?;
            }
            if let Some(rest) = rest {
                check_at(rest, &path.element())?;
            }
            Ok(())
        }
        SchemaType::Array(element) => check_at(element, &path.element()),
        SchemaType::Nullable(inner) => check_at(inner, path),
        SchemaType::Union(members) => {
            for member in members {
                check_at(member, path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// True if `value` is a finite float with no fractional part that fits in an
/// i64.
pub fn is_integral(value: f64) -> bool {
    value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::SchemaField;

    #[test]
    fn test_value_path_display() {
        let root = ValuePath::root();
        assert_eq!(root.to_string(), "$");

        let items = root.key("items");
        let second = items.index(2);
        let name = second.key("name");
        assert_eq!(name.to_string(), "$.items[2].name");
        assert_eq!(items.element().to_string(), "$.items[*]");
    }

    #[test]
    fn test_check_schema_type_nested_duplicate() {
        let inner = SchemaType::object(vec![
            SchemaField::new("x", SchemaType::Integer),
            SchemaField::new("x", SchemaType::Integer),
        ]);
        let root = SchemaType::array(SchemaType::object(vec![SchemaField::new("inner", inner)]));
        let err = check_schema_type(&root).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema Error: Duplicate field 'x' in object at $[*].inner"
        );
    }

    #[test]
    fn test_check_schema_type_bad_pattern() {
        let mut field = SchemaField::new("code", SchemaType::String);
        field.options.pattern = Some("(".to_string());
        let err = check_schema_type(&SchemaType::object(vec![field])).unwrap_err();
        assert!(err.to_string().starts_with("Schema Error: Invalid pattern at $.code"));
    }

    #[test]
    fn test_is_integral() {
        assert!(is_integral(3.0));
        assert!(is_integral(-0.0));
        assert!(!is_integral(3.5));
        assert!(!is_integral(f64::NAN));
        assert!(!is_integral(f64::INFINITY));
        assert!(!is_integral(1e19));
    }
}
