use crate::codec::types::{Field, Value};
use crate::schema::types::{SchemaKind, SchemaType};

/// Compacts a value that has already been validated against `schema_type`.
///
/// Validated output conforms at every depth, so subtrees are not validated
/// again on the way down. Every tuple, array and object level governed by the
/// schema becomes a plain array; object entries keep the value's own order.
/// Keys not declared by the schema survive as `[key, value]` pairs.
pub(crate) fn compact_validated(schema_type: &SchemaType, value: Value) -> Value {
    match (schema_type.kind(), value) {
        (kind @ SchemaKind::Tuple { .. }, Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match kind.child_at(i) {
                    Some(child) => compact_validated(child, item),
                    // No fixed item and no rest schema
                    None => item,
                })
                .collect(),
        ),
        (SchemaKind::Array(element), Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .map(|item| compact_validated(element, item))
                .collect(),
        ),
        (kind @ SchemaKind::Object { catchall, .. }, Value::Object(entries)) => Value::Array(
            entries
                .into_iter()
                .map(|Field { key, value }| match kind.field(&key) {
                    Some(field) => compact_validated(&field.field_type, value),
                    None => {
                        let value = match catchall {
                            Some(catchall) => compact_validated(catchall, value),
                            None => value,
                        };
                        Value::Array(vec![Value::String(key), value])
                    }
                })
                .collect(),
        ),
        // Leaf schema, or a composite schema holding a non-matching value
        (_, value) => value,
    }
}
