use crate::codec::types::Value;
use crate::schema::types::{SchemaField, SchemaType, SchemaKind};

/// Rebuilds a verbose value from its compact form without validating it.
///
/// Shape problems are not reported here. Whatever cannot be rebuilt is left
/// as it was, and the validation that follows reports it.
pub(crate) fn inflate_unchecked(schema_type: &SchemaType, value: &Value) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };

    match schema_type.kind() {
        kind @ SchemaKind::Tuple { .. } => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| match kind.child_at(i) {
                    Some(child) => inflate_unchecked(child, item),
                    None => item.clone(),
                })
                .collect(),
        ),
        SchemaKind::Array(element) => Value::Array(
            items
                .iter()
                .map(|item| inflate_unchecked(element, item))
                .collect(),
        ),
        SchemaKind::Object { fields, catchall } => {
            inflate_object(fields, catchall, items).unwrap_or_else(|| value.clone())
        }
        SchemaKind::Leaf => value.clone(),
    }
}

/// Positions below `fields.len()` belong to the declared fields, in
/// declaration order. Later positions must be `[key, value]` pairs; returns
/// `None` if one is not.
fn inflate_object(
    fields: &[SchemaField],
    catchall: Option<&SchemaType>,
    items: &[Value],
) -> Option<Value> {
    let mut object = Value::Object(Vec::with_capacity(items.len()));
    for (i, item) in items.iter().enumerate() {
        match fields.get(i) {
            Some(field) => {
                object.insert(field.name.clone(), inflate_unchecked(&field.field_type, item));
            }
            None => {
                let [Value::String(key), entry] = item.as_array()? else {
                    return None;
                };
                let entry = match catchall {
                    Some(catchall) => inflate_unchecked(catchall, entry),
                    None => entry.clone(),
                };
                object.insert(key.clone(), entry);
            }
        }
    }
    Some(object)
}
