// schema-compact library entry point
//
// Schema-driven conversion between verbose values (keyed objects) and their
// compact positional form (nested arrays), validated at both ends.

pub mod codec;
pub mod internal;
pub mod schema;

pub use codec::types::{Field, Value, ValueType};
pub use codec::{compact, inflate, SchemaCodec};
pub use internal::error::{Error, Result, ValidationError, ValidationResult};
pub use schema::{Schema, SchemaField, SchemaOptions, SchemaType};
