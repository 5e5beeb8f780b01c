// Schema module
//
// This module provides the schema tree that drives compaction and inflation,
// and the validator that checks and normalizes values against it:
//
// 1. Schema type system and composite kind classification
// 2. Default value strategies for missing fields
// 3. Validation with scalar coercion and configurable key order

// Re-export public types and functions
pub use self::types::{Schema, SchemaField, SchemaKind, SchemaOptions, SchemaType};
pub use self::defaults::DefaultValueStrategy;
pub use self::validator::{KeyOrder, SchemaValidator, UnknownFields, ValidatorConfig};

// Sub-modules
pub mod types;
pub mod defaults;
pub mod validator;

// Internal module for shared utilities
pub(crate) mod utils;
