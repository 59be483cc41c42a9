pub mod schema;

pub use schema::{FieldType, Schema, SchemaField};
