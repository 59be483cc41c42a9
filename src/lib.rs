pub mod analysis;
pub mod core;
pub mod engine;
pub mod index;
pub mod query;
pub mod registry;
pub mod schema;
pub mod scoring;
pub mod snapshot;

pub use core::config::Config;
pub use core::error::{Error, ErrorKind, Result};
pub use core::types::{DocId, Document, Value};
pub use engine::Engine;
pub use index::RangeBounds;
pub use query::{Filter, Hit, Query, SearchResult};
pub use registry::CollectionRegistry;
pub use schema::{FieldType, Schema, SchemaField};
