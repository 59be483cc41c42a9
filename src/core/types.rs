use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense surrogate key assigned to a document on `add` and never reused.
///
/// The public API identifies documents by their string `id`; internally the
/// positional index, facet sets and numeric lists key on this newtype so
/// postings stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);

impl DocId {
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// A document field value. `StringList` lets a single field hold several
/// strings (e.g. tags) that are each tokenized and faceted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    StringList(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            Value::StringList(items) => Some(items),
            _ => None,
        }
    }
}

/// A stored document: the caller's `id` plus an open field map.
///
/// Fields absent from the schema are still stored verbatim and returned on
/// `get`/`search`, but they are never indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: HashMap<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overlay `partial`'s fields onto a clone of `self`, used by `update`.
    pub fn merged_with(&self, partial: &Document) -> Document {
        let mut merged = self.clone();
        for (name, value) in &partial.fields {
            merged.fields.insert(name.clone(), value.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overlays_only_present_fields() {
        let base = Document::new("1")
            .with_field("title", Value::String("Laptop".into()))
            .with_field("price", Value::Number(10.0));
        let partial = Document::new("1").with_field("price", Value::Number(20.0));

        let merged = base.merged_with(&partial);
        assert_eq!(merged.get_field("title"), Some(&Value::String("Laptop".into())));
        assert_eq!(merged.get_field("price"), Some(&Value::Number(20.0)));
    }
}
