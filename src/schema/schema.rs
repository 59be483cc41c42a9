use crate::core::error::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A field's declared type. `facetable` is legal on any type; `sortable` is
/// legal only on `Number` (enforced by [`Schema::add_field`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    pub field_type: FieldType,
    pub facetable: bool,
    pub sortable: bool,
}

impl SchemaField {
    pub fn new(field_type: FieldType) -> Self {
        SchemaField {
            field_type,
            facetable: false,
            sortable: false,
        }
    }

    pub fn facetable(mut self) -> Self {
        self.facetable = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Fixed at construction; never mutated for the lifetime of an [`crate::engine::Engine`].
///
/// Fields are kept in declaration order (a `Vec` backing store plus a name
/// index) because spec §3 defines a document's global token position counter
/// as advancing "across the concatenation of all string fields in schema
/// declaration order" — a `HashMap` would not preserve that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    order: Vec<String>,
    fields: HashMap<String, SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    /// Declare a field. Returns `InvalidFilter`-adjacent validation failure as
    /// `Err` if `sortable` is requested on a non-`Number` type, since spec §3
    /// states sortable is only legal on numbers.
    pub fn add_field(&mut self, name: impl Into<String>, field: SchemaField) -> Result<()> {
        if field.sortable && field.field_type != FieldType::Number {
            return Err(Error::new(
                ErrorKind::InvalidFilter,
                "sortable is only legal on number fields",
            ));
        }
        let name = name.into();
        if !self.fields.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.fields.insert(name, field);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &SchemaField)> {
        self.order.iter().map(move |name| (name, &self.fields[name]))
    }

    pub fn is_string_field(&self, name: &str) -> bool {
        matches!(self.field(name), Some(f) if f.field_type == FieldType::String)
    }

    pub fn is_facetable(&self, name: &str) -> bool {
        matches!(self.field(name), Some(f) if f.facetable)
    }

    pub fn is_sortable_number(&self, name: &str) -> bool {
        matches!(self.field(name), Some(f) if f.sortable && f.field_type == FieldType::Number)
    }

    /// Schema field names that carry indexable text, in declaration order —
    /// the order C7 walks to assign global token positions.
    pub fn ordered_string_fields(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| self.is_string_field(name))
            .cloned()
            .collect()
    }
}
