use crate::core::types::DocId;
use std::collections::{BTreeMap, BTreeSet};

/// field → value → docId set (component C4).
///
/// Value equality is exact string equality on the raw, pre-tokenization
/// value — a facet field is never tokenized, only indexed verbatim.
#[derive(Debug, Default)]
pub struct FacetIndex {
    fields: BTreeMap<String, BTreeMap<String, BTreeSet<DocId>>>,
}

impl FacetIndex {
    pub fn new() -> Self {
        FacetIndex::default()
    }

    pub fn add(&mut self, field: &str, value: &str, doc: DocId) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .entry(value.to_string())
            .or_default()
            .insert(doc);
    }

    /// Removes `doc` from `(field, value)`. Garbage-collects the value entry
    /// once its last docId is removed.
    pub fn remove(&mut self, field: &str, value: &str, doc: DocId) {
        let Some(values) = self.fields.get_mut(field) else { return };
        if let Some(docs) = values.get_mut(value) {
            docs.remove(&doc);
            if docs.is_empty() {
                values.remove(value);
            }
        }
        if values.is_empty() {
            self.fields.remove(field);
        }
    }

    pub fn docs_for(&self, field: &str, value: &str) -> Option<&BTreeSet<DocId>> {
        self.fields.get(field)?.get(value)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn values_for(&self, field: &str) -> impl Iterator<Item = (&String, &BTreeSet<DocId>)> {
        self.fields.get(field).into_iter().flat_map(|values| values.iter())
    }

    /// All `(field, value, docIds)` triples, used by the snapshot codec.
    pub fn iter_entries(&self) -> impl Iterator<Item = (&str, &str, &BTreeSet<DocId>)> {
        self.fields.iter().flat_map(|(field, values)| {
            values
                .iter()
                .map(move |(value, docs)| (field.as_str(), value.as_str(), docs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_gc_empty_entries() {
        let mut facets = FacetIndex::new();
        facets.add("brand", "Acme", DocId(1));
        facets.add("brand", "Acme", DocId(2));
        assert_eq!(facets.docs_for("brand", "Acme").unwrap().len(), 2);

        facets.remove("brand", "Acme", DocId(1));
        assert_eq!(facets.docs_for("brand", "Acme").unwrap().len(), 1);

        facets.remove("brand", "Acme", DocId(2));
        assert!(facets.docs_for("brand", "Acme").is_none());
        assert!(!facets.has_field("brand"));
    }
}
