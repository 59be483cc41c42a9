use crate::core::types::DocId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A range filter over a sortable numeric field. At least one bound should be
/// present; an entirely-empty bounds value is what spec §4.6 calls
/// `InvalidFilter` at the query-pipeline layer, not here.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RangeBounds {
    pub gte: Option<f64>,
    pub lte: Option<f64>,
    pub gt: Option<f64>,
    pub lt: Option<f64>,
}

impl RangeBounds {
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none() && self.gt.is_none() && self.lt.is_none()
    }

    fn satisfies(&self, value: f64) -> bool {
        self.gte.is_none_or(|b| value >= b)
            && self.gt.is_none_or(|b| value > b)
            && self.lte.is_none_or(|b| value <= b)
            && self.lt.is_none_or(|b| value < b)
    }

    /// True once `value` is past every upper bound, meaning an ascending scan
    /// can stop — used to short-circuit [`NumericIndex::range`].
    fn past_upper_bound(&self, value: f64) -> bool {
        self.lte.is_some_and(|b| value > b) || self.lt.is_some_and(|b| value >= b)
    }
}

/// field → sorted `(value, docId)` list, ascending by value, ties broken by
/// insertion order (component C5).
#[derive(Debug, Default)]
pub struct NumericIndex {
    fields: BTreeMap<String, Vec<(f64, DocId)>>,
}

impl NumericIndex {
    pub fn new() -> Self {
        NumericIndex::default()
    }

    /// Sorted insertion via binary search; placing the new pair after any
    /// existing equal value preserves insertion-order tie-breaking.
    pub fn insert(&mut self, field: &str, value: f64, doc: DocId) {
        let list = self.fields.entry(field.to_string()).or_default();
        let pos = list.partition_point(|&(v, _)| v <= value);
        list.insert(pos, (value, doc));
    }

    /// Removal by docId identity — the value is not known at removal time.
    pub fn remove(&mut self, field: &str, doc: DocId) {
        let Some(list) = self.fields.get_mut(field) else { return };
        list.retain(|&(_, d)| d != doc);
        if list.is_empty() {
            self.fields.remove(field);
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// DocIds whose value satisfies every provided bound. Scans the sorted
    /// list and stops early once the cursor is past every upper bound.
    pub fn range(&self, field: &str, bounds: &RangeBounds) -> BTreeSet<DocId> {
        let mut result = BTreeSet::new();
        let Some(list) = self.fields.get(field) else { return result };
        for &(value, doc) in list {
            if bounds.past_upper_bound(value) {
                break;
            }
            if bounds.satisfies(value) {
                result.insert(doc);
            }
        }
        result
    }

    /// All `(field, value, docId)` triples in stored order, for the snapshot codec.
    pub fn iter_entries(&self) -> impl Iterator<Item = (&str, f64, DocId)> {
        self.fields.iter().flat_map(|(field, list)| {
            list.iter().map(move |&(value, doc)| (field.as_str(), value, doc))
        })
    }
}
