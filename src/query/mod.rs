pub mod pipeline;

use crate::core::types::Document;
use crate::index::RangeBounds;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A single field filter: either exact-equality membership over a facet
/// field, or a numeric range over a sortable field (spec §4.6 Stage 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Term(String),
    Range(RangeBounds),
}

/// `{q, tolerance, limit, facets, filters}` — the full query surface spec §4.6 defines.
///
/// Derives `Serialize`/`Deserialize` because spec §6 has the external HTTP
/// collaborator pass this shape as a JSON request body to
/// `POST /collections/:name/search`; this crate does not implement that
/// transport, but the type is the wire contract the collaborator depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub q: String,
    #[serde(default)]
    pub tolerance: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub facets: Vec<String>,
    #[serde(default)]
    pub filters: HashMap<String, Filter>,
}

fn default_limit() -> usize {
    10
}

impl Query {
    pub fn new(q: impl Into<String>) -> Self {
        Query {
            q: q.into(),
            tolerance: 0,
            limit: 10,
            facets: Vec::new(),
            filters: HashMap::new(),
        }
    }

    pub fn tolerance(mut self, tolerance: usize) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn facet(mut self, field: impl Into<String>) -> Self {
        self.facets.push(field.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, filter: Filter) -> Self {
        self.filters.insert(field.into(), filter);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub score: f64,
    pub document: Document,
}

/// Facet counts for one requested field: value → distinct-occurrence count
/// over the final scored result set (spec §4.6 Stage 3).
pub type FacetCounts = HashMap<String, HashMap<String, usize>>;

/// `{hits, count, facets, elapsed}` — the JSON shape spec §6 has the HTTP
/// collaborator return from `POST /collections/:name/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<Hit>,
    pub count: usize,
    pub facets: FacetCounts,
    pub elapsed: Duration,
}
