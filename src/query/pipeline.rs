use crate::analysis::Tokenizer;
use crate::core::types::{DocId, Value};
use crate::index::{DocumentStore, FacetIndex, InvertedIndex, NumericIndex, Trie};
use crate::query::{Filter, FacetCounts, Hit, Query, SearchResult};
use crate::schema::Schema;
use crate::scoring::Bm25;
use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

/// The Stage 1 allowed-set sentinel: either every document (no filters were
/// given) or the intersection computed from the filters that were given.
enum AllowedSet {
    All,
    Some(BTreeSet<DocId>),
}

impl AllowedSet {
    fn contains(&self, doc: DocId) -> bool {
        match self {
            AllowedSet::All => true,
            AllowedSet::Some(set) => set.contains(&doc),
        }
    }
}

pub struct QueryContext<'a> {
    pub schema: &'a Schema,
    pub tokenizer: &'a dyn Tokenizer,
    pub inverted: &'a InvertedIndex,
    pub trie: &'a Trie,
    pub facets: &'a FacetIndex,
    pub numeric: &'a NumericIndex,
    pub store: &'a DocumentStore,
    pub bm25: Bm25,
    pub phrase_bonus: f64,
}

/// Runs the three-stage pipeline of spec §4.6: filter, score, facet-count.
pub fn execute(query: &Query, ctx: &QueryContext) -> SearchResult {
    let started = Instant::now();

    let filters_applied = !query.filters.is_empty();
    let Some(allowed) = stage1_filter(query, ctx) else {
        return empty_result(started);
    };

    let scores = stage2_score(query, ctx, &allowed, filters_applied);
    if scores.is_empty() {
        return empty_result(started);
    }

    let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
    ranked.sort_by(|(doc_a, score_a), (doc_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| doc_a.cmp(doc_b))
    });

    let facets = stage3_facets(query, ctx, &ranked);

    let hits = ranked
        .iter()
        .take(query.limit)
        .filter_map(|(doc_id, score)| {
            ctx.store.get(*doc_id).map(|document| Hit {
                id: document.id.clone(),
                score: *score,
                document: document.clone(),
            })
        })
        .collect();

    SearchResult {
        hits,
        count: ranked.len(),
        facets,
        elapsed: started.elapsed(),
    }
}

fn empty_result(started: Instant) -> SearchResult {
    SearchResult {
        hits: Vec::new(),
        count: 0,
        facets: FacetCounts::new(),
        elapsed: started.elapsed(),
    }
}

/// Returns `None` when the intersection becomes empty at any point (spec:
/// "return an empty result immediately"), `Some(AllowedSet::All)` when
/// `filters` was empty, otherwise the intersected allowed set.
fn stage1_filter(query: &Query, ctx: &QueryContext) -> Option<AllowedSet> {
    if query.filters.is_empty() {
        return Some(AllowedSet::All);
    }

    let mut allowed: Option<BTreeSet<DocId>> = None;
    for (field, filter) in &query.filters {
        if ctx.schema.field(field).is_none() {
            continue; // unknown schema fields are ignored
        }
        let docs: BTreeSet<DocId> = match filter {
            Filter::Range(bounds) => {
                if bounds.is_empty() || !ctx.schema.is_sortable_number(field) {
                    continue; // InvalidFilter: no recognized bound keys, silently ignored
                }
                ctx.numeric.range(field, bounds)
            }
            Filter::Term(value) => ctx
                .facets
                .docs_for(field, value)
                .cloned()
                .unwrap_or_default(),
        };

        allowed = Some(match allowed {
            None => docs,
            Some(existing) => existing.intersection(&docs).copied().collect(),
        });

        if let Some(set) = &allowed {
            if set.is_empty() {
                return None;
            }
        }
    }

    Some(match allowed {
        None => AllowedSet::All,
        Some(set) => AllowedSet::Some(set),
    })
}

fn stage2_score(
    query: &Query,
    ctx: &QueryContext,
    allowed: &AllowedSet,
    filters_applied: bool,
) -> HashMap<DocId, f64> {
    let trimmed = query.q.trim();

    if trimmed.len() > 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return score_phrase(query, ctx, allowed);
    }

    if !trimmed.is_empty() {
        return score_terms(query, ctx, allowed);
    }

    let mut scores = HashMap::new();
    if filters_applied {
        for (doc_id, _) in ctx.store.iter() {
            if allowed.contains(*doc_id) {
                scores.insert(*doc_id, 1.0);
            }
        }
    }
    scores
}

fn score_phrase(query: &Query, ctx: &QueryContext, allowed: &AllowedSet) -> HashMap<DocId, f64> {
    let inner = &query.q.trim()[1..query.q.trim().len() - 1];
    let phrase_tokens = ctx.tokenizer.tokenize(inner);
    if phrase_tokens.is_empty() {
        return HashMap::new();
    }

    let mut candidates: Option<BTreeSet<DocId>> = None;
    for token in &phrase_tokens {
        let docs: BTreeSet<DocId> = ctx
            .inverted
            .postings(token)
            .map(|postings| postings.keys().copied().collect())
            .unwrap_or_default();
        candidates = Some(match candidates {
            None => docs,
            Some(existing) => existing.intersection(&docs).copied().collect(),
        });
    }
    let Some(candidates) = candidates else { return HashMap::new() };

    let total_docs = ctx.store.doc_count();
    let avg_len = ctx.store.average_length();
    let mut scores = HashMap::new();

    for doc_id in candidates {
        if !allowed.contains(doc_id) {
            continue;
        }
        if !phrase_matches(ctx, &phrase_tokens, doc_id) {
            continue;
        }
        let Some(doc_len) = ctx.store.length(doc_id) else { continue };
        let mut sum = 0.0;
        for token in &phrase_tokens {
            let Some(postings) = ctx.inverted.postings(token) else { continue };
            let Some(positions) = postings.get(&doc_id) else { continue };
            let df = ctx.inverted.document_frequency(token);
            let idf = ctx.bm25.idf(total_docs, df);
            sum += ctx.bm25.score_term(idf, positions.len(), doc_len, avg_len);
        }
        scores.insert(doc_id, sum * ctx.phrase_bonus);
    }

    scores
}

/// For every start position `p` in the first token's list, checks whether
/// each subsequent token `i` has position `p + i` in its own list. First
/// success wins — this is the spec's strictly-consecutive, in-order check.
fn phrase_matches(ctx: &QueryContext, tokens: &[String], doc_id: DocId) -> bool {
    let mut position_lists: Vec<&[u32]> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let Some(postings) = ctx.inverted.postings(token) else { return false };
        let Some(positions) = postings.get(&doc_id) else { return false };
        position_lists.push(positions);
    }

    for &start in position_lists[0] {
        let mut all_consecutive = true;
        for (i, positions) in position_lists.iter().enumerate().skip(1) {
            let target = start + i as u32;
            if positions.binary_search(&target).is_err() {
                all_consecutive = false;
                break;
            }
        }
        if all_consecutive {
            return true;
        }
    }
    false
}

fn score_terms(query: &Query, ctx: &QueryContext, allowed: &AllowedSet) -> HashMap<DocId, f64> {
    let query_tokens = ctx.tokenizer.tokenize(&query.q);
    let total_docs = ctx.store.doc_count();
    let avg_len = ctx.store.average_length();
    let mut scores: HashMap<DocId, f64> = HashMap::new();

    for query_token in &query_tokens {
        let matches = find_matching_tokens(ctx, query_token, query.tolerance);
        let query_len = query_token.chars().count().max(1) as f64;

        for (index_token, distance) in matches {
            let Some(postings) = ctx.inverted.postings(&index_token) else { continue };
            let df = ctx.inverted.document_frequency(&index_token);
            let idf = ctx.bm25.idf(total_docs, df);
            let fuzzy_penalty = 1.0 - (distance as f64 / query_len);

            for (&doc_id, positions) in postings {
                if !allowed.contains(doc_id) {
                    continue;
                }
                let Some(doc_len) = ctx.store.length(doc_id) else { continue };
                let contribution =
                    ctx.bm25.score_term(idf, positions.len(), doc_len, avg_len) * fuzzy_penalty;
                *scores.entry(doc_id).or_insert(0.0) += contribution;
            }
        }
    }

    scores
}

/// Exact match preempts fuzzy expansion regardless of `tolerance` (property 6).
fn find_matching_tokens(ctx: &QueryContext, query_token: &str, tolerance: usize) -> Vec<(String, usize)> {
    if ctx.inverted.contains_token(query_token) {
        return vec![(query_token.to_string(), 0)];
    }
    if tolerance > 0 {
        return ctx.trie.search_fuzzy(query_token, tolerance);
    }
    Vec::new()
}

fn stage3_facets(query: &Query, ctx: &QueryContext, ranked: &[(DocId, f64)]) -> FacetCounts {
    let mut facets = FacetCounts::new();
    for field in &query.facets {
        if !ctx.facets.has_field(field) {
            continue;
        }
        let mut counts: HashMap<String, usize> = HashMap::new();
        for (doc_id, _) in ranked {
            let Some(document) = ctx.store.get(*doc_id) else { continue };
            let Some(value) = document.get_field(field) else { continue };
            for repr in facet_value_reprs(value) {
                *counts.entry(repr).or_insert(0) += 1;
            }
        }
        facets.insert(field.clone(), counts);
    }
    facets
}

fn facet_value_reprs(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::StringList(items) => items.clone(),
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
    }
}
