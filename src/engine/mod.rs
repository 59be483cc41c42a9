use crate::analysis::{StandardTokenizer, Tokenizer};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Document, Value};
use crate::index::{DocumentStore, FacetIndex, InvertedIndex, NumericIndex, Trie};
use crate::query::pipeline::{self, QueryContext};
use crate::query::{Query, SearchResult};
use crate::schema::Schema;
use crate::scoring::Bm25;
use std::collections::HashMap;

/// A single collection: one schema, one set of indexes, one document store
/// (component C7). Mutation is non-incremental — `update` is implemented as
/// `delete` followed by `add` over the merged document, and `add` either
/// fully indexes a document or leaves the collection untouched.
pub struct Engine {
    schema: Schema,
    tokenizer: Box<dyn Tokenizer>,
    bm25: Bm25,
    phrase_bonus: f64,
    next_doc_id: u32,
    ids: HashMap<String, DocId>,
    trie: Trie,
    inverted: InvertedIndex,
    facets: FacetIndex,
    numeric: NumericIndex,
    store: DocumentStore,
}

impl Engine {
    pub fn new(schema: Schema) -> Self {
        Engine {
            schema,
            tokenizer: Box::new(StandardTokenizer),
            bm25: Bm25::default(),
            phrase_bonus: 1.5,
            next_doc_id: 0,
            ids: HashMap::new(),
            trie: Trie::new(),
            inverted: InvertedIndex::new(),
            facets: FacetIndex::new(),
            numeric: NumericIndex::new(),
            store: DocumentStore::new(),
        }
    }

    /// Builds an `Engine` whose BM25 constants and phrase bonus come from
    /// `config` rather than the library defaults, so a `CollectionRegistry`
    /// instantiating many collections from one `Config` gets consistent
    /// ranking behavior across all of them.
    pub fn from_config(config: &Config, schema: Schema) -> Self {
        Engine::new(schema)
            .with_bm25(config.bm25_k1, config.bm25_b)
            .with_phrase_bonus(config.phrase_bonus)
    }

    pub fn with_bm25(mut self, k1: f64, b: f64) -> Self {
        self.bm25 = Bm25::new(k1, b);
        self
    }

    pub fn with_phrase_bonus(mut self, phrase_bonus: f64) -> Self {
        self.phrase_bonus = phrase_bonus;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Adds `document` under `id`, generating a random id when none is given.
    /// Fails with `DuplicateId` if the id is already present; otherwise the
    /// document is tokenized and routed into every index in one pass — no
    /// partial state is left behind on failure.
    pub fn add(&mut self, document: Document, id: Option<String>) -> Result<String> {
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if self.ids.contains_key(&id) {
            return Err(Error::duplicate_id(&id));
        }

        let mut document = document;
        document.id = id.clone();

        let doc_id = DocId::new(self.next_doc_id);
        self.next_doc_id += 1;
        self.ids.insert(id.clone(), doc_id);

        let length = self.index_document(doc_id, &document);
        self.store.insert(doc_id, document, length);

        Ok(id)
    }

    /// Overlays `partial`'s fields onto the stored document and re-indexes the
    /// result. Implemented as un-index + index rather than an incremental
    /// diff (spec §4.5: `update = delete + add`).
    pub fn update(&mut self, id: &str, partial: Document) -> Result<bool> {
        let Some(&doc_id) = self.ids.get(id) else {
            return Ok(false);
        };
        let Some(existing) = self.store.get(doc_id) else {
            return Ok(false);
        };
        let merged = existing.merged_with(&partial);

        self.unindex_document(doc_id);
        self.store.remove(doc_id);
        let length = self.index_document(doc_id, &merged);
        self.store.insert(doc_id, merged, length);

        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(doc_id) = self.ids.remove(id) else {
            return Ok(false);
        };
        self.unindex_document(doc_id);
        self.store.remove(doc_id);
        Ok(true)
    }

    pub fn get_document(&self, id: &str) -> Option<&Document> {
        let doc_id = *self.ids.get(id)?;
        self.store.get(doc_id)
    }

    pub fn document_count(&self) -> usize {
        self.store.doc_count()
    }

    /// Rebuilds an `Engine` from a decoded snapshot record. C2 (the trie) is
    /// never persisted; it is rebuilt here from the inverted index's tokens,
    /// and BM25 constants reset to their defaults (spec §9: a snapshot is a
    /// content-only artifact, not a full configuration dump).
    pub(crate) fn from_snapshot(
        schema: Schema,
        next_doc_id: u32,
        ids: HashMap<String, DocId>,
        documents: Vec<(DocId, Document, usize)>,
        inverted_entries: Vec<(String, DocId, Vec<u32>)>,
        facet_entries: Vec<(String, String, Vec<DocId>)>,
        numeric_entries: Vec<(String, f64, DocId)>,
    ) -> Self {
        let mut engine = Engine::new(schema);
        engine.next_doc_id = next_doc_id;
        engine.ids = ids;

        for (doc_id, document, length) in documents {
            engine.store.insert(doc_id, document, length);
        }

        for (token, doc_id, positions) in inverted_entries {
            for position in positions {
                engine
                    .inverted
                    .index_token_position(&mut engine.trie, &token, doc_id, position);
            }
        }

        for (field, value, doc_ids) in facet_entries {
            for doc_id in doc_ids {
                engine.facets.add(&field, &value, doc_id);
            }
        }

        for (field, value, doc_id) in numeric_entries {
            engine.numeric.insert(&field, value, doc_id);
        }

        engine
    }

    pub(crate) fn next_doc_id_for_snapshot(&self) -> u32 {
        self.next_doc_id
    }

    pub(crate) fn ids_for_snapshot(&self) -> HashMap<String, DocId> {
        self.ids.clone()
    }

    pub(crate) fn documents_for_snapshot(&self) -> Vec<(DocId, Document, usize)> {
        self.store
            .iter()
            .map(|(&doc_id, document)| (doc_id, document.clone(), self.store.length(doc_id).unwrap_or(0)))
            .collect()
    }

    pub(crate) fn inverted_entries_for_snapshot(&self) -> Vec<(String, DocId, Vec<u32>)> {
        self.inverted
            .iter_entries()
            .map(|(token, &doc_id, positions)| (token.to_string(), doc_id, positions.to_vec()))
            .collect()
    }

    pub(crate) fn facet_entries_for_snapshot(&self) -> Vec<(String, String, Vec<DocId>)> {
        self.facets
            .iter_entries()
            .map(|(field, value, docs)| (field.to_string(), value.to_string(), docs.iter().copied().collect()))
            .collect()
    }

    pub(crate) fn numeric_entries_for_snapshot(&self) -> Vec<(String, f64, DocId)> {
        self.numeric
            .iter_entries()
            .map(|(field, value, doc_id)| (field.to_string(), value, doc_id))
            .collect()
    }

    pub fn search(&self, query: &Query) -> SearchResult {
        let ctx = QueryContext {
            schema: &self.schema,
            tokenizer: self.tokenizer.as_ref(),
            inverted: &self.inverted,
            trie: &self.trie,
            facets: &self.facets,
            numeric: &self.numeric,
            store: &self.store,
            bm25: self.bm25,
            phrase_bonus: self.phrase_bonus,
        };
        pipeline::execute(query, &ctx)
    }

    /// Walks the schema's string fields in declaration order, assigning a
    /// single monotonic position counter across all of them (spec §3), so a
    /// quoted phrase can span two adjacent fields. Facetable and sortable
    /// fields are additionally routed into C4/C5 regardless of type.
    fn index_document(&mut self, doc_id: DocId, document: &Document) -> usize {
        let mut position: u32 = 0;

        for field_name in self.schema.ordered_string_fields() {
            let Some(value) = document.get_field(&field_name) else { continue };
            match value {
                Value::String(text) => {
                    for token in self.tokenizer.tokenize(text) {
                        self.inverted
                            .index_token_position(&mut self.trie, &token, doc_id, position);
                        position += 1;
                    }
                }
                Value::StringList(items) => {
                    for item in items {
                        for token in self.tokenizer.tokenize(item) {
                            self.inverted
                                .index_token_position(&mut self.trie, &token, doc_id, position);
                            position += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        for (field_name, schema_field) in self.schema.fields() {
            let Some(value) = document.get_field(field_name) else { continue };
            if schema_field.facetable {
                match value {
                    Value::String(s) => self.facets.add(field_name, s, doc_id),
                    Value::StringList(items) => {
                        for item in items {
                            self.facets.add(field_name, item, doc_id);
                        }
                    }
                    Value::Number(n) => self.facets.add(field_name, &n.to_string(), doc_id),
                    Value::Bool(b) => self.facets.add(field_name, &b.to_string(), doc_id),
                }
            }
            if schema_field.sortable {
                if let Some(n) = value.as_f64() {
                    self.numeric.insert(field_name, n, doc_id);
                }
            }
        }

        position as usize
    }

    fn unindex_document(&mut self, doc_id: DocId) {
        let Some(document) = self.store.get(doc_id).cloned() else { return };

        for field_name in self.schema.ordered_string_fields() {
            let Some(value) = document.get_field(&field_name) else { continue };
            let texts: Vec<&str> = match value {
                Value::String(text) => vec![text.as_str()],
                Value::StringList(items) => items.iter().map(String::as_str).collect(),
                _ => Vec::new(),
            };
            for text in texts {
                for token in self.tokenizer.tokenize(text) {
                    self.inverted.remove_document(&mut self.trie, &token, doc_id);
                }
            }
        }

        for (field_name, schema_field) in self.schema.fields() {
            if !schema_field.facetable {
                continue;
            }
            let Some(value) = document.get_field(field_name) else { continue };
            match value {
                Value::String(s) => self.facets.remove(field_name, s, doc_id),
                Value::StringList(items) => {
                    for item in items {
                        self.facets.remove(field_name, item, doc_id);
                    }
                }
                Value::Number(n) => self.facets.remove(field_name, &n.to_string(), doc_id),
                Value::Bool(b) => self.facets.remove(field_name, &b.to_string(), doc_id),
            }
        }

        for (field_name, _) in self.schema.fields().filter(|(_, f)| f.sortable) {
            self.numeric.remove(field_name, doc_id);
        }
    }
}
