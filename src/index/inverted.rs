use crate::core::types::DocId;
use crate::index::trie::Trie;
use std::collections::BTreeMap;

/// token → docId → ascending position list (component C3).
///
/// Mutation within a single `add` is monotonic: positions arrive already
/// ascending because tokenization is left-to-right and the global position
/// counter only grows, so this index never needs to re-sort a posting list.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<DocId, Vec<u32>>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Appends `position` to `(token, doc)`'s posting list, creating the
    /// token's entry (and inserting it into `trie`) on first use.
    pub fn index_token_position(&mut self, trie: &mut Trie, token: &str, doc: DocId, position: u32) {
        let is_new_token = !self.postings.contains_key(token);
        let entry = self.postings.entry(token.to_string()).or_default();
        if is_new_token {
            trie.insert(token);
        }
        entry.entry(doc).or_default().push(position);
    }

    /// Removes `doc` from `token`'s posting list. Garbage-collects the
    /// token's entry (and its trie node) once the last docId is removed.
    pub fn remove_document(&mut self, trie: &mut Trie, token: &str, doc: DocId) {
        if let Some(docs) = self.postings.get_mut(token) {
            docs.remove(&doc);
            if docs.is_empty() {
                self.postings.remove(token);
                trie.delete(token);
            }
        }
    }

    pub fn postings(&self, token: &str) -> Option<&BTreeMap<DocId, Vec<u32>>> {
        self.postings.get(token)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    pub fn document_frequency(&self, token: &str) -> usize {
        self.postings.get(token).map_or(0, |docs| docs.len())
    }

    pub fn tokens(&self) -> impl Iterator<Item = &String> {
        self.postings.keys()
    }

    /// All `(token, docId, positions)` triples, used by the snapshot codec.
    pub fn iter_entries(&self) -> impl Iterator<Item = (&str, &DocId, &[u32])> {
        self.postings.iter().flat_map(|(token, docs)| {
            docs.iter().map(move |(doc, positions)| (token.as_str(), doc, positions.as_slice()))
        })
    }
}
