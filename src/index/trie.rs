use std::collections::BTreeMap;

/// Ordered character tree over the live vocabulary (component C2).
///
/// Holds exactly the set of tokens with at least one posting in the
/// [`crate::index::inverted::InvertedIndex`]; `insert`/`delete` are driven by
/// that index, never called independently by callers. `search_fuzzy` walks
/// the tree depth-first, carrying a running Levenshtein DP row per edge so
/// whole subtrees are pruned the moment no cell in the row can still reach
/// `max_distance`.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    is_terminal: bool,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Idempotent; marks the token's terminal node.
    pub fn insert(&mut self, token: &str) {
        let mut node = &mut self.root;
        for ch in token.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_terminal = true;
    }

    /// Clears the terminal flag and prunes any node that is neither terminal
    /// nor has children, walking back toward the root. Returns whether the
    /// token was present.
    pub fn delete(&mut self, token: &str) -> bool {
        Self::delete_rec(&mut self.root, &token.chars().collect::<Vec<_>>())
    }

    fn delete_rec(node: &mut TrieNode, remaining: &[char]) -> bool {
        let Some((&ch, rest)) = remaining.split_first() else {
            if !node.is_terminal {
                return false;
            }
            node.is_terminal = false;
            return true;
        };

        let Some(child) = node.children.get_mut(&ch) else {
            return false;
        };
        let removed = Self::delete_rec(child, rest);
        if removed && child.children.is_empty() && !child.is_terminal {
            node.children.remove(&ch);
        }
        removed
    }

    pub fn contains(&self, token: &str) -> bool {
        let mut node = &self.root;
        for ch in token.chars() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_terminal
    }

    /// All tokens within `max_distance` Levenshtein edits of `query`, in
    /// tree-order (callers must not depend on this order). Exact matches are
    /// returned at distance 0.
    pub fn search_fuzzy(&self, query: &str, max_distance: usize) -> Vec<(String, usize)> {
        let query: Vec<char> = query.chars().collect();
        let first_row: Vec<usize> = (0..=query.len()).collect();
        let mut results = Vec::new();
        let mut path = String::new();

        for (&ch, child) in &self.root.children {
            Self::descend(child, ch, &query, &first_row, max_distance, &mut path, &mut results);
        }

        results
    }

    #[allow(clippy::too_many_arguments)]
    fn descend(
        node: &TrieNode,
        edge_char: char,
        query: &[char],
        parent_row: &[usize],
        max_distance: usize,
        path: &mut String,
        results: &mut Vec<(String, usize)>,
    ) {
        let mut row = vec![parent_row[0] + 1];
        for (j, &qc) in query.iter().enumerate() {
            let cost = if qc == edge_char { 0 } else { 1 };
            let value = (parent_row[j] + cost)
                .min(row[j] + 1)
                .min(parent_row[j + 1] + 1);
            row.push(value);
        }

        if *row.iter().min().unwrap() > max_distance {
            return;
        }

        path.push(edge_char);

        if node.is_terminal {
            let distance = row[query.len()];
            if distance <= max_distance {
                results.push((path.clone(), distance));
            }
        }

        for (&ch, child) in &node.children {
            Self::descend(child, ch, query, &row, max_distance, path, results);
        }

        path.pop();
    }
}
