/// Okapi BM25 ranking (spec §4.6), k1 = 1.5, b = 0.75 by default.
#[derive(Debug, Clone, Copy)]
pub struct Bm25 {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25 {
    fn default() -> Self {
        Bm25 { k1: 1.5, b: 0.75 }
    }
}

impl Bm25 {
    pub fn new(k1: f64, b: f64) -> Self {
        Bm25 { k1, b }
    }

    /// `idf = ln(1 + (N - df + 0.5) / (df + 0.5))`
    pub fn idf(&self, total_docs: usize, document_frequency: usize) -> f64 {
        let n = total_docs as f64;
        let df = document_frequency as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// `idf * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * docLen / avgDocLen))`
    pub fn score_term(&self, idf: f64, tf: usize, doc_len: usize, avg_doc_len: f64) -> f64 {
        if avg_doc_len == 0.0 {
            return 0.0;
        }
        let tf = tf as f64;
        let doc_len = doc_len as f64;
        let numerator = idf * (tf * (self.k1 + 1.0));
        let denominator = tf + self.k1 * (1.0 - self.b + self.b * (doc_len / avg_doc_len));
        numerator / denominator
    }
}
