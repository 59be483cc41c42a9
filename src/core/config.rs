use std::path::PathBuf;

/// Snapshot format-version tag. Bumped whenever the on-disk record layout
/// changes; `load` rejects anything else as `CorruptSnapshot`.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// BM25 and collaborator-facing defaults for one [`crate::engine::Engine`].
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Term frequency saturation point.
    pub bm25_k1: f64,
    /// Length-normalization strength.
    pub bm25_b: f64,
    /// Multiplier applied to a document's BM25 sum when it wins the phrase branch.
    pub phrase_bonus: f64,
    /// Ingest batch size after which bulk-loading callers should cooperatively yield.
    pub bulk_yield_batch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("./data"),
            bm25_k1: 1.5,
            bm25_b: 0.75,
            phrase_bonus: 1.5,
            bulk_yield_batch: 1000,
        }
    }
}

impl Config {
    /// Path a [`crate::registry::CollectionRegistry`] uses for a named collection's snapshot.
    pub fn snapshot_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.index.bin"))
    }
}
