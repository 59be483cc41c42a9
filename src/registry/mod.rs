use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::Engine;
use crate::schema::Schema;
use crate::snapshot;
use std::collections::HashMap;

/// Owns every named collection in one process (component C10, a minimal
/// expansion beyond the single-collection core). Not `Sync` — the engine is
/// single-threaded cooperative, so a registry is meant to live behind
/// whatever single-writer boundary the embedding application already has.
pub struct CollectionRegistry {
    config: Config,
    collections: HashMap<String, Engine>,
}

impl CollectionRegistry {
    pub fn new(config: Config) -> Self {
        CollectionRegistry {
            config,
            collections: HashMap::new(),
        }
    }

    /// Loads every `*.index.bin` snapshot already present in the configured
    /// data directory, keyed by file stem. `snapshot::load` always resets a
    /// rebuilt engine's BM25 constants to the library defaults (spec §9: a
    /// snapshot is a content artifact, not a configuration dump), so this
    /// reapplies `config`'s BM25/phrase-bonus fields on top, the same way
    /// `create` does for a freshly-constructed collection.
    pub fn load_all(config: Config) -> Result<Self> {
        let mut registry = CollectionRegistry::new(config);
        if !registry.config.data_dir.exists() {
            return Ok(registry);
        }

        for entry in std::fs::read_dir(&registry.config.data_dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else { continue };
            let Some(name) = file_name.strip_suffix(".index.bin") else { continue };
            let engine = snapshot::load(&path)?
                .with_bm25(registry.config.bm25_k1, registry.config.bm25_b)
                .with_phrase_bonus(registry.config.phrase_bonus);
            registry.collections.insert(name.to_string(), engine);
        }

        Ok(registry)
    }

    /// Creates a new collection using `self.config`'s BM25/phrase-bonus
    /// fields, or returns the existing one if `name` is already registered.
    pub fn create(&mut self, name: impl Into<String>, schema: Schema) -> &mut Engine {
        let name = name.into();
        let config = self.config.clone();
        self.collections
            .entry(name)
            .or_insert_with(|| Engine::from_config(&config, schema))
    }

    pub fn get(&self, name: &str) -> Option<&Engine> {
        self.collections.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Engine> {
        self.collections.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.collections.keys()
    }

    /// Persists `name`'s current state to its snapshot path immediately —
    /// the registry has no write-behind buffering (spec §5: save-on-write).
    pub fn save(&self, name: &str) -> Result<()> {
        if let Some(engine) = self.collections.get(name) {
            let path = self.config.snapshot_path(name);
            snapshot::save(engine, &path)?;
        }
        Ok(())
    }

    pub fn save_all(&self) -> Result<()> {
        for name in self.collections.keys() {
            let path = self.config.snapshot_path(name);
            snapshot::save(&self.collections[name], &path)?;
        }
        Ok(())
    }
}
