use crate::core::config::SNAPSHOT_FORMAT_VERSION;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Document};
use crate::engine::Engine;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// The deterministic on-disk record (component C9). Every field is a plain
/// `Vec`/`BTreeMap`-derived collection in a fixed, reproducible order so two
/// snapshots of the same logical state bincode-encode to identical bytes.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    format_version: u32,
    schema: Schema,
    next_doc_id: u32,
    ids: HashMap<String, DocId>,
    documents: Vec<(DocId, Document, usize)>,
    inverted_entries: Vec<(String, DocId, Vec<u32>)>,
    facet_entries: Vec<(String, String, Vec<DocId>)>,
    numeric_entries: Vec<(String, f64, DocId)>,
}

/// Encodes `engine` as bincode, appends a CRC32 checksum, and writes the
/// result to `path` (spec §6: one file per collection).
pub fn save(engine: &Engine, path: &Path) -> Result<()> {
    let record = SnapshotRecord {
        format_version: SNAPSHOT_FORMAT_VERSION,
        schema: engine.schema().clone(),
        next_doc_id: engine.next_doc_id_for_snapshot(),
        ids: engine.ids_for_snapshot(),
        documents: engine.documents_for_snapshot(),
        inverted_entries: engine.inverted_entries_for_snapshot(),
        facet_entries: engine.facet_entries_for_snapshot(),
        numeric_entries: engine.numeric_entries_for_snapshot(),
    };

    let body = bincode::serialize(&record)?;
    let checksum = crc32fast::hash(&body);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(&checksum.to_le_bytes())?;
    file.write_all(&body)?;
    Ok(())
}

/// Reads `path`, verifies the checksum and format version, and rebuilds a
/// fresh [`Engine`] — including C2 (the trie), which is never stored on disk
/// and is rebuilt from the inverted index's token set.
pub fn load(path: &Path) -> Result<Engine> {
    let bytes = std::fs::read(path)?;
    if bytes.len() < 4 {
        return Err(Error::new(ErrorKind::CorruptSnapshot, "snapshot too short to contain a checksum"));
    }
    let (checksum_bytes, body) = bytes.split_at(4);
    let expected = u32::from_le_bytes(checksum_bytes.try_into().unwrap());
    let actual = crc32fast::hash(body);
    if expected != actual {
        return Err(Error::new(ErrorKind::CorruptSnapshot, "checksum mismatch"));
    }

    let record: SnapshotRecord = bincode::deserialize(body)
        .map_err(|e| Error::new(ErrorKind::CorruptSnapshot, e.to_string()))?;
    if record.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(Error::new(
            ErrorKind::CorruptSnapshot,
            format!("unsupported snapshot format version: {}", record.format_version),
        ));
    }

    Ok(Engine::from_snapshot(
        record.schema,
        record.next_doc_id,
        record.ids,
        record.documents,
        record.inverted_entries,
        record.facet_entries,
        record.numeric_entries,
    ))
}
