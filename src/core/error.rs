use std::fmt;

/// The error kinds distinguished at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `add` called with an id that already exists. Caller should use `update`.
    DuplicateId,
    /// `update`/`delete`/`get` on an id that is not present.
    NotFound,
    /// A range filter had none of `gte|lte|gt|lt`, or targeted a non-numeric field.
    InvalidFilter,
    /// `load` encountered malformed bytes, a bad checksum, or a schema mismatch.
    CorruptSnapshot,
    /// Disk I/O failure during `save`/`load`.
    IoFailure,
    /// bincode encode/decode failure that is not itself a truncated/corrupt blob.
    Serialization,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }

    pub fn duplicate_id(id: &str) -> Self {
        Error::new(ErrorKind::DuplicateId, format!("document id already exists: {id}"))
    }

    pub fn not_found(id: &str) -> Self {
        Error::new(ErrorKind::NotFound, format!("no document with id: {id}"))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::IoFailure, err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::new(ErrorKind::Serialization, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
