pub mod bm25;

pub use bm25::Bm25;
