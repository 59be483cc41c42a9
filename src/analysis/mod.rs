pub mod tokenizer;

pub use tokenizer::{StandardTokenizer, Tokenizer};
