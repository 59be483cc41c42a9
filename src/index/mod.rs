pub mod facet;
pub mod inverted;
pub mod numeric;
pub mod store;
pub mod trie;

pub use facet::FacetIndex;
pub use inverted::InvertedIndex;
pub use numeric::{NumericIndex, RangeBounds};
pub use store::DocumentStore;
pub use trie::Trie;
