//! Output formats for pruned trees.

pub mod compact;
pub mod index_map;
pub mod xml;

pub use compact::{CompactOutput, CompactRenderer};
pub use index_map::{IndexEntry, IndexMap, IndexedElement};
