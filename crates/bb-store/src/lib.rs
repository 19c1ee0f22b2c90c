//! Namespace store trait and in-memory implementation.

mod memory;

pub use bb_types::{Item, ItemValue, NamespaceStore, SetItemRequest};
pub use memory::InMemoryBlackboard;
