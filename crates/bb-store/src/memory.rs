//! In-memory blackboard: namespace -> ref -> item.

use bb_types::{Item, NamespaceStore, SetItemRequest};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// ref -> item, in first-insertion order.
type Namespace = IndexMap<String, Item>;

/// In-memory NamespaceStore. Lives for the process lifetime; nothing is persisted.
pub struct InMemoryBlackboard {
    /// namespace id -> items.
    store: Arc<RwLock<HashMap<String, Namespace>>>,
}

impl InMemoryBlackboard {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBlackboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NamespaceStore for InMemoryBlackboard {
    async fn set_item(&self, ns: &str, req: SetItemRequest) -> Item {
        let reference = req.reference.clone();
        let mut guard = self.store.write().await;
        let dir = guard.entry(ns.to_string()).or_default();
        match req.into_item() {
            None => {
                // shift_remove keeps the order of the remaining items.
                if dir.shift_remove(&reference).is_some() {
                    tracing::debug!(ns, reference = %reference, "item deleted");
                }
                Item::empty()
            }
            Some(item) => {
                tracing::debug!(ns, reference = %reference, "item set");
                dir.insert(reference, item.clone());
                item
            }
        }
    }

    async fn get_item(&self, ns: &str, reference: &str) -> Item {
        let guard = self.store.read().await;
        guard
            .get(ns)
            .and_then(|dir| dir.get(reference))
            .cloned()
            .unwrap_or_default()
    }

    async fn get_items(&self, ns: &str, refs: &[String]) -> Vec<Item> {
        let guard = self.store.read().await;
        let dir = guard.get(ns);
        refs.iter()
            .map(|r| {
                dir.and_then(|d| d.get(r))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    async fn get_all_items(&self, ns: &str) -> Vec<Item> {
        let guard = self.store.read().await;
        guard
            .get(ns)
            .map(|dir| dir.values().cloned().collect())
            .unwrap_or_default()
    }

    async fn clear(&self, ns: &str) -> bool {
        let mut guard = self.store.write().await;
        let dropped = guard
            .insert(ns.to_string(), Namespace::new())
            .map(|old| old.len())
            .unwrap_or(0);
        tracing::debug!(ns, dropped, "namespace cleared");
        true
    }

    async fn namespaces(&self) -> Vec<String> {
        let guard = self.store.read().await;
        let mut out: Vec<String> = guard.keys().cloned().collect();
        out.sort();
        out
    }

    async fn item_count(&self, ns: &str) -> usize {
        let guard = self.store.read().await;
        guard.get(ns).map(|dir| dir.len()).unwrap_or(0)
    }
}
