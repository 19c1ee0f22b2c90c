//! Traits for the namespace store and the credential resolver.

use crate::{BlackboardStats, Item, SetItemRequest};
use async_trait::async_trait;

/// Namespace-partitioned item store.
///
/// Contract: every operation is total. Missing namespaces and missing refs are empty results,
/// never errors. `ns` is an already-resolved namespace identifier.
#[async_trait]
pub trait NamespaceStore: Send + Sync {
    /// Store (or, with a null value, delete) one item. A delete returns the empty item.
    async fn set_item(&self, ns: &str, req: SetItemRequest) -> Item;

    /// Apply `set_item` to each entry in order; one result per entry.
    /// Entries are independent: a delete mid-batch does not stop the rest.
    async fn set_items(&self, ns: &str, reqs: Vec<SetItemRequest>) -> Vec<Item> {
        let mut out = Vec::with_capacity(reqs.len());
        for req in reqs {
            out.push(self.set_item(ns, req).await);
        }
        out
    }

    /// Stored item or the empty item.
    async fn get_item(&self, ns: &str, reference: &str) -> Item;

    /// Per-ref lookup keeping input order and cardinality.
    async fn get_items(&self, ns: &str, refs: &[String]) -> Vec<Item> {
        let mut out = Vec::with_capacity(refs.len());
        for reference in refs {
            out.push(self.get_item(ns, reference).await);
        }
        out
    }

    /// All items in `ns`.
    async fn get_all_items(&self, ns: &str) -> Vec<Item>;

    /// Empty `ns`. Always succeeds.
    async fn clear(&self, ns: &str) -> bool;

    /// Known namespace identifiers (including emptied ones).
    async fn namespaces(&self) -> Vec<String>;

    /// Number of items in `ns`.
    async fn item_count(&self, ns: &str) -> usize;

    async fn stats(&self) -> BlackboardStats {
        let namespaces = self.namespaces().await;
        let mut items = 0;
        for ns in &namespaces {
            items += self.item_count(ns).await;
        }
        BlackboardStats {
            namespaces: namespaces.len(),
            items,
        }
    }
}

/// External authentication collaborator: credential -> stable subject identifier.
#[async_trait]
pub trait AuthResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<String, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("unknown token")]
    Unknown,
    #[error("auth resolver error: {0}")]
    Other(String),
    #[error("auth response has no subject")]
    MissingSubject,
}
