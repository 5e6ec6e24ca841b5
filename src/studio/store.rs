//! Document store contract and an in-process implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use rand::{Rng, distr::Alphanumeric};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use super::catalogue::Collection;
use super::error::StoreError;

pub type DocumentId = String;
pub type Fields = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// Every document of one collection at one moment, in insertion order.
pub type Snapshot = Vec<Document>;
pub type SnapshotStream = BoxStream<'static, Snapshot>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// `artifacts/{app_id}/public/data/{collection}`
    pub fn public_data(app_id: &str, collection: Collection) -> Self {
        Self(format!("artifacts/{app_id}/public/data/{collection}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Long-lived subscription: the current snapshot first, then one per change.
    async fn subscribe(&self, path: &CollectionPath) -> Result<SnapshotStream, StoreError>;

    async fn add(&self, path: &CollectionPath, fields: Fields) -> Result<DocumentId, StoreError>;

    /// Deleting a missing document is not an error.
    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), StoreError>;
}

/// Collections held in memory, one watch channel each.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionPath, watch::Sender<Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collection<R>(
        &self,
        path: &CollectionPath,
        f: impl FnOnce(&watch::Sender<Snapshot>) -> R,
    ) -> Result<R, StoreError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::Unavailable("collection lock poisoned".to_string()))?;
        let sender = collections
            .entry(path.clone())
            .or_insert_with(|| watch::channel(Vec::new()).0);
        Ok(f(sender))
    }
}

pub(crate) fn new_document_id() -> DocumentId {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn subscribe(&self, path: &CollectionPath) -> Result<SnapshotStream, StoreError> {
        let receiver = self.with_collection(path, |sender| sender.subscribe())?;
        debug!(path = %path, "subscribed to collection");
        Ok(WatchStream::new(receiver).boxed())
    }

    async fn add(&self, path: &CollectionPath, fields: Fields) -> Result<DocumentId, StoreError> {
        let id = new_document_id();
        let document = Document {
            id: id.clone(),
            fields,
        };
        self.with_collection(path, |sender| {
            sender.send_modify(|documents| documents.push(document));
        })?;
        debug!(path = %path, id = %id, "document added");
        Ok(id)
    }

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), StoreError> {
        let removed = self.with_collection(path, |sender| {
            sender.send_if_modified(|documents| {
                let before = documents.len();
                documents.retain(|document| document.id != id);
                documents.len() != before
            })
        })?;
        debug!(path = %path, id, removed, "document delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_public_data_path() {
        let path = CollectionPath::public_data("sanora-interior-organic", Collection::Leads);
        assert_eq!(
            path.as_str(),
            "artifacts/sanora-interior-organic/public/data/leads"
        );
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = new_document_id();
        let b = new_document_id();
        assert_eq!(a.len(), 20);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_subscription_sees_adds_and_deletes() {
        let store = MemoryStore::new();
        let path = CollectionPath::new("artifacts/test/public/data/projects");

        let mut stream = store.subscribe(&path).await.unwrap();
        assert!(stream.next().await.unwrap().is_empty());

        let id = store
            .add(&path, fields(json!({ "name": "Cedar House" })))
            .await
            .unwrap();
        let snapshot = stream.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
        assert_eq!(snapshot[0].fields["name"], "Cedar House");

        store.delete(&path, &id).await.unwrap();
        assert!(stream.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_current_snapshot() {
        let store = MemoryStore::new();
        let path = CollectionPath::new("leads");

        store.add(&path, fields(json!({ "n": 1 }))).await.unwrap();
        store.add(&path, fields(json!({ "n": 2 }))).await.unwrap();

        let mut stream = store.subscribe(&path).await.unwrap();
        let snapshot = stream.next().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].fields["n"], 2);
    }

    #[tokio::test]
    async fn test_collections_are_isolated_and_missing_delete_is_ok() {
        let store = MemoryStore::new();
        let projects = CollectionPath::new("projects");
        let leads = CollectionPath::new("leads");

        store.add(&projects, Fields::new()).await.unwrap();
        store.delete(&leads, "missing").await.unwrap();

        let mut stream = store.subscribe(&leads).await.unwrap();
        assert!(stream.next().await.unwrap().is_empty());
    }
}
