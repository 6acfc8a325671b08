use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter};
use crate::error::{Error, Result};

type Documents = BTreeMap<Uuid, Document>;

/// In-process document store
///
/// Used for local development and tests. Documents live in per-collection
/// maps ordered by id, so listing order matches creation order for UUIDv7 ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Documents>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fails with `Conflict` if another document already holds one of the
/// collection's unique values.
fn check_unique(collection: Collection, documents: &Documents, id: Uuid, document: &Document) -> Result<()> {
    for field in collection.unique_fields() {
        let Some(value) = document.get(*field) else {
            continue;
        };
        let taken = documents
            .iter()
            .any(|(other_id, other)| *other_id != id && other.get(*field) == Some(value));
        if taken {
            return Err(Error::Conflict(format!(
                "A document in {} with this {} already exists",
                collection, field
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, id: Uuid, document: Document) -> Result<()> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if documents.contains_key(&id) {
            return Err(Error::Conflict(format!("Duplicate id {} in {}", id, collection)));
        }
        check_unique(collection, documents, id, &document)?;

        documents.insert(id, document);
        Ok(())
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|documents| {
            documents
                .values()
                .find(|document| filter.matches(document))
                .cloned()
        }))
    }

    async fn replace(&self, collection: Collection, id: Uuid, document: Document) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        if !documents.contains_key(&id) {
            return Ok(false);
        }
        check_unique(collection, documents, id, &document)?;

        documents.insert(id, document);
        Ok(true)
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|_, document| !filter.matches(document));
        Ok((before - documents.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
