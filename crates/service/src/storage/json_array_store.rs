use std::{path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;

/// A record with a store-assigned integer identifier.
pub trait Record: Clone + Send + Sync + serde::Serialize + serde::de::DeserializeOwned {
    fn id(&self) -> u32;
}

/// Generic JSON file-backed ordered collection.
///
/// Persists a `Vec<T>` to a single JSON array file, rewriting the whole
/// collection on every mutation. Insertion order is storage order. Identifier
/// assignment is `max(existing ids) + 1`, or 1 when the collection is empty.
///
/// Mutations hold the write lock across both the in-memory change and the
/// file rewrite, so concurrent inserts cannot compute the same next id from
/// a stale read.
#[derive(Clone)]
pub struct JsonArrayStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
    file_path: PathBuf,
}

impl<T: Record> JsonArrayStore<T> {
    /// Initialize the store from a path. Creates the file with an empty array
    /// if missing. An unreadable or unparseable file degrades to an empty
    /// collection with a warning rather than failing the load.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "collection file unparseable, starting empty");
                Vec::new()
            }),
            Err(_) => {
                let empty: Vec<T> = Vec::new();
                fs::write(
                    &file_path,
                    serde_json::to_vec_pretty(&empty)
                        .map_err(|e| ServiceError::Persistence(e.to_string()))?,
                )
                .await
                .map_err(|e| ServiceError::Persistence(e.to_string()))?;
                empty
            }
        };

        Ok(Self { inner: Arc::new(RwLock::new(items)), file_path })
    }

    /// Rewrite the whole collection: serialize to a temp file in the same
    /// directory, then rename over the target so readers never observe a
    /// half-written file.
    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items)
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// All records in storage (insertion) order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// Exact-match lookup by id.
    pub async fn get(&self, id: u32) -> Option<T> {
        let items = self.inner.read().await;
        items.iter().find(|t| t.id() == id).cloned()
    }

    /// Linear scan filter preserving storage order.
    pub async fn find<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().filter(|t| pred(t)).cloned().collect()
    }

    /// First record matching the predicate, in storage order.
    pub async fn find_one<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().find(|t| pred(t)).cloned()
    }

    /// Append a record built from the next free id, persist, and return it.
    pub async fn insert_with<F>(&self, make: F) -> Result<T, ServiceError>
    where
        F: FnOnce(u32) -> T,
    {
        let mut items = self.inner.write().await;
        let id = items.iter().map(|t| t.id()).max().unwrap_or(0) + 1;
        let record = make(id);
        items.push(record.clone());
        self.save(&items).await?;
        Ok(record)
    }

    /// Mutate the record with the given id in place and persist. Returns
    /// `Ok(None)` when no record matches.
    pub async fn update_with<F>(&self, id: u32, apply: F) -> Result<Option<T>, ServiceError>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.inner.write().await;
        let Some(record) = items.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        apply(record);
        let updated = record.clone();
        self.save(&items).await?;
        Ok(Some(updated))
    }

    /// Remove the record with the given id; returns whether one existed.
    /// A miss performs no write.
    pub async fn remove(&self, id: u32) -> Result<bool, ServiceError> {
        let mut items = self.inner.write().await;
        let before = items.len();
        items.retain(|t| t.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(&items).await?;
        Ok(true)
    }

    /// Remove every record matching the predicate; returns how many were
    /// removed. A zero-match call performs no write.
    pub async fn remove_where<F>(&self, pred: F) -> Result<usize, ServiceError>
    where
        F: Fn(&T) -> bool,
    {
        let mut items = self.inner.write().await;
        let before = items.len();
        items.retain(|t| !pred(t));
        let removed = before - items.len();
        if removed > 0 {
            self.save(&items).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    impl Record for Note {
        fn id(&self) -> u32 {
            self.id
        }
    }

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_array_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("seq");
        let store = JsonArrayStore::<Note>::new(&tmp).await?;

        for i in 0..5u32 {
            let note = store
                .insert_with(|id| Note { id, text: format!("note {i}") })
                .await?;
            assert_eq!(note.id, i + 1);
        }
        let ids: Vec<u32> = store.list().await.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn next_id_is_max_plus_one_after_deletes() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("maxid");
        let store = JsonArrayStore::<Note>::new(&tmp).await?;

        for _ in 0..3 {
            store.insert_with(|id| Note { id, text: "x".into() }).await?;
        }
        // removing the middle record leaves max id 3, so the next insert gets 4
        assert!(store.remove(2).await?);
        let next = store.insert_with(|id| Note { id, text: "y".into() }).await?;
        assert_eq!(next.id, 4);

        // removing the max id makes it eligible for reuse
        assert!(store.remove(4).await?);
        let reused = store.insert_with(|id| Note { id, text: "z".into() }).await?;
        assert_eq!(reused.id, 4);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn crud_persists_across_reload() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("reload");
        let store = JsonArrayStore::<Note>::new(&tmp).await?;

        let a = store.insert_with(|id| Note { id, text: "first".into() }).await?;
        store.insert_with(|id| Note { id, text: "second".into() }).await?;
        store
            .update_with(a.id, |n| n.text = "first, edited".into())
            .await?
            .expect("note exists");
        assert!(store.remove(2).await?);

        let reloaded = JsonArrayStore::<Note>::new(&tmp).await?;
        let items = reloaded.list().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "first, edited");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn remove_missing_id_is_a_noop() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("miss");
        let store = JsonArrayStore::<Note>::new(&tmp).await?;
        store.insert_with(|id| Note { id, text: "only".into() }).await?;

        assert!(!store.remove(99).await?);
        assert_eq!(store.list().await.len(), 1);
        assert!(store.update_with(99, |n| n.text = "nope".into()).await?.is_none());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unparseable_file_degrades_to_empty() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("corrupt");
        tokio::fs::write(&tmp, b"{ this is not an array").await?;

        let store = JsonArrayStore::<Note>::new(&tmp).await?;
        assert!(store.list().await.is_empty());
        assert!(store.get(1).await.is_none());
        assert!(store.find(|_| true).await.is_empty());

        // the store stays usable after the degraded load
        let note = store.insert_with(|id| Note { id, text: "fresh".into() }).await?;
        assert_eq!(note.id, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_inserts_never_share_an_id() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("race");
        let store = JsonArrayStore::<Note>::new(&tmp).await?;

        let mut handles = Vec::new();
        for i in 0..16u32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_with(|id| Note { id, text: format!("w{i}") })
                    .await
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
