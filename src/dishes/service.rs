use std::sync::{Arc, RwLock};

use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::storage::KvStore;

use super::models::CustomDish;

/// Storage slot holding the whole dish collection as one JSON blob.
const DISHES_KEY: &str = "custom_dishes";

/// The user's recipe collection. Every mutation rewrites the persisted blob;
/// missing or unreadable stored data degrades to an empty collection.
pub struct DishStore {
    dishes: RwLock<Vec<CustomDish>>,
    kv: Arc<dyn KvStore>,
}

impl DishStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            dishes: RwLock::new(Vec::new()),
            kv,
        }
    }

    /// Loads the persisted collection. Absence of data and undecodable data
    /// are both non-fatal: the store starts empty.
    pub async fn load(&self) {
        let blob = match self.kv.get(DISHES_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "failed to read dish collection, starting empty");
                return;
            }
        };
        match serde_json::from_slice::<Vec<CustomDish>>(&blob) {
            Ok(dishes) => {
                *self.dishes.write().expect("dish lock poisoned") = dishes;
            }
            Err(e) => {
                warn!(error = %e, "stored dish collection is corrupt, starting empty");
            }
        }
    }

    pub fn all(&self) -> Vec<CustomDish> {
        self.dishes.read().expect("dish lock poisoned").clone()
    }

    /// Appends the dish, then persists the full collection. The in-memory
    /// append stays even when persisting fails.
    pub async fn add(&self, dish: CustomDish) -> Result<(), AppError> {
        self.dishes.write().expect("dish lock poisoned").push(dish);
        self.persist().await
    }

    /// Removes the dish by identity, then persists. Unknown ids are a no-op
    /// apart from the rewrite.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.dishes
            .write()
            .expect("dish lock poisoned")
            .retain(|d| d.id != id);
        self.persist().await
    }

    async fn persist(&self) -> Result<(), AppError> {
        let snapshot = self.all();
        let blob = serde_json::to_vec(&snapshot)
            .map_err(|e| AppError::PersistenceWrite(e.to_string()))?;
        self.kv
            .put(DISHES_KEY, Bytes::from(blob))
            .await
            .map_err(|e| AppError::PersistenceWrite(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn dish(name: &str) -> CustomDish {
        CustomDish {
            id: Uuid::new_v4(),
            name: name.to_string(),
            ingredients: Vec::new(),
            instructions: "Wymieszać i upiec.".into(),
            calories: 450.0,
            protein: 30.0,
            fat: 12.0,
            carbs: 50.0,
            image_data: None,
        }
    }

    #[tokio::test]
    async fn loads_empty_when_nothing_was_persisted() {
        let store = DishStore::new(Arc::new(MemoryKv::default()));
        store.load().await;
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn add_then_delete_restores_the_persisted_blob() {
        let kv = Arc::new(MemoryKv::default());
        let store = DishStore::new(kv.clone() as Arc<dyn KvStore>);

        store.add(dish("Szakszuka")).await.expect("add");
        let before = kv.get(DISHES_KEY).await.expect("get").expect("persisted");

        let extra = dish("Leczo");
        let extra_id = extra.id;
        store.add(extra).await.expect("add");
        store.delete(extra_id).await.expect("delete");

        let after = kv.get(DISHES_KEY).await.expect("get").expect("persisted");
        assert_eq!(before, after);
        assert_eq!(store.all().len(), 1);
    }

    #[tokio::test]
    async fn collection_survives_a_reload() {
        let kv = Arc::new(MemoryKv::default());
        {
            let store = DishStore::new(kv.clone() as Arc<dyn KvStore>);
            store.add(dish("Szakszuka")).await.expect("add");
        }
        let reloaded = DishStore::new(kv as Arc<dyn KvStore>);
        reloaded.load().await;
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.all()[0].name, "Szakszuka");
    }

    #[tokio::test]
    async fn corrupt_blob_loads_as_empty() {
        let kv = Arc::new(MemoryKv::default());
        kv.put(DISHES_KEY, Bytes::from_static(b"not json"))
            .await
            .expect("put");
        let store = DishStore::new(kv as Arc<dyn KvStore>);
        store.load().await;
        assert!(store.all().is_empty());
    }
}
