//! In-memory catalog store.
//!
//! Implements `CatalogStore` over a concurrent map with a monotonic id
//! allocator. Listing orders mirror the catalog table's queries: categories
//! ascending, items within a category by id, the full listing by category
//! then id.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use menubot_core::repository::CatalogStore;
use menubot_types::catalog::{CatalogItem, ItemId, ItemPatch, NewItem};
use menubot_types::error::StoreError;

/// Concurrent in-process implementation of `CatalogStore`.
pub struct MemoryCatalogStore {
    items: DashMap<ItemId, CatalogItem>,
    next_id: AtomicI64,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicI64::new(0),
        }
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for MemoryCatalogStore {
    async fn add_item(&self, item: NewItem) -> Result<ItemId, StoreError> {
        let id = ItemId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.items.insert(
            id,
            CatalogItem {
                id,
                category: item.category,
                name: item.name,
                kind: item.kind,
                payload: item.payload,
            },
        );
        Ok(id)
    }

    async fn list_categories(&self) -> Result<Vec<String>, StoreError> {
        let mut categories: Vec<String> = self
            .items
            .iter()
            .map(|entry| entry.value().category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn list_items(&self, category: &str) -> Result<Vec<CatalogItem>, StoreError> {
        let mut items: Vec<CatalogItem> = self
            .items
            .iter()
            .filter(|entry| entry.value().category == category)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<CatalogItem>, StoreError> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        // Idempotent, as the table's DELETE is.
        self.items.remove(&id);
        Ok(())
    }

    async fn update_item(&self, id: ItemId, patch: ItemPatch) -> Result<(), StoreError> {
        let mut item = self.items.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(kind) = patch.kind {
            item.kind = kind;
        }
        if let Some(payload) = patch.payload {
            item.payload = payload;
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CatalogItem>, StoreError> {
        let mut items: Vec<CatalogItem> = self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then(a.id.cmp(&b.id)));
        Ok(items)
    }
}
