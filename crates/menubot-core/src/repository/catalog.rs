//! Catalog store port.

use menubot_types::catalog::{CatalogItem, ItemId, ItemPatch, NewItem};
use menubot_types::error::StoreError;

/// Storage surface for catalog items.
///
/// Categories are derived, not stored: `list_categories` returns the
/// distinct set of item categories, so deleting the last item of a category
/// removes the category from the listing.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CatalogStore: Send + Sync {
    /// Insert a new item and return its assigned id.
    fn add_item(
        &self,
        item: NewItem,
    ) -> impl std::future::Future<Output = Result<ItemId, StoreError>> + Send;

    /// Distinct categories in ascending label order.
    fn list_categories(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Items of one category in ascending id order.
    fn list_items(
        &self,
        category: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogItem>, StoreError>> + Send;

    /// One item by id, or `None` when it does not exist.
    fn get_item(
        &self,
        id: ItemId,
    ) -> impl std::future::Future<Output = Result<Option<CatalogItem>, StoreError>> + Send;

    /// Delete an item. Deleting an unknown id is a no-op.
    fn delete_item(
        &self,
        id: ItemId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Apply a partial update to an existing item.
    fn update_item(
        &self,
        id: ItemId,
        patch: ItemPatch,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Every item, ordered by category then id.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogItem>, StoreError>> + Send;
}
