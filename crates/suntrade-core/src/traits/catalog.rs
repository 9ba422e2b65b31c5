// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog store trait: read-only access to shop/category/product records.

use async_trait::async_trait;

use crate::error::SuntradeError;
use crate::types::{Category, CategoryId, Product, ProductId, Shop, ShopId};

/// Read access to the product catalog held by the document store
/// collaborator. `Ok(None)` means the record does not exist; errors are
/// reserved for the store itself failing.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_shop(&self, id: &ShopId) -> Result<Option<Shop>, SuntradeError>;

    /// All categories belonging to a shop, in store order (callers sort by
    /// the `order` field for display).
    async fn categories_for_shop(&self, shop: &ShopId)
    -> Result<Vec<Category>, SuntradeError>;

    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, SuntradeError>;

    /// Products of a shop referencing the given category identifier.
    async fn products_in_category(
        &self,
        shop: &ShopId,
        category: &CategoryId,
    ) -> Result<Vec<Product>, SuntradeError>;

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, SuntradeError>;
}
