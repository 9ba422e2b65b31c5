// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store doubles for the catalog, content, and order traits.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use suntrade_core::error::SuntradeError;
use suntrade_core::traits::{CatalogStore, ContentStore, OrderStore};
use suntrade_core::types::{
    Category, CategoryId, NewsArticle, OrderDraft, OrderId, Product, ProductId, Shop, ShopId,
};

/// Catalog backed by plain vectors.
#[derive(Default)]
pub struct InMemoryCatalog {
    shops: Mutex<Vec<Shop>>,
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shop(&self, shop: Shop) {
        self.shops.lock().unwrap().push(shop);
    }

    pub fn add_category(&self, category: Category) {
        self.categories.lock().unwrap().push(category);
    }

    pub fn add_product(&self, product: Product) {
        self.products.lock().unwrap().push(product);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_shop(&self, id: &ShopId) -> Result<Option<Shop>, SuntradeError> {
        Ok(self
            .shops
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn categories_for_shop(
        &self,
        shop: &ShopId,
    ) -> Result<Vec<Category>, SuntradeError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.shop_id == shop)
            .cloned()
            .collect())
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, SuntradeError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }

    async fn products_in_category(
        &self,
        shop: &ShopId,
        category: &CategoryId,
    ) -> Result<Vec<Product>, SuntradeError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.shop_id == shop && p.category == category.0)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, SuntradeError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }
}

/// News collection backed by a vector plus a pre-seeded existence set.
#[derive(Default)]
pub struct InMemoryContent {
    articles: Mutex<Vec<NewsArticle>>,
    existing: Mutex<HashSet<String>>,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an update id as already imported without storing an article.
    pub fn seed_existing(&self, source_update_id: &str) {
        self.existing
            .lock()
            .unwrap()
            .insert(source_update_id.to_string());
    }

    /// Articles inserted so far, in order.
    pub fn articles(&self) -> Vec<NewsArticle> {
        self.articles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for InMemoryContent {
    async fn article_exists(&self, source_update_id: &str) -> Result<bool, SuntradeError> {
        if self.existing.lock().unwrap().contains(source_update_id) {
            return Ok(true);
        }
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.source_update_id == source_update_id))
    }

    async fn insert_article(&self, article: NewsArticle) -> Result<(), SuntradeError> {
        self.articles.lock().unwrap().push(article);
        Ok(())
    }
}

/// Order sink assigning sequential identifiers.
#[derive(Default)]
pub struct InMemoryOrders {
    drafts: Mutex<Vec<OrderDraft>>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drafts persisted so far, in order.
    pub fn created(&self) -> Vec<OrderDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrders {
    async fn create_order(&self, draft: OrderDraft) -> Result<OrderId, SuntradeError> {
        let mut drafts = self.drafts.lock().unwrap();
        drafts.push(draft);
        Ok(OrderId(format!("order-{:06}", drafts.len())))
    }
}
