// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content store trait: persistence of imported news articles.

use async_trait::async_trait;

use crate::error::SuntradeError;
use crate::types::NewsArticle;

/// Write access to the news collection of the document store collaborator.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Whether an article imported from the given update already exists.
    ///
    /// This is a plain equality query, not part of a transaction with
    /// [`insert_article`](Self::insert_article): two concurrent importers can
    /// both see `false` and double-import the same update. Strict
    /// at-most-once needs a transactional check-and-insert in the backend.
    async fn article_exists(&self, source_update_id: &str) -> Result<bool, SuntradeError>;

    async fn insert_article(&self, article: NewsArticle) -> Result<(), SuntradeError>;
}
