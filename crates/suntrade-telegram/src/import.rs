// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! News importer: turns inbound channel posts into persisted articles.
//!
//! The importer polls the gateway for recent posts, skips anything already
//! imported (keyed by the platform update id), relocates photos to permanent
//! image hosting, and writes articles to the content store. Image relocation
//! is best-effort: a failed upload degrades the article to an empty image
//! field rather than aborting the import.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use suntrade_core::error::SuntradeError;
use suntrade_core::traits::{ContentStore, ImageHost, MessageGateway};
use suntrade_core::types::{ChannelPost, ImportCandidate, NewsArticle};

/// Maximum length of a derived article title.
const TITLE_MAX_CHARS: usize = 100;

/// Category assigned to every imported article.
const IMPORT_CATEGORY: &str = "TELEGRAM";

/// Summary of one import run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Articles written this run.
    pub imported: usize,
    /// Posts skipped because an article for their update already exists.
    pub skipped: usize,
    /// Posts whose photo could not be relocated and were imported without
    /// an image.
    pub degraded: usize,
}

/// Imports channel posts into the news collection.
pub struct NewsImporter {
    gateway: Arc<dyn MessageGateway>,
    content: Arc<dyn ContentStore>,
    images: Arc<dyn ImageHost>,
    update_limit: u32,
}

impl NewsImporter {
    pub fn new(
        gateway: Arc<dyn MessageGateway>,
        content: Arc<dyn ContentStore>,
        images: Arc<dyn ImageHost>,
        update_limit: u32,
    ) -> Self {
        Self {
            gateway,
            content,
            images,
            update_limit,
        }
    }

    /// Polls once and imports every post not yet seen.
    ///
    /// Each post is independent: a failure importing one is logged and does
    /// not stop the rest. Only a failed poll aborts the run.
    pub async fn import_new_messages(&self) -> Result<ImportOutcome, SuntradeError> {
        let posts = self.gateway.fetch_recent_updates(self.update_limit).await?;
        let mut outcome = ImportOutcome::default();

        for post in &posts {
            let key = post.update_id.to_string();
            if self.content.article_exists(&key).await? {
                outcome.skipped += 1;
                continue;
            }

            let (article, degraded) = self.article_from_post(post).await;
            match self.content.insert_article(article).await {
                Ok(()) => {
                    outcome.imported += 1;
                    if degraded {
                        outcome.degraded += 1;
                    }
                }
                Err(err) => {
                    warn!(update_id = post.update_id, error = %err, "failed to persist article");
                }
            }
        }

        info!(
            imported = outcome.imported,
            skipped = outcome.skipped,
            degraded = outcome.degraded,
            "news import run finished"
        );
        Ok(outcome)
    }

    /// Polls once and returns not-yet-imported posts for manual review, with
    /// their transient platform image links resolved.
    pub async fn list_candidates(&self) -> Result<Vec<ImportCandidate>, SuntradeError> {
        let posts = self.gateway.fetch_recent_updates(self.update_limit).await?;
        let mut candidates = Vec::new();

        for post in &posts {
            if self.content.article_exists(&post.update_id.to_string()).await? {
                continue;
            }

            let image_url = match post.photo_file_id() {
                Some(file_id) => match self.gateway.resolve_file_url(file_id).await {
                    Ok(url) => Some(url),
                    Err(err) => {
                        debug!(update_id = post.update_id, error = %err, "no preview link for candidate");
                        None
                    }
                },
                None => None,
            };

            candidates.push(ImportCandidate {
                update_id: post.update_id,
                text: post.text().to_string(),
                posted_at: post.posted_at,
                photo_file_id: post.photo_file_id().map(str::to_string),
                image_url,
            });
        }

        Ok(candidates)
    }

    /// Imports one specific post, typically picked from
    /// [`list_candidates`](Self::list_candidates). This is the explicit
    /// user-initiated path and performs no dedup check; the caller decided
    /// this post goes in.
    pub async fn import_single(&self, post: &ChannelPost) -> Result<NewsArticle, SuntradeError> {
        let (article, _) = self.article_from_post(post).await;
        self.content.insert_article(article.clone()).await?;
        Ok(article)
    }

    /// Imports a candidate picked from [`list_candidates`](Self::list_candidates).
    /// The candidate carries the photo file handle, so relocation runs without
    /// re-polling the gateway for the original post.
    pub async fn import_candidate(
        &self,
        candidate: &ImportCandidate,
    ) -> Result<NewsArticle, SuntradeError> {
        self.import_single(&candidate.to_post()).await
    }

    /// Derives the article record. The second return marks a degraded photo
    /// relocation.
    async fn article_from_post(&self, post: &ChannelPost) -> (NewsArticle, bool) {
        let mut degraded = false;
        let image_url = match post.photo_file_id() {
            Some(file_id) => match self.relocate_photo(file_id).await {
                Some(url) => url,
                None => {
                    degraded = true;
                    String::new()
                }
            },
            None => String::new(),
        };

        let article = NewsArticle {
            title: derive_title(post.text()),
            category: IMPORT_CATEGORY.to_string(),
            excerpt: post.text().to_string(),
            image_url,
            date: post.posted_at.format("%b %d, %Y").to_string().to_uppercase(),
            source_update_id: post.update_id.to_string(),
            created_at: Utc::now(),
        };
        (article, degraded)
    }

    /// Resolves the platform file link and re-uploads it to permanent
    /// hosting. Any failure along the way degrades to `None`.
    async fn relocate_photo(&self, file_id: &str) -> Option<String> {
        let transient = match self.gateway.resolve_file_url(file_id).await {
            Ok(url) => url,
            Err(err) => {
                warn!(file_id, error = %err, "could not resolve photo link, importing without image");
                return None;
            }
        };

        match self.images.upload_by_url(&transient).await {
            Ok(hosted) => Some(hosted),
            Err(err) => {
                warn!(file_id, error = %err, "photo relocation failed, importing without image");
                None
            }
        }
    }
}

/// First line of the post, cut at [`TITLE_MAX_CHARS`] characters.
fn derive_title(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    first_line.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use suntrade_core::types::PostContent;
    use suntrade_test_utils::{InMemoryContent, MockGateway, MockImageHost};

    fn text_post(update_id: i64, text: &str) -> ChannelPost {
        ChannelPost {
            update_id,
            posted_at: Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap(),
            content: PostContent::Text(text.to_string()),
        }
    }

    fn photo_post(update_id: i64, text: &str, file_id: &str) -> ChannelPost {
        ChannelPost {
            update_id,
            posted_at: Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap(),
            content: PostContent::Photo {
                text: text.to_string(),
                file_id: file_id.to_string(),
            },
        }
    }

    fn importer(
        gateway: Arc<MockGateway>,
        content: Arc<InMemoryContent>,
        images: Arc<MockImageHost>,
    ) -> NewsImporter {
        NewsImporter::new(gateway, content, images, 10)
    }

    #[test]
    fn title_is_first_line_capped_at_100_chars() {
        assert_eq!(derive_title("Solar sale!\nDetails below"), "Solar sale!");

        let long = "x".repeat(140);
        assert_eq!(derive_title(&long).chars().count(), 100);

        assert_eq!(derive_title(""), "");
    }

    #[tokio::test]
    async fn imports_text_post_with_derived_fields() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![text_post(500, "Big solar sale\nAll panels 20% off")]);
        let content = Arc::new(InMemoryContent::new());
        let images = Arc::new(MockImageHost::new());

        let outcome = importer(gateway, content.clone(), images)
            .import_new_messages()
            .await
            .unwrap();

        assert_eq!(outcome.imported, 1);
        let articles = content.articles();
        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article.title, "Big solar sale");
        assert_eq!(article.excerpt, "Big solar sale\nAll panels 20% off");
        assert_eq!(article.category, "TELEGRAM");
        assert_eq!(article.date, "MAR 05, 2026");
        assert_eq!(article.source_update_id, "500");
        assert_eq!(article.image_url, "");
    }

    #[tokio::test]
    async fn skips_already_imported_updates() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![text_post(500, "again"), text_post(501, "fresh")]);
        let content = Arc::new(InMemoryContent::new());
        content.seed_existing("500");
        let images = Arc::new(MockImageHost::new());

        let outcome = importer(gateway, content.clone(), images)
            .import_new_messages()
            .await
            .unwrap();

        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(content.articles()[0].source_update_id, "501");
    }

    #[tokio::test]
    async fn relocates_photo_to_permanent_hosting() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![photo_post(600, "New inverters", "file-abc")]);
        gateway.set_file_url("file-abc", "https://files.example/photos/abc.jpg");
        let content = Arc::new(InMemoryContent::new());
        let images = Arc::new(MockImageHost::new());

        let outcome = importer(gateway, content.clone(), images.clone())
            .import_new_messages()
            .await
            .unwrap();

        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.degraded, 0);
        let article = &content.articles()[0];
        assert!(article.image_url.starts_with("https://cdn.example/"));
        assert_eq!(
            images.uploads(),
            vec!["https://files.example/photos/abc.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_relocation_degrades_instead_of_failing() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![photo_post(601, "Broken image", "file-xyz")]);
        gateway.set_file_url("file-xyz", "https://files.example/photos/xyz.jpg");
        let content = Arc::new(InMemoryContent::new());
        let images = Arc::new(MockImageHost::new());
        images.fail_uploads();

        let outcome = importer(gateway, content.clone(), images)
            .import_new_messages()
            .await
            .unwrap();

        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.degraded, 1);
        assert_eq!(content.articles()[0].image_url, "");
    }

    #[tokio::test]
    async fn unresolvable_file_handle_also_degrades() {
        let gateway = Arc::new(MockGateway::new());
        // No file URL registered for this handle, resolution returns NotFound.
        gateway.queue_posts(vec![photo_post(602, "Missing file", "file-gone")]);
        let content = Arc::new(InMemoryContent::new());
        let images = Arc::new(MockImageHost::new());

        let outcome = importer(gateway, content.clone(), images)
            .import_new_messages()
            .await
            .unwrap();

        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.degraded, 1);
        assert_eq!(content.articles()[0].image_url, "");
    }

    #[tokio::test]
    async fn candidates_exclude_imported_and_carry_preview_links() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![
            text_post(700, "old news"),
            photo_post(701, "with photo", "file-abc"),
            text_post(702, "plain"),
        ]);
        gateway.set_file_url("file-abc", "https://files.example/photos/abc.jpg");
        let content = Arc::new(InMemoryContent::new());
        content.seed_existing("700");
        let images = Arc::new(MockImageHost::new());

        let candidates = importer(gateway, content, images)
            .list_candidates()
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].update_id, 701);
        assert_eq!(candidates[0].photo_file_id.as_deref(), Some("file-abc"));
        assert_eq!(
            candidates[0].image_url.as_deref(),
            Some("https://files.example/photos/abc.jpg")
        );
        assert_eq!(candidates[1].update_id, 702);
        assert!(candidates[1].photo_file_id.is_none());
        assert!(candidates[1].image_url.is_none());
    }

    #[tokio::test]
    async fn candidate_round_trip_relocates_its_photo() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![photo_post(710, "Pick me", "file-abc")]);
        gateway.set_file_url("file-abc", "https://files.example/photos/abc.jpg");
        let content = Arc::new(InMemoryContent::new());
        let images = Arc::new(MockImageHost::new());
        let importer = importer(gateway, content.clone(), images.clone());

        let candidates = importer.list_candidates().await.unwrap();
        let article = importer.import_candidate(&candidates[0]).await.unwrap();

        assert_eq!(article.source_update_id, "710");
        assert!(article.image_url.starts_with("https://cdn.example/"));
        assert_eq!(
            images.uploads(),
            vec!["https://files.example/photos/abc.jpg".to_string()]
        );
        assert_eq!(content.articles().len(), 1);
    }

    #[tokio::test]
    async fn repeated_poll_runs_import_each_update_once() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_posts(vec![text_post(800, "sticky update")]);
        let content = Arc::new(InMemoryContent::new());
        let images = Arc::new(MockImageHost::new());
        let importer = importer(gateway, content.clone(), images);

        let first = importer.import_new_messages().await.unwrap();
        assert_eq!(first.imported, 1);

        // The gateway redelivers the same update on the next poll.
        let second = importer.import_new_messages().await.unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(content.articles().len(), 1);
    }

    #[tokio::test]
    async fn import_single_bypasses_the_dedup_check() {
        let gateway = Arc::new(MockGateway::new());
        let content = Arc::new(InMemoryContent::new());
        content.seed_existing("801");
        let images = Arc::new(MockImageHost::new());
        let importer = importer(gateway, content.clone(), images);

        let article = importer
            .import_single(&text_post(801, "explicitly chosen"))
            .await
            .unwrap();
        assert_eq!(article.source_update_id, "801");
        assert_eq!(content.articles().len(), 1);
    }
}
