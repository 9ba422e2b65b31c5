// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Promotion broadcasts: featured products and news cross-posts.
//!
//! Messages are HTML-formatted and image-led: one image becomes a photo
//! with caption, several become a media group with the caption on the first
//! item, none falls back to plain text.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use suntrade_config::SiteConfig;
use suntrade_core::error::SuntradeError;
use suntrade_core::traits::MessageGateway;
use suntrade_core::types::{ChatId, NewsArticle, ParseMode, Product};

/// Optional dressing for an enhanced product promotion.
#[derive(Debug, Clone, Default)]
pub struct Promotion {
    /// Headline; defaults to "🔥 Featured Product".
    pub title: Option<String>,
    /// Body override; defaults to the product description.
    pub custom_message: Option<String>,
    /// Extra images appended after the product's own.
    pub extra_images: Vec<String>,
    /// Percentage off; a struck original price is shown when positive.
    pub discount_percentage: Option<f64>,
    pub valid_until: Option<DateTime<Utc>>,
    /// Extra hashtags appended after the category tags.
    pub tags: Vec<String>,
}

/// Broadcasts promotional content to a channel or group.
pub struct Promoter {
    gateway: Arc<dyn MessageGateway>,
    site: SiteConfig,
}

impl Promoter {
    pub fn new(gateway: Arc<dyn MessageGateway>, site: SiteConfig) -> Self {
        Self { gateway, site }
    }

    /// Posts a plain featured-product message, with the first product image
    /// when one exists.
    pub async fn promote_product(
        &self,
        chat: &ChatId,
        product: &Product,
    ) -> Result<(), SuntradeError> {
        let tags = category_tags(product, &[]);
        let text = format!(
            "🔥 <b>Featured Product</b>\n\n🛍️ <b>{}</b>\n\n{}\n\n💰 <b>Price:</b> ${:.2}\n📦 <b>Available:</b> {} in stock\n{}🛒 <b>Order Now:</b> <a href=\"{}\">Visit Our Shop</a>\n\n📱 <b>Quick Order:</b> Reply with \"ORDER {}\" to place an order\n\n{tags}\n\n<i>🚀 Don't miss out on this amazing product!</i>",
            product.name,
            product.description,
            product.price,
            product.stock,
            sku_line(product),
            self.site.shop_url,
            product.name,
        );

        match product.images.first() {
            Some(image) => {
                self.gateway
                    .send_photo(chat, image, &text, ParseMode::Html, None)
                    .await
            }
            None => self.gateway.send_text(chat, &text, ParseMode::Html).await,
        }
    }

    /// Posts a dressed-up promotion: optional discount pricing, validity
    /// window, custom copy, and extra images merged after the product's own.
    pub async fn promote_product_enhanced(
        &self,
        chat: &ChatId,
        product: &Product,
        promotion: &Promotion,
    ) -> Result<(), SuntradeError> {
        let text = self.enhanced_message(product, promotion);

        let mut images = product.images.clone();
        images.extend(promotion.extra_images.iter().cloned());

        match images.len() {
            0 => self.gateway.send_text(chat, &text, ParseMode::Html).await,
            1 => {
                self.gateway
                    .send_photo(chat, &images[0], &text, ParseMode::Html, None)
                    .await
            }
            _ => {
                self.gateway
                    .send_media_group(chat, &images, &text, ParseMode::Html)
                    .await
            }
        }
    }

    /// Cross-posts an imported article to the news channel with a link back
    /// to the blog.
    pub async fn send_news_post(
        &self,
        chat: &ChatId,
        article: &NewsArticle,
    ) -> Result<(), SuntradeError> {
        let category_tag = article.category.split_whitespace().collect::<String>();
        let text = format!(
            "<b>📰 {}</b>\n\n{}\n\n🏷️ Category: #{category_tag}\n🔗 <a href=\"{}\">Read more on our blog</a>",
            article.title, article.excerpt, self.site.blog_url,
        );

        if article.image_url.is_empty() {
            self.gateway.send_text(chat, &text, ParseMode::Html).await
        } else {
            self.gateway
                .send_photo(chat, &article.image_url, &text, ParseMode::Html, None)
                .await
        }
    }

    fn enhanced_message(&self, product: &Product, promotion: &Promotion) -> String {
        let title = promotion
            .title
            .as_deref()
            .unwrap_or("🔥 Featured Product");
        let body = promotion
            .custom_message
            .as_deref()
            .unwrap_or(&product.description);

        let pct = promotion.discount_percentage.filter(|p| *p > 0.0);
        let discount_banner = match pct {
            Some(p) => format!("\n💥 <b>{p:.0}% OFF!</b>"),
            None => String::new(),
        };
        let price = match pct {
            Some(p) => format!(
                "<s>${:.2}</s> <b>${:.2}</b>",
                product.price,
                product.price * (1.0 - p / 100.0)
            ),
            None => format!("<b>${:.2}</b>", product.price),
        };
        let valid_until = match &promotion.valid_until {
            Some(until) => format!("\n⏰ <b>Valid until:</b> {}", until.format("%Y-%m-%d")),
            None => String::new(),
        };
        let closer = if pct.is_some() {
            "Limited time discount"
        } else {
            "Don't miss out on this amazing product"
        };

        format!(
            "{title}{discount_banner}\n\n🛍️ <b>{}</b>\n\n{body}\n\n💰 <b>Price:</b> {price}\n📦 <b>Available:</b> {} in stock\n{}{valid_until}\n\n🛒 <b>Order Now:</b> <a href=\"{}\">Visit Our Shop</a>\n\n📱 <b>Quick Order:</b> Reply with \"ORDER {}\" to place an order\n\n{}\n\n<i>🚀 {closer}!</i>",
            product.name,
            product.stock,
            sku_line(product),
            self.site.shop_url,
            product.name,
            category_tags(product, &promotion.tags),
        )
    }
}

fn sku_line(product: &Product) -> String {
    match &product.sku {
        Some(sku) => format!("🏷️ <b>SKU:</b> {sku}\n"),
        None => String::new(),
    }
}

/// Lowercased, whitespace-stripped hashtags for category, subcategory, and
/// any custom tags.
fn category_tags(product: &Product, extra: &[String]) -> String {
    let mut tags = Vec::new();
    if !product.category.is_empty() {
        tags.push(hashtag(&product.category));
    }
    if let Some(sub) = &product.subcategory {
        tags.push(hashtag(sub));
    }
    tags.extend(extra.iter().cloned());
    tags.join(" ")
}

fn hashtag(name: &str) -> String {
    let compact: String = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .concat();
    format!("#{compact}")
}
