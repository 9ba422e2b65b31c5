// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records and common types shared across the Suntrade workspace.
//!
//! These mirror the documents held by the external store collaborator
//! (shops, categories, products, orders, news articles) plus the normalized
//! shape of inbound channel posts. The core reads catalog records and writes
//! orders and imported articles; it never owns authoritative state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SuntradeError;

/// Opaque identifier of a shop document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopId(pub String);

/// Opaque identifier of a category document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

/// Opaque identifier of a product document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// Opaque identifier of an order document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// A messaging-platform destination: numeric chat/group id or `@channel` name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub String);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text formatting mode requested for an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Html,
    Markdown,
}

impl ParseMode {
    /// The platform's wire name for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Markdown => "Markdown",
        }
    }
}

// --- Catalog records (read-only to the core) ---

/// A shop storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    pub owner_id: String,
}

/// A product category within a shop, ordered for menu display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub order: i32,
    pub shop_id: ShopId,
}

/// A sellable product. `category` is a soft reference by identifier; the
/// store does not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_active: bool,
    pub shop_id: ShopId,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub low_stock_alert: Option<i64>,
}

impl Product {
    /// Orderable: listed and in stock. Menus filter on this.
    pub fn is_available(&self) -> bool {
        self.is_active && self.stock > 0
    }
}

// --- Orders ---

/// Lifecycle status of an order. Transitions are decided by an external
/// approval actor; the core only announces them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// How the customer receives the order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
}

/// Where the order originated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    Telegram,
    Web,
}

/// One order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// An order awaiting persistence; the store assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub shop_id: ShopId,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub telegram_id: Option<String>,
    #[serde(default)]
    pub telegram_username: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub payment_preference: String,
    #[serde(default)]
    pub customer_notes: Option<String>,
    /// Contact tag shown to staff, e.g. `TG-<telegramId>` for chat orders.
    pub contact_tag: String,
    pub source: OrderSource,
}

/// A persisted order as read back from the store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub shop_id: ShopId,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub telegram_id: Option<String>,
    #[serde(default)]
    pub telegram_username: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub payment_preference: String,
    #[serde(default)]
    pub customer_notes: Option<String>,
    pub contact_tag: String,
    pub status: OrderStatus,
    pub payment_status: String,
    pub source: OrderSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds a persisted view of a draft once the store assigned its id.
    /// New orders start pending on both order and payment status.
    pub fn from_draft(id: OrderId, draft: OrderDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            shop_id: draft.shop_id,
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            telegram_id: draft.telegram_id,
            telegram_username: draft.telegram_username,
            items: draft.items,
            total: draft.total,
            delivery_method: draft.delivery_method,
            delivery_address: draft.delivery_address,
            payment_preference: draft.payment_preference,
            customer_notes: draft.customer_notes,
            contact_tag: draft.contact_tag,
            status: OrderStatus::Pending,
            payment_status: "pending".to_string(),
            source: draft.source,
            created_at: now,
            updated_at: now,
        }
    }
}

// --- Imported content ---

/// An article derived from an inbound channel post. At most one exists per
/// distinct `source_update_id`; the importer checks before writing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub category: String,
    pub excerpt: String,
    /// Permanent, relocated image URL. Empty when relocation failed or the
    /// post had no photo (degrade-not-fail).
    pub image_url: String,
    /// Display date, `MMM DD, YYYY` uppercased.
    pub date: String,
    pub source_update_id: String,
    pub created_at: DateTime<Utc>,
}

/// Normalized inbound channel post, produced at the transport boundary from
/// the platform's `message` / `channel_post` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPost {
    /// The platform's update identifier; the deduplication key.
    pub update_id: i64,
    pub posted_at: DateTime<Utc>,
    pub content: PostContent,
}

/// Tagged content union: posts carry either text alone or text with a photo.
/// Updates with neither text nor caption are dropped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum PostContent {
    Text(String),
    Photo {
        text: String,
        /// Platform file handle of the highest-resolution photo variant.
        file_id: String,
    },
}

impl ChannelPost {
    pub fn text(&self) -> &str {
        match &self.content {
            PostContent::Text(t) => t,
            PostContent::Photo { text, .. } => text,
        }
    }

    pub fn photo_file_id(&self) -> Option<&str> {
        match &self.content {
            PostContent::Text(_) => None,
            PostContent::Photo { file_id, .. } => Some(file_id),
        }
    }
}

/// A fetched post prepared for the back-office review list, with a transient
/// platform file link resolved (not yet relocated to permanent storage).
/// Carries everything needed to import the post later without re-polling.
#[derive(Debug, Clone)]
pub struct ImportCandidate {
    pub update_id: i64,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    /// Platform file handle of the post's photo; relocation runs from this
    /// when the candidate is imported.
    pub photo_file_id: Option<String>,
    /// Short-lived platform download URL for previewing the photo.
    pub image_url: Option<String>,
}

impl ImportCandidate {
    /// Rebuilds the normalized post this candidate was derived from.
    pub fn to_post(&self) -> ChannelPost {
        let content = match &self.photo_file_id {
            Some(file_id) => PostContent::Photo {
                text: self.text.clone(),
                file_id: file_id.clone(),
            },
            None => PostContent::Text(self.text.clone()),
        };
        ChannelPost {
            update_id: self.update_id,
            posted_at: self.posted_at,
            content,
        }
    }
}

// --- Keyboards ---

/// An inline keyboard: rows of buttons attached to an outbound message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, buttons: Vec<InlineButton>) -> Self {
        self.rows.push(buttons);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One inline button.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineButton {
    pub text: String,
    pub action: ButtonAction,
}

/// What pressing a button does: return a callback payload to the bot, or
/// open a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

impl InlineButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

// --- Fan-out ---

/// Outcome of a multi-destination notification. Destinations are independent
/// and best-effort: one failure never aborts the siblings, it is recorded
/// here instead.
#[derive(Debug, Default)]
pub struct FanoutReport {
    pub delivered: Vec<ChatId>,
    pub failed: Vec<(ChatId, SuntradeError)>,
}

impl FanoutReport {
    pub fn record(&mut self, chat: ChatId, result: Result<(), SuntradeError>) {
        match result {
            Ok(()) => self.delivered.push(chat),
            Err(err) => self.failed.push((chat, err)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn order_status_round_trips_lowercase() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let s = status.to_string();
            assert_eq!(s, s.to_lowercase());
            assert_eq!(OrderStatus::from_str(&s).unwrap(), status);
        }
    }

    #[test]
    fn product_availability_requires_active_and_stock() {
        let mut product = Product {
            id: ProductId("p1".into()),
            name: "Panel".into(),
            description: "300W".into(),
            price: 120.0,
            stock: 3,
            category: "panels".into(),
            subcategory: None,
            images: vec![],
            is_active: true,
            shop_id: ShopId("s1".into()),
            sku: None,
            low_stock_alert: None,
        };
        assert!(product.is_available());

        product.stock = 0;
        assert!(!product.is_available());

        product.stock = 3;
        product.is_active = false;
        assert!(!product.is_available());
    }

    #[test]
    fn channel_post_accessors() {
        let post = ChannelPost {
            update_id: 7,
            posted_at: DateTime::UNIX_EPOCH,
            content: PostContent::Photo {
                text: "caption".into(),
                file_id: "f1".into(),
            },
        };
        assert_eq!(post.text(), "caption");
        assert_eq!(post.photo_file_id(), Some("f1"));

        let text_only = ChannelPost {
            update_id: 8,
            posted_at: DateTime::UNIX_EPOCH,
            content: PostContent::Text("hello".into()),
        };
        assert_eq!(text_only.text(), "hello");
        assert!(text_only.photo_file_id().is_none());
    }

    #[test]
    fn order_from_draft_starts_pending() {
        let draft = OrderDraft {
            shop_id: ShopId("s1".into()),
            customer_id: "alice".into(),
            customer_name: "Alice".into(),
            telegram_id: Some("42".into()),
            telegram_username: Some("alice".into()),
            items: vec![],
            total: 0.0,
            delivery_method: DeliveryMethod::Pickup,
            delivery_address: None,
            payment_preference: "cash".into(),
            customer_notes: None,
            contact_tag: "TG-42".into(),
            source: OrderSource::Telegram,
        };
        let order = Order::from_draft(OrderId("o1".into()), draft, Utc::now());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, "pending");
        assert_eq!(order.source, OrderSource::Telegram);
    }

    #[test]
    fn fanout_report_records_both_outcomes() {
        let mut report = FanoutReport::default();
        report.record(ChatId("-100".into()), Ok(()));
        report.record(
            ChatId("-200".into()),
            Err(SuntradeError::Transport {
                status: 500,
                message: "boom".into(),
            }),
        );
        assert_eq!(report.delivered.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_complete());
    }
}
