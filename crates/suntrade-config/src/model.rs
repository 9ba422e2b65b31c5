// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. The `[telegram]` section is the bot credential
//! record: secret token plus the destination channels, created and edited by
//! the back-office UI and read-only to this service.

use serde::{Deserialize, Serialize};

/// Top-level Suntrade configuration.
///
/// Loaded from TOML files with environment variable overrides. All sections
/// are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SuntradeConfig {
    /// Bot credential and destination channels.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Image hosting collaborator settings.
    #[serde(default)]
    pub image_host: ImageHostConfig,

    /// Public site links embedded in outbound messages.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Bot token and destination channel identifiers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. `None` disables the integration.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Shop staff group: new-order and low-stock alerts, promotions.
    #[serde(default)]
    pub shop_group_id: Option<String>,

    /// Cashier group: payment prompts and payment proof.
    #[serde(default)]
    pub cashier_group_id: Option<String>,

    /// Delivery group: approved delivery orders.
    #[serde(default)]
    pub delivery_group_id: Option<String>,

    /// News channel: cross-posted articles and the import source.
    #[serde(default)]
    pub news_channel_id: Option<String>,

    /// Import new channel posts automatically on the poll interval.
    #[serde(default)]
    pub auto_sync: bool,

    /// Seconds between import polls when auto sync is on. The interval is
    /// caller-managed; overlapping polls are not prevented here.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum updates requested per poll.
    #[serde(default = "default_update_limit")]
    pub update_limit: u32,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            shop_group_id: None,
            cashier_group_id: None,
            delivery_group_id: None,
            news_channel_id: None,
            auto_sync: false,
            poll_interval_secs: default_poll_interval_secs(),
            update_limit: default_update_limit(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_update_limit() -> u32 {
    10
}

/// Image hosting collaborator (ImgBB-style upload-by-URL endpoint).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImageHostConfig {
    /// API key for the upload endpoint. `None` disables relocation; imports
    /// then proceed with empty image fields.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upload endpoint URL.
    #[serde(default = "default_upload_endpoint")]
    pub endpoint: String,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_upload_endpoint(),
        }
    }
}

fn default_upload_endpoint() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

/// Public site links referenced from promotional messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Storefront URL for "order now" links.
    #[serde(default = "default_shop_url")]
    pub shop_url: String,

    /// Blog URL appended to news posts.
    #[serde(default = "default_blog_url")]
    pub blog_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            shop_url: default_shop_url(),
            blog_url: default_blog_url(),
        }
    }
}

fn default_shop_url() -> String {
    "https://ztabortrading.com".to_string()
}

fn default_blog_url() -> String {
    "https://ztabortrading.com/blog".to_string()
}
