// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw HTTP transport against the Bot API.
//!
//! Implements [`MessageGateway`] with plain `POST /bot<token>/<method>`
//! calls. Sends are fire-and-forget: a success status means the platform
//! accepted the message. There is no retry, no backoff, and no timeout at
//! this layer; callers wrap their own deadline if they need one.
//!
//! `get_updates` deliberately does not advance an offset between polls,
//! matching the back-office's manual-review workflow: the same updates can
//! be redelivered on every poll and the importer deduplicates by update id.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use suntrade_config::TelegramConfig;
use suntrade_core::error::SuntradeError;
use suntrade_core::traits::MessageGateway;
use suntrade_core::types::{ChannelPost, ChatId, InlineKeyboard, ParseMode};

use crate::wire::{
    ApiResponse, FileInfo, InlineKeyboardMarkup, InputMediaPhoto, SendMediaGroupRequest,
    SendMessageRequest, SendPhotoRequest, Update, normalize_update,
};

/// Maximum items the platform accepts in one media group.
pub const MEDIA_GROUP_LIMIT: usize = 10;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const ALLOWED_UPDATES: &str = r#"["message","channel_post"]"#;

/// Bot API client bound to one bot token.
pub struct BotClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl BotClient {
    /// Creates a client for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Creates a client from the loaded configuration.
    ///
    /// Fails with a config error when no bot token is set.
    pub fn from_config(config: &TelegramConfig) -> Result<Self, SuntradeError> {
        let token = config
            .bot_token
            .as_deref()
            .ok_or_else(|| SuntradeError::Config("telegram.bot_token is required".into()))?;
        Ok(Self::new(token))
    }

    /// Overrides the API base URL. Test hook for pointing at a local server.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// POSTs a JSON body and maps a non-success HTTP status to
    /// [`SuntradeError::Transport`]. The response body is not interpreted.
    async fn post(&self, method: &str, body: &impl Serialize) -> Result<(), SuntradeError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| SuntradeError::network(format!("{method} request failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SuntradeError::Transport {
                status: status.as_u16(),
                message,
            });
        }

        debug!(method, "bot API call accepted");
        Ok(())
    }

    /// GETs a method with query parameters and decodes the `{ok, result}`
    /// envelope. An `ok: false` envelope with a success HTTP status is still
    /// a transport failure.
    async fn get_result<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> Result<T, SuntradeError> {
        let response = self
            .http
            .get(self.method_url(method))
            .query(query)
            .send()
            .await
            .map_err(|e| SuntradeError::network(format!("{method} request failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SuntradeError::Transport {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| SuntradeError::network(format!("{method} returned invalid JSON"), e))?;

        if !envelope.ok {
            return Err(SuntradeError::Transport {
                status: status.as_u16(),
                message: envelope
                    .description
                    .unwrap_or_else(|| format!("{method} reported ok=false")),
            });
        }

        envelope.result.ok_or_else(|| SuntradeError::Transport {
            status: status.as_u16(),
            message: format!("{method} returned ok=true without a result"),
        })
    }
}

#[async_trait]
impl MessageGateway for BotClient {
    async fn send_text(
        &self,
        chat: &ChatId,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), SuntradeError> {
        let body = SendMessageRequest {
            chat_id: chat.0.clone(),
            text: text.to_string(),
            parse_mode: mode.as_str(),
            reply_markup: None,
        };
        self.post("sendMessage", &body).await
    }

    async fn send_text_with_keyboard(
        &self,
        chat: &ChatId,
        text: &str,
        mode: ParseMode,
        keyboard: &InlineKeyboard,
    ) -> Result<(), SuntradeError> {
        let body = SendMessageRequest {
            chat_id: chat.0.clone(),
            text: text.to_string(),
            parse_mode: mode.as_str(),
            reply_markup: Some(InlineKeyboardMarkup::from(keyboard)),
        };
        self.post("sendMessage", &body).await
    }

    async fn send_photo(
        &self,
        chat: &ChatId,
        photo_url: &str,
        caption: &str,
        mode: ParseMode,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), SuntradeError> {
        let body = SendPhotoRequest {
            chat_id: chat.0.clone(),
            photo: photo_url.to_string(),
            caption: caption.to_string(),
            parse_mode: mode.as_str(),
            reply_markup: keyboard.map(InlineKeyboardMarkup::from),
        };
        self.post("sendPhoto", &body).await
    }

    async fn send_media_group(
        &self,
        chat: &ChatId,
        image_urls: &[String],
        caption: &str,
        mode: ParseMode,
    ) -> Result<(), SuntradeError> {
        if image_urls.is_empty() {
            return Err(SuntradeError::Internal(
                "media group requires at least one image".into(),
            ));
        }

        if image_urls.len() > MEDIA_GROUP_LIMIT {
            warn!(
                requested = image_urls.len(),
                limit = MEDIA_GROUP_LIMIT,
                "truncating media group to platform limit"
            );
        }

        let media = image_urls
            .iter()
            .take(MEDIA_GROUP_LIMIT)
            .enumerate()
            .map(|(i, url)| InputMediaPhoto {
                kind: "photo",
                media: url.clone(),
                caption: (i == 0).then(|| caption.to_string()),
                parse_mode: (i == 0).then(|| mode.as_str()),
            })
            .collect();

        let body = SendMediaGroupRequest {
            chat_id: chat.0.clone(),
            media,
        };
        self.post("sendMediaGroup", &body).await
    }

    async fn fetch_recent_updates(
        &self,
        limit: u32,
    ) -> Result<Vec<ChannelPost>, SuntradeError> {
        let updates: Vec<Update> = self
            .get_result(
                "getUpdates",
                &[
                    ("limit", limit.to_string()),
                    ("allowed_updates", ALLOWED_UPDATES.to_string()),
                ],
            )
            .await?;

        let posts: Vec<ChannelPost> = updates.iter().filter_map(normalize_update).collect();
        debug!(
            received = updates.len(),
            usable = posts.len(),
            "polled updates"
        );
        Ok(posts)
    }

    async fn resolve_file_url(&self, file_id: &str) -> Result<String, SuntradeError> {
        let info: FileInfo = match self
            .get_result("getFile", &[("file_id", file_id.to_string())])
            .await
        {
            Ok(info) => info,
            // The platform answers ok=false (or HTTP 400) for unknown file
            // handles; surface that as the entity being absent.
            Err(SuntradeError::Transport { .. }) => {
                return Err(SuntradeError::NotFound {
                    kind: "file",
                    id: file_id.to_string(),
                });
            }
            Err(other) => return Err(other),
        };

        let path = info.file_path.ok_or(SuntradeError::NotFound {
            kind: "file",
            id: file_id.to_string(),
        })?;

        Ok(format!("{}/file/bot{}/{}", self.api_base, self.token, path))
    }
}
