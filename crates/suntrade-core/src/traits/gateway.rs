// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message gateway trait: the bot messaging platform seam.

use async_trait::async_trait;

use crate::error::SuntradeError;
use crate::types::{ChannelPost, ChatId, InlineKeyboard, ParseMode};

/// Low-level send and poll primitives against the bot messaging platform.
///
/// All sends are fire-and-forget: success means the platform accepted the
/// message, nothing more. No retry or backoff lives behind this trait; a
/// caller wanting resilience wraps the call site.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Sends a plain formatted message.
    async fn send_text(
        &self,
        chat: &ChatId,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), SuntradeError>;

    /// Sends a formatted message with an inline keyboard attached.
    async fn send_text_with_keyboard(
        &self,
        chat: &ChatId,
        text: &str,
        mode: ParseMode,
        keyboard: &InlineKeyboard,
    ) -> Result<(), SuntradeError>;

    /// Sends a photo by URL with a formatted caption and optional keyboard.
    async fn send_photo(
        &self,
        chat: &ChatId,
        photo_url: &str,
        caption: &str,
        mode: ParseMode,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), SuntradeError>;

    /// Sends up to ten images as a single media group; only the first item
    /// carries the caption. Implementations truncate longer lists to the
    /// platform limit.
    async fn send_media_group(
        &self,
        chat: &ChatId,
        image_urls: &[String],
        caption: &str,
        mode: ParseMode,
    ) -> Result<(), SuntradeError>;

    /// Polls the platform once for recent updates, normalized into channel
    /// posts. No offset is advanced between polls, so the same updates can
    /// be returned again; callers deduplicate by `update_id`.
    async fn fetch_recent_updates(&self, limit: u32)
    -> Result<Vec<ChannelPost>, SuntradeError>;

    /// Resolves a platform file handle into a short-lived download URL.
    /// Fails with [`SuntradeError::NotFound`] when the platform reports no
    /// such file.
    async fn resolve_file_url(&self, file_id: &str) -> Result<String, SuntradeError>;
}
