// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording mock for the message gateway and a scripted image host.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use suntrade_core::error::SuntradeError;
use suntrade_core::traits::{ImageHost, MessageGateway};
use suntrade_core::types::{ChannelPost, ChatId, InlineKeyboard, ParseMode};

/// One message the mock gateway accepted, in send order.
#[derive(Debug, Clone, PartialEq)]
pub enum SentMessage {
    Text {
        chat: ChatId,
        text: String,
        mode: ParseMode,
        keyboard: Option<InlineKeyboard>,
    },
    Photo {
        chat: ChatId,
        photo_url: String,
        caption: String,
        keyboard: Option<InlineKeyboard>,
    },
    MediaGroup {
        chat: ChatId,
        image_urls: Vec<String>,
        caption: String,
    },
}

/// In-memory [`MessageGateway`]: records every send, serves queued posts on
/// poll, and resolves file handles from a scripted map. Sends to a chat
/// marked as failing return a transport error without being recorded.
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<SentMessage>>,
    queued_posts: Mutex<Vec<ChannelPost>>,
    file_urls: Mutex<HashMap<String, String>>,
    failing_chats: Mutex<HashSet<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues posts for the next `fetch_recent_updates` calls. Polls do not
    /// drain the queue, mirroring redelivery on the real platform.
    pub fn queue_posts(&self, posts: Vec<ChannelPost>) {
        self.queued_posts.lock().unwrap().extend(posts);
    }

    /// Scripts the download URL returned for a file handle.
    pub fn set_file_url(&self, file_id: &str, url: &str) {
        self.file_urls
            .lock()
            .unwrap()
            .insert(file_id.to_string(), url.to_string());
    }

    /// Makes every send to the given chat fail with a transport error.
    pub fn fail_sends_to(&self, chat: &ChatId) {
        self.failing_chats.lock().unwrap().insert(chat.0.clone());
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    fn accept(&self, chat: &ChatId, message: SentMessage) -> Result<(), SuntradeError> {
        if self.failing_chats.lock().unwrap().contains(&chat.0) {
            return Err(SuntradeError::Transport {
                status: 500,
                message: format!("scripted failure for chat {}", chat.0),
            });
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

#[async_trait]
impl MessageGateway for MockGateway {
    async fn send_text(
        &self,
        chat: &ChatId,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), SuntradeError> {
        self.accept(
            chat,
            SentMessage::Text {
                chat: chat.clone(),
                text: text.to_string(),
                mode,
                keyboard: None,
            },
        )
    }

    async fn send_text_with_keyboard(
        &self,
        chat: &ChatId,
        text: &str,
        mode: ParseMode,
        keyboard: &InlineKeyboard,
    ) -> Result<(), SuntradeError> {
        self.accept(
            chat,
            SentMessage::Text {
                chat: chat.clone(),
                text: text.to_string(),
                mode,
                keyboard: Some(keyboard.clone()),
            },
        )
    }

    async fn send_photo(
        &self,
        chat: &ChatId,
        photo_url: &str,
        caption: &str,
        _mode: ParseMode,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), SuntradeError> {
        self.accept(
            chat,
            SentMessage::Photo {
                chat: chat.clone(),
                photo_url: photo_url.to_string(),
                caption: caption.to_string(),
                keyboard: keyboard.cloned(),
            },
        )
    }

    async fn send_media_group(
        &self,
        chat: &ChatId,
        image_urls: &[String],
        caption: &str,
        _mode: ParseMode,
    ) -> Result<(), SuntradeError> {
        self.accept(
            chat,
            SentMessage::MediaGroup {
                chat: chat.clone(),
                image_urls: image_urls.to_vec(),
                caption: caption.to_string(),
            },
        )
    }

    async fn fetch_recent_updates(
        &self,
        limit: u32,
    ) -> Result<Vec<ChannelPost>, SuntradeError> {
        let posts = self.queued_posts.lock().unwrap();
        Ok(posts.iter().take(limit as usize).cloned().collect())
    }

    async fn resolve_file_url(&self, file_id: &str) -> Result<String, SuntradeError> {
        self.file_urls
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| SuntradeError::NotFound {
                kind: "file",
                id: file_id.to_string(),
            })
    }
}

/// Scripted [`ImageHost`]: records upload sources and returns deterministic
/// hosted URLs, or fails every upload when told to.
#[derive(Default)]
pub struct MockImageHost {
    uploads: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MockImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent upload fail.
    pub fn fail_uploads(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Source URLs uploaded so far, in order.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload_by_url(&self, source_url: &str) -> Result<String, SuntradeError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SuntradeError::ImageHost {
                message: "scripted upload failure".to_string(),
            });
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(source_url.to_string());
        Ok(format!("https://cdn.example/img{}.jpg", uploads.len()))
    }
}
