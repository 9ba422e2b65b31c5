// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde shapes for the Bot HTTP API and normalization into core types.
//!
//! Inbound updates arrive as an envelope holding either `message` or
//! `channel_post` with optional text/caption/photo fields. They are
//! normalized into [`ChannelPost`] immediately at this boundary so the rest
//! of the system never branches on the platform's dynamic shape.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use suntrade_core::types::{ButtonAction, ChannelPost, InlineKeyboard, PostContent};

/// The platform's uniform response envelope: `{ok, result}` or
/// `{ok: false, description}`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One inbound event from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub channel_post: Option<IncomingMessage>,
}

/// The inner message of an update. Text posts carry `text`; photo posts
/// carry `caption` plus a `photo` array of variants by increasing resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Epoch seconds.
    pub date: i64,
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
}

/// One resolution variant of a photo.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// `getFile` result; `file_path` joins the file download base URL.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Normalizes one update into a [`ChannelPost`].
///
/// Prefers `channel_post` over `message`. Returns `None` when the update
/// carries neither, or when it has no text and no caption. The photo file
/// handle, if any, is the last array element: the highest-resolution variant.
pub fn normalize_update(update: &Update) -> Option<ChannelPost> {
    let msg = update.channel_post.as_ref().or(update.message.as_ref())?;

    let text = msg
        .text
        .as_deref()
        .or(msg.caption.as_deref())
        .filter(|t| !t.is_empty())?
        .to_string();

    let posted_at =
        DateTime::from_timestamp(msg.date, 0).unwrap_or(chrono::DateTime::UNIX_EPOCH);

    let content = match msg.photo.as_ref().and_then(|p| p.last()) {
        Some(largest) => PostContent::Photo {
            text,
            file_id: largest.file_id.clone(),
        },
        None => PostContent::Text(text),
    };

    Some(ChannelPost {
        update_id: update.update_id,
        posted_at,
        content,
    })
}

// --- Outbound request bodies ---

#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct SendPhotoRequest {
    pub chat_id: String,
    pub photo: String,
    pub caption: String,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct SendMediaGroupRequest {
    pub chat_id: String,
    pub media: Vec<InputMediaPhoto>,
}

/// One media group item. Only the first carries the caption, per the
/// platform's constraint.
#[derive(Debug, Serialize)]
pub struct InputMediaPhoto {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

/// Wire form of an inline keyboard.
#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&InlineKeyboard> for InlineKeyboardMarkup {
    fn from(keyboard: &InlineKeyboard) -> Self {
        let inline_keyboard = keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| match &button.action {
                        ButtonAction::Callback(data) => InlineKeyboardButton {
                            text: button.text.clone(),
                            callback_data: Some(data.clone()),
                            url: None,
                        },
                        ButtonAction::Url(url) => InlineKeyboardButton {
                            text: button.text.clone(),
                            callback_data: None,
                            url: Some(url.clone()),
                        },
                    })
                    .collect()
            })
            .collect();
        Self { inline_keyboard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suntrade_core::types::InlineButton;

    fn update_from_json(json: serde_json::Value) -> Update {
        serde_json::from_value(json).expect("failed to deserialize update fixture")
    }

    #[test]
    fn normalizes_text_message() {
        let update = update_from_json(serde_json::json!({
            "update_id": 100,
            "message": { "text": "hello", "date": 1700000000i64 }
        }));

        let post = normalize_update(&update).expect("should normalize");
        assert_eq!(post.update_id, 100);
        assert_eq!(post.content, PostContent::Text("hello".into()));
        assert_eq!(post.posted_at.timestamp(), 1700000000);
    }

    #[test]
    fn prefers_channel_post_over_message() {
        let update = update_from_json(serde_json::json!({
            "update_id": 101,
            "message": { "text": "from message", "date": 1700000000i64 },
            "channel_post": { "text": "from channel", "date": 1700000000i64 }
        }));

        let post = normalize_update(&update).expect("should normalize");
        assert_eq!(post.text(), "from channel");
    }

    #[test]
    fn caption_substitutes_for_text_and_photo_picks_largest() {
        let update = update_from_json(serde_json::json!({
            "update_id": 102,
            "channel_post": {
                "caption": "new panels in stock",
                "date": 1700000000i64,
                "photo": [
                    { "file_id": "small", "width": 90, "height": 60 },
                    { "file_id": "medium", "width": 320, "height": 213 },
                    { "file_id": "large", "width": 1280, "height": 853 }
                ]
            }
        }));

        let post = normalize_update(&update).expect("should normalize");
        assert_eq!(post.text(), "new panels in stock");
        assert_eq!(post.photo_file_id(), Some("large"));
    }

    #[test]
    fn drops_update_without_content() {
        let empty = update_from_json(serde_json::json!({ "update_id": 103 }));
        assert!(normalize_update(&empty).is_none());

        // Sticker-style post: no text, no caption.
        let no_text = update_from_json(serde_json::json!({
            "update_id": 104,
            "message": { "date": 1700000000i64 }
        }));
        assert!(normalize_update(&no_text).is_none());
    }

    #[test]
    fn keyboard_markup_maps_callback_and_url_buttons() {
        let keyboard = InlineKeyboard::new()
            .row(vec![InlineButton::callback("Panels", "category_s1_c1")])
            .row(vec![InlineButton::url("Shop", "https://shop.example")]);

        let markup = InlineKeyboardMarkup::from(&keyboard);
        let json = serde_json::to_value(&markup).unwrap();

        assert_eq!(
            json["inline_keyboard"][0][0]["callback_data"],
            "category_s1_c1"
        );
        assert!(json["inline_keyboard"][0][0].get("url").is_none());
        assert_eq!(json["inline_keyboard"][1][0]["url"], "https://shop.example");
        assert!(json["inline_keyboard"][1][0].get("callback_data").is_none());
    }

    #[test]
    fn media_group_item_omits_empty_caption_fields() {
        let item = InputMediaPhoto {
            kind: "photo",
            media: "https://img.example/a.jpg".into(),
            caption: None,
            parse_mode: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "photo");
        assert!(json.get("caption").is_none());
    }
}
