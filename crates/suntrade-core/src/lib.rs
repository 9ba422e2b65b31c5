// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Suntrade chat integration service.
//!
//! This crate provides the error type, domain records, and the collaborator
//! traits consumed by the transport, importer, navigation, and notification
//! crates. The system of record is always an external document store; the
//! types here are data contracts, not owned state.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SuntradeError;
pub use traits::{CatalogStore, ContentStore, ImageHost, MessageGateway, OrderStore};
pub use types::{
    ChannelPost, ChatId, FanoutReport, ImportCandidate, InlineKeyboard, NewsArticle, Order,
    OrderDraft, OrderId, OrderStatus, ParseMode, PostContent, Product, Shop,
};
