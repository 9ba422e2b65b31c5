// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram integration for the Suntrade back office.
//!
//! The [`client`] module speaks the raw Bot HTTP API and implements the
//! [`MessageGateway`](suntrade_core::traits::MessageGateway) seam; everything
//! above it is platform-agnostic:
//!
//! - [`import`] turns channel posts into news articles,
//! - [`navigation`] renders catalog menus and places one-tap orders,
//! - [`notify`] fans order lifecycle events out to the staff groups,
//! - [`promote`] broadcasts featured products and news cross-posts.

pub mod client;
pub mod import;
pub mod navigation;
pub mod notify;
pub mod promote;
pub mod wire;

pub use client::BotClient;
pub use import::{ImportOutcome, NewsImporter};
pub use navigation::{CallbackCommand, CustomerRef, Navigator};
pub use notify::OrderNotifier;
pub use promote::{Promoter, Promotion};
