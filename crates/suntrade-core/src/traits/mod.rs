// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Each external collaborator the core depends on (the bot messaging
//! platform, the document store, the image host) is consumed through one of
//! these traits. All use `#[async_trait]` for dynamic dispatch.

pub mod catalog;
pub mod content;
pub mod gateway;
pub mod images;
pub mod orders;

pub use catalog::CatalogStore;
pub use content::ContentStore;
pub use gateway::MessageGateway;
pub use images::ImageHost;
pub use orders::OrderStore;
