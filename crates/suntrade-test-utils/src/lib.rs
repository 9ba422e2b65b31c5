// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles shared across the Suntrade workspace.
//!
//! [`MockGateway`] records outbound messages and serves queued inbound
//! posts; the in-memory stores back the catalog, content, and order traits
//! without a database. All doubles use interior mutability so tests can hold
//! them behind `Arc` alongside the component under test.

pub mod mock_gateway;
pub mod stores;

pub use mock_gateway::{MockGateway, MockImageHost, SentMessage};
pub use stores::{InMemoryCatalog, InMemoryContent, InMemoryOrders};
