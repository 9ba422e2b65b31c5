// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order store trait: persistence of chat-originated orders.

use async_trait::async_trait;

use crate::error::SuntradeError;
use crate::types::{OrderDraft, OrderId};

/// Write access to the orders collection of the document store collaborator.
/// Status transitions after creation belong to the external approval actor.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and returns the store-assigned identifier.
    async fn create_order(&self, draft: OrderDraft) -> Result<OrderId, SuntradeError>;
}
