// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by all Suntrade crates.

use thiserror::Error;

/// The primary error type used across collaborator traits and core operations.
///
/// Soft conditions are deliberately absent: a failed image relocation during
/// import is logged and the import proceeds with an empty image field, and a
/// partially failed notification fan-out is reported per destination via
/// `FanoutReport` rather than raised here.
#[derive(Debug, Error)]
pub enum SuntradeError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// The messaging platform answered with a non-success HTTP status.
    /// Not retried at this layer; callers decide what failure means.
    #[error("transport error: HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    /// The request never produced an HTTP response (DNS, TLS, connect, body).
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A referenced entity (file, shop, category, product, order) is absent.
    /// Navigation handlers render a user-facing "not found" message for this
    /// instead of dropping the conversation.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Document store collaborator errors (query failure, write failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Image hosting collaborator errors (upload rejected, bad response).
    #[error("image host error: {message}")]
    ImageHost { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SuntradeError {
    /// Wraps an arbitrary error as a storage failure.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(source),
        }
    }

    /// Wraps an arbitrary error as a network failure with context.
    pub fn network<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for the `NotFound` variant, regardless of entity kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
