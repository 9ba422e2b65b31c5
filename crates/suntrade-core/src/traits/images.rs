// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image host trait: relocation of platform-hosted files to permanent storage.

use async_trait::async_trait;

use crate::error::SuntradeError;

/// Upload-by-URL against the image hosting collaborator.
///
/// Platform file links expire; relocation re-uploads the bytes to third-party
/// storage and returns a permanent public URL. Import callers treat failures
/// as a degraded result (empty image field), never as an abort.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload_by_url(&self, source_url: &str) -> Result<String, SuntradeError>;
}
