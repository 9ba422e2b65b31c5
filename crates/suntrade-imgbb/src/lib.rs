// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ImgBB adapter implementing the [`ImageHost`] seam.
//!
//! ImgBB accepts an upload-by-URL form post: it fetches the source image
//! itself and returns a permanent public URL. That makes it a good landing
//! spot for platform file links, which expire after roughly an hour.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use suntrade_config::ImageHostConfig;
use suntrade_core::error::SuntradeError;
use suntrade_core::traits::ImageHost;

/// Upload client bound to one ImgBB API key.
#[derive(Debug)]
pub struct ImgbbClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    data: Option<UploadData>,
    #[serde(default)]
    error: Option<UploadError>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
}

#[derive(Debug, Deserialize)]
struct UploadError {
    message: String,
}

impl ImgbbClient {
    /// Creates a client from the loaded configuration. Fails when no API key
    /// is set; callers wanting image-less imports skip constructing one.
    pub fn from_config(config: &ImageHostConfig) -> Result<Self, SuntradeError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SuntradeError::Config("image_host.api_key is required".into()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload_by_url(&self, source_url: &str) -> Result<String, SuntradeError> {
        let form = reqwest::multipart::Form::new().text("image", source_url.to_string());

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| SuntradeError::network("image upload request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuntradeError::ImageHost {
                message: format!("upload endpoint returned HTTP {}", status.as_u16()),
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| SuntradeError::network("upload response was not valid JSON", e))?;

        if !body.success {
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "upload rejected".to_string());
            return Err(SuntradeError::ImageHost { message });
        }

        let url = body
            .data
            .map(|d| d.url)
            .ok_or_else(|| SuntradeError::ImageHost {
                message: "upload succeeded without a hosted URL".to_string(),
            })?;

        debug!(hosted = %url, "image relocated");
        Ok(url)
    }
}
