// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of the loaded configuration.

use suntrade_core::SuntradeError;

use crate::model::SuntradeConfig;

/// Validates cross-field constraints that serde defaults cannot express.
///
/// The integration can run fully disabled (no token); validation only rejects
/// combinations that would fail at runtime in confusing ways.
pub fn validate_config(config: &SuntradeConfig) -> Result<(), SuntradeError> {
    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        return Err(SuntradeError::Config(
            "telegram.bot_token is set but empty".into(),
        ));
    }

    if config.telegram.auto_sync && config.telegram.bot_token.is_none() {
        return Err(SuntradeError::Config(
            "telegram.auto_sync requires telegram.bot_token".into(),
        ));
    }

    if config.telegram.poll_interval_secs == 0 {
        return Err(SuntradeError::Config(
            "telegram.poll_interval_secs must be greater than zero".into(),
        ));
    }

    if config.telegram.update_limit == 0 || config.telegram.update_limit > 100 {
        return Err(SuntradeError::Config(
            "telegram.update_limit must be between 1 and 100".into(),
        ));
    }

    if let Some(key) = &config.image_host.api_key
        && key.trim().is_empty()
    {
        return Err(SuntradeError::Config(
            "image_host.api_key is set but empty".into(),
        ));
    }

    Ok(())
}
