// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./suntrade.toml` > `~/.config/suntrade/suntrade.toml`
//! > `/etc/suntrade/suntrade.toml` with environment variable overrides via the
//! `SUNTRADE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SuntradeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/suntrade/suntrade.toml` (system-wide)
/// 3. `~/.config/suntrade/suntrade.toml` (user XDG config)
/// 4. `./suntrade.toml` (local directory)
/// 5. `SUNTRADE_*` environment variables
pub fn load_config() -> Result<SuntradeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SuntradeConfig::default()))
        .merge(Toml::file("/etc/suntrade/suntrade.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("suntrade/suntrade.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("suntrade.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SuntradeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SuntradeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SuntradeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SuntradeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SUNTRADE_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("SUNTRADE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SUNTRADE_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let mapped = key
            .as_str()
            .replacen("telegram_", "telegram.", 1)
            .replacen("image_host_", "image_host.", 1)
            .replacen("site_", "site.", 1);
        mapped.into()
    })
}
