// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Suntrade chat integration.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use suntrade_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("auto sync: {}", config.telegram.auto_sync);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ImageHostConfig, SiteConfig, SuntradeConfig, TelegramConfig};

use suntrade_core::SuntradeError;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<SuntradeConfig, SuntradeError> {
    let config = loader::load_config().map_err(|e| SuntradeError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<SuntradeConfig, SuntradeError> {
    let config =
        loader::load_config_from_str(toml_content).map_err(|e| SuntradeError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}
