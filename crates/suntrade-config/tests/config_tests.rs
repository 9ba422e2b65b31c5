// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Suntrade configuration system.

use suntrade_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_suntrade_config() {
    let toml = r#"
[telegram]
bot_token = "123:ABC"
shop_group_id = "-1001"
cashier_group_id = "-1002"
delivery_group_id = "-1003"
news_channel_id = "@suntradenews"
auto_sync = true
poll_interval_secs = 30
update_limit = 25

[image_host]
api_key = "imgbb-key"
endpoint = "https://images.example/upload"

[site]
shop_url = "https://shop.example"
blog_url = "https://shop.example/blog"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.shop_group_id.as_deref(), Some("-1001"));
    assert_eq!(config.telegram.cashier_group_id.as_deref(), Some("-1002"));
    assert_eq!(config.telegram.delivery_group_id.as_deref(), Some("-1003"));
    assert_eq!(
        config.telegram.news_channel_id.as_deref(),
        Some("@suntradenews")
    );
    assert!(config.telegram.auto_sync);
    assert_eq!(config.telegram.poll_interval_secs, 30);
    assert_eq!(config.telegram.update_limit, 25);
    assert_eq!(config.image_host.api_key.as_deref(), Some("imgbb-key"));
    assert_eq!(config.image_host.endpoint, "https://images.example/upload");
    assert_eq!(config.site.shop_url, "https://shop.example");
    assert_eq!(config.site.blog_url, "https://shop.example/blog");
}

/// Empty input yields compiled defaults: integration disabled, 60s poll,
/// limit 10.
#[test]
fn empty_config_uses_defaults() {
    let config = load_config_from_str("").expect("defaults should deserialize");
    assert!(config.telegram.bot_token.is_none());
    assert!(!config.telegram.auto_sync);
    assert_eq!(config.telegram.poll_interval_secs, 60);
    assert_eq!(config.telegram.update_limit, 10);
    assert_eq!(config.image_host.endpoint, "https://api.imgbb.com/1/upload");
}

/// Unknown field in [telegram] section is rejected.
#[test]
fn unknown_field_in_telegram_produces_error() {
    let toml = r#"
[telegram]
bot_tken = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("bot_tken"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_produces_error() {
    let toml = r#"
[telegramm]
bot_token = "abc"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// auto_sync without a bot token fails validation.
#[test]
fn auto_sync_without_token_fails_validation() {
    let toml = r#"
[telegram]
auto_sync = true
"#;

    let err = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(err.to_string().contains("auto_sync"));
}

/// A zero poll interval fails validation.
#[test]
fn zero_poll_interval_fails_validation() {
    let toml = r#"
[telegram]
bot_token = "123:ABC"
poll_interval_secs = 0
"#;

    let err = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(err.to_string().contains("poll_interval_secs"));
}

/// update_limit outside 1..=100 fails validation.
#[test]
fn out_of_range_update_limit_fails_validation() {
    let toml = r#"
[telegram]
bot_token = "123:ABC"
update_limit = 500
"#;

    let err = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(err.to_string().contains("update_limit"));
}

/// An explicitly empty token is rejected rather than treated as disabled.
#[test]
fn empty_token_fails_validation() {
    let toml = r#"
[telegram]
bot_token = ""
"#;

    let err = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(err.to_string().contains("bot_token"));
}
