// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tapin.toml` > `~/.config/tapin/tapin.toml` >
//! `/etc/tapin/tapin.toml` with environment variable overrides via the
//! `TAPIN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TapinConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tapin/tapin.toml` (system-wide)
/// 3. `~/.config/tapin/tapin.toml` (user XDG config)
/// 4. `./tapin.toml` (local directory)
/// 5. `TAPIN_*` environment variables
pub fn load_config() -> Result<TapinConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TapinConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TapinConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TapinConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TapinConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for
/// diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TapinConfig::default()))
        .merge(Toml::file("/etc/tapin/tapin.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tapin/tapin.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tapin.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TAPIN_WINDOW_CHECK_IN_START` must map
/// to `window.check_in_start`, not `window.check.in.start`.
fn env_provider() -> Env {
    Env::prefixed("TAPIN_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TAPIN_STORE_BASE_URL -> "store_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("kiosk_", "kiosk.", 1)
            .replacen("window_", "window.", 1)
            .replacen("reset_", "reset.", 1)
            .replacen("feedback_", "feedback.", 1)
            .replacen("store_", "store.", 1)
            .replacen("notify_", "notify.", 1);
        mapped.into()
    })
}
