// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered loading of `anansay.toml` files and `ANAN_SAY_*` variables.

#![allow(clippy::result_large_err)]

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AnanSayConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/anansay/anansay.toml` (system-wide)
/// 3. `~/.config/anansay/anansay.toml` (user XDG config)
/// 4. `./anansay.toml` (local directory)
/// 5. `ANAN_SAY_*` environment variables
pub fn load_config() -> Result<AnanSayConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AnanSayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnanSayConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AnanSayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnanSayConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AnanSayConfig::default()))
        .merge(Toml::file("/etc/anansay/anansay.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("anansay/anansay.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("anansay.toml"))
        .merge(env_provider())
}

/// `ANAN_SAY_*` variables, mapped onto config sections.
fn env_provider() -> Env {
    Env::prefixed("ANAN_SAY_").map(|key| env_key_path(key.as_str()).into())
}

/// Dotted config path for an `ANAN_SAY_`-stripped variable name.
///
/// `LIBRARY_MODE` is the host framework's name for the plugin toggle and
/// lands in `plugin.library_mode`. Keys contain underscores, so sections are
/// matched by name instead of splitting on `_`. Figment hands over the name
/// in its original case.
fn env_key_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    match key.as_str() {
        "library_mode" => "plugin.library_mode".to_string(),
        "log_level" => "log.level".to_string(),
        other => match other.strip_prefix("probe_") {
            Some(field) => format!("probe.{field}"),
            None => key,
        },
    }
}
