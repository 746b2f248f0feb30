// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the anansay plugin.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Import path whose `Image` segment marks an adapter as image-capable.
pub const DEFAULT_TARGET_MODULE: &str = "nonebot_plugin_alconna.uniseg.segment";

/// File read from each adapter sub-package.
pub const DEFAULT_EXPORTER_FILE: &str = "exporter.py";

/// Location of the adapters namespace relative to a site-packages root.
pub const ADAPTERS_RELATIVE_PATH: &str = "nonebot_plugin_alconna/uniseg/adapters";

/// Top-level anansay configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnanSayConfig {
    /// Plugin loading behavior.
    #[serde(default)]
    pub plugin: PluginConfig,

    /// Adapter capability probe settings.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Plugin loading configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// When set, only the metadata surface loads and the `安安说` command
    /// handler is not registered.
    #[serde(default)]
    pub library_mode: bool,
}

/// Adapter capability probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Explicit path to the `nonebot_plugin_alconna/uniseg/adapters` directory.
    /// Takes precedence over `site_packages` lookup.
    #[serde(default)]
    pub adapters_dir: Option<String>,

    /// Site-packages roots searched for the adapters namespace, in order.
    #[serde(default)]
    pub site_packages: Vec<String>,

    /// Name of the exporter file read from each sub-package.
    #[serde(default = "default_exporter_file")]
    pub exporter_file: String,

    /// Module an exporter must import `Image` (or `*`) from.
    #[serde(default = "default_target_module")]
    pub target_module: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            adapters_dir: None,
            site_packages: Vec::new(),
            exporter_file: default_exporter_file(),
            target_module: default_target_module(),
        }
    }
}

impl ProbeConfig {
    /// Roots to search for the adapters namespace: configured
    /// `site_packages` first, then `PYTHONPATH` entries.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = self.site_packages.iter().map(PathBuf::from).collect();
        if let Some(python_path) = std::env::var_os("PYTHONPATH") {
            roots.extend(std::env::split_paths(&python_path).filter(|p| !p.as_os_str().is_empty()));
        }
        roots
    }
}

fn default_exporter_file() -> String {
    DEFAULT_EXPORTER_FILE.to_string()
}

fn default_target_module() -> String {
    DEFAULT_TARGET_MODULE.to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
