// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::AnanSayConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &AnanSayConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(dir) = &config.probe.adapters_dir {
        if dir.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "probe.adapters_dir must not be empty when set".to_string(),
            });
        }
    }

    for (i, root) in config.probe.site_packages.iter().enumerate() {
        if root.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("probe.site_packages[{i}] must not be empty"),
            });
        }
    }

    let exporter = config.probe.exporter_file.trim();
    if exporter.is_empty() {
        errors.push(ConfigError::Validation {
            message: "probe.exporter_file must not be empty".to_string(),
        });
    } else if exporter.contains('/') || exporter.contains('\\') {
        errors.push(ConfigError::Validation {
            message: format!(
                "probe.exporter_file `{exporter}` must be a file name, not a path"
            ),
        });
    }

    if !is_dotted_module(&config.probe.target_module) {
        errors.push(ConfigError::Validation {
            message: format!(
                "probe.target_module `{}` is not a dotted module path",
                config.probe.target_module
            ),
        });
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `a.b.c` where every segment is a Python identifier.
fn is_dotted_module(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
                && chars.all(|c| c == '_' || c.is_alphanumeric())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&AnanSayConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut config = AnanSayConfig::default();
        config.probe.adapters_dir = Some("  ".to_string());
        config.probe.exporter_file = "sub/exporter.py".to_string();
        config.probe.target_module = "nonebot..segment".to_string();
        config.log.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4, "got: {errors:?}");
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = AnanSayConfig::default();
        config.log.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn dotted_module_accepts_identifiers_only() {
        assert!(is_dotted_module("nonebot_plugin_alconna.uniseg.segment"));
        assert!(is_dotted_module("_private.mod2"));
        assert!(!is_dotted_module(""));
        assert!(!is_dotted_module("2fast.mod"));
        assert!(!is_dotted_module("trailing."));
        assert!(!is_dotted_module("has-dash.mod"));
    }
}
