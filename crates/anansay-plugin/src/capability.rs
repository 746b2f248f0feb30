// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image capability detection over adapter exporter sources.
//!
//! An adapter counts as image-capable when its exporter has a
//! `from nonebot_plugin_alconna.uniseg.segment import Image` (or `import *`)
//! statement. Usage is not verified and re-exports are not followed.

use std::collections::BTreeSet;

use anansay_config::model::{DEFAULT_TARGET_MODULE, ProbeConfig};
use anansay_core::AdapterModule;
use tracing::{debug, info};

use crate::exporter::ExporterReader;
use crate::namespace::AdapterNamespace;
use crate::scan::parse_import_froms;

/// Symbols whose import marks the capability.
const CAPABILITY_SYMBOLS: &[&str] = &["Image", "*"];

/// Checks source text for an import of `Image` from the target module.
#[derive(Debug, Clone)]
pub struct ImageCapability {
    target_module: String,
}

impl Default for ImageCapability {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_MODULE)
    }
}

impl ImageCapability {
    pub fn new(target_module: impl Into<String>) -> Self {
        Self {
            target_module: target_module.into(),
        }
    }

    pub fn target_module(&self) -> &str {
        &self.target_module
    }

    /// `true` if `text` imports `Image` or `*` from the target module.
    ///
    /// Text that cannot be scanned yields `false`.
    pub fn check(&self, text: &str) -> bool {
        let imports = match parse_import_froms(text) {
            Ok(imports) => imports,
            Err(e) => {
                debug!(error = %e, "exporter source could not be parsed");
                return false;
            }
        };

        imports
            .iter()
            .filter(|import| import.module.as_deref() == Some(self.target_module.as_str()))
            .flat_map(|import| import.names.iter())
            .any(|imported| CAPABILITY_SYMBOLS.contains(&imported.name.as_str()))
    }
}

/// Check `text` against the default target module.
pub fn check_adapter_support(text: &str) -> bool {
    ImageCapability::default().check(text)
}

/// Per-sub-package outcome of the probe, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterReport {
    pub name: String,
    pub is_package: bool,
    pub registered: Option<AdapterModule>,
    pub has_exporter: bool,
    pub supports_image: bool,
}

impl AdapterReport {
    /// Canonical identifier this sub-package contributes, if any.
    pub fn contributes(&self) -> Option<&'static str> {
        match self.registered {
            Some(module) if self.supports_image => Some(module.identifier()),
            _ => None,
        }
    }
}

/// Combines the exporter reader and the capability check.
#[derive(Debug, Clone)]
pub struct AdapterProbe<N> {
    reader: ExporterReader<N>,
    capability: ImageCapability,
}

impl<N: AdapterNamespace> AdapterProbe<N> {
    /// Probe `namespace` with the default exporter file and target module.
    pub fn new(namespace: N) -> Self {
        Self {
            reader: ExporterReader::new(namespace),
            capability: ImageCapability::default(),
        }
    }

    /// Probe `namespace` with the exporter file and target module from config.
    pub fn from_config(namespace: N, config: &ProbeConfig) -> Self {
        Self {
            reader: ExporterReader::with_exporter_file(namespace, config.exporter_file.clone()),
            capability: ImageCapability::new(config.target_module.clone()),
        }
    }

    pub fn reader(&self) -> &ExporterReader<N> {
        &self.reader
    }

    /// Canonical identifiers of registered adapters whose exporter
    /// imports the image segment.
    pub fn get_supported_adapters(&self) -> BTreeSet<String> {
        let exporters = self.reader.read_adapter_exporters();
        let mut supported = BTreeSet::new();

        for (name, text) in &exporters {
            // Registry membership is checked before the more expensive scan.
            let Some(module) = AdapterModule::lookup(name) else {
                debug!(adapter = %name, "not in adapter registry, skipping");
                continue;
            };
            if !self.capability.check(text) {
                debug!(adapter = %name, "no image segment import");
                continue;
            }
            supported.insert(module.identifier().to_string());
        }

        info!(
            namespace = self.reader.namespace().qualified_name(),
            exporters = exporters.len(),
            supported = supported.len(),
            "adapter capability probe finished"
        );
        supported
    }

    /// Outcome for every enumerated non-private sub-package, sorted by name.
    pub fn report(&self) -> Vec<AdapterReport> {
        let modules = match self.reader.namespace().iter_modules() {
            Ok(modules) => modules,
            Err(e) => {
                debug!(error = %e, "cannot enumerate adapters");
                return Vec::new();
            }
        };

        modules
            .into_iter()
            .filter(|m| !m.name.starts_with('_'))
            .map(|m| {
                let text = self.reader.read_exporter_from_package(&m.name);
                AdapterReport {
                    registered: AdapterModule::lookup(&m.name),
                    has_exporter: text.is_some(),
                    supports_image: text.as_deref().is_some_and(|t| self.capability.check(t)),
                    is_package: m.is_package,
                    name: m.name,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::StaticNamespace;

    const IMAGE_IMPORT: &str = "from nonebot_plugin_alconna.uniseg.segment import Image\n";

    #[test]
    fn image_import_from_target_module_passes() {
        assert!(check_adapter_support(IMAGE_IMPORT));
        assert!(check_adapter_support(
            "from nonebot_plugin_alconna.uniseg.segment import *\n"
        ));
        assert!(check_adapter_support(
            "from nonebot_plugin_alconna.uniseg.segment import (\n    Text,\n    Image,\n)\n"
        ));
    }

    #[test]
    fn other_module_or_symbol_fails() {
        assert!(!check_adapter_support("from some.other.module import Image\n"));
        assert!(!check_adapter_support(
            "from nonebot_plugin_alconna.uniseg.segment import Text, At\n"
        ));
        assert!(!check_adapter_support(
            "from nonebot_plugin_alconna.uniseg import segment\n"
        ));
        assert!(!check_adapter_support(
            "from nonebot_plugin_alconna.uniseg.segment.extra import Image\n"
        ));
        assert!(!check_adapter_support("import nonebot_plugin_alconna.uniseg.segment\n"));
    }

    #[test]
    fn aliased_image_still_counts() {
        assert!(check_adapter_support(
            "from nonebot_plugin_alconna.uniseg.segment import Image as Img\n"
        ));
        assert!(!check_adapter_support(
            "from nonebot_plugin_alconna.uniseg.segment import Text as Image\n"
        ));
    }

    #[test]
    fn relative_level_is_ignored_when_comparing_module() {
        assert!(check_adapter_support(
            "from ..nonebot_plugin_alconna.uniseg.segment import Image\n"
        ));
    }

    #[test]
    fn syntax_error_anywhere_fails_without_panicking() {
        let src = format!("{IMAGE_IMPORT}x = 'unterminated\n");
        assert!(!check_adapter_support(&src));
        assert!(!check_adapter_support("from nonebot_plugin_alconna.uniseg.segment import (Image\n"));
    }

    #[test]
    fn image_import_followed_by_invalid_python_fails() {
        for tail in [
            "x = = 1",
            "def f():\nreturn 1",
            "class",
            "if True\n    pass",
            "print 'hello'",
            "  y = 2",
            "import",
            "x = 1 2",
            "if x:\n        a\n    b\n",
        ] {
            let src = format!("{IMAGE_IMPORT}{tail}");
            assert!(!check_adapter_support(&src), "accepted invalid source {src:?}");
        }
    }

    #[test]
    fn indented_top_level_import_fails() {
        assert!(!check_adapter_support(&format!("    {IMAGE_IMPORT}")));
    }

    #[test]
    fn image_import_inside_valid_blocks_passes() {
        let src = format!(
            "try:\n    {IMAGE_IMPORT}except ImportError:\n    Image = None\n\n\nclass A:\n    def f(self):\n        return Image\n"
        );
        assert!(check_adapter_support(&src));
    }

    #[test]
    fn import_inside_string_does_not_count() {
        let src = format!("'''\n{IMAGE_IMPORT}'''\n");
        assert!(!check_adapter_support(&src));
    }

    #[test]
    fn custom_target_module() {
        let capability = ImageCapability::new("my.segments");
        assert!(capability.check("from my.segments import Image\n"));
        assert!(!capability.check(IMAGE_IMPORT));
    }

    #[test]
    fn unregistered_adapter_never_contributes() {
        let ns = StaticNamespace::new()
            .with_file("not_a_real_adapter", "exporter.py", IMAGE_IMPORT)
            .with_file("telegram", "exporter.py", IMAGE_IMPORT);
        let supported = AdapterProbe::new(ns).get_supported_adapters();
        assert_eq!(
            supported,
            BTreeSet::from(["nonebot-adapter-telegram".to_string()])
        );
    }

    #[test]
    fn onebot_versions_collapse_into_one_identifier() {
        let ns = StaticNamespace::new()
            .with_file("onebot11", "exporter.py", IMAGE_IMPORT)
            .with_file("onebot12", "exporter.py", IMAGE_IMPORT);
        let supported = AdapterProbe::new(ns).get_supported_adapters();
        assert_eq!(supported.len(), 1);
        assert!(supported.contains("nonebot-adapter-onebot"));
    }

    #[test]
    fn report_describes_each_sub_package() {
        let ns = StaticNamespace::new()
            .with_file("qq", "exporter.py", IMAGE_IMPORT)
            .with_file("mail", "exporter.py", "from nonebot_plugin_alconna.uniseg.segment import Text\n")
            .with_package("satori")
            .with_file("_private", "exporter.py", IMAGE_IMPORT)
            .with_module("helpers");

        let report = AdapterProbe::new(ns).report();
        let names: Vec<&str> = report.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["helpers", "mail", "qq", "satori"]);

        let qq = &report[2];
        assert!(qq.has_exporter && qq.supports_image);
        assert_eq!(qq.contributes(), Some("nonebot-adapter-qq"));

        let mail = &report[1];
        assert!(mail.has_exporter && !mail.supports_image);
        assert_eq!(mail.contributes(), None);

        let helpers = &report[0];
        assert!(!helpers.is_package && helpers.registered.is_none());
    }
}
