// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reads the exporter source of every adapter sub-package.
//!
//! Every failure mode (missing package, missing file, unreadable file)
//! folds into "absent" for that sub-package. Nothing here returns an error
//! to the caller.

use std::collections::BTreeMap;

use anansay_config::model::DEFAULT_EXPORTER_FILE;
use anansay_core::AnanSayError;
use tracing::debug;

use crate::namespace::AdapterNamespace;

/// Reads `exporter.py` (or a configured file name) from adapter sub-packages.
#[derive(Debug, Clone)]
pub struct ExporterReader<N> {
    namespace: N,
    exporter_file: String,
}

impl<N: AdapterNamespace> ExporterReader<N> {
    pub fn new(namespace: N) -> Self {
        Self::with_exporter_file(namespace, DEFAULT_EXPORTER_FILE)
    }

    pub fn with_exporter_file(namespace: N, exporter_file: impl Into<String>) -> Self {
        Self {
            namespace,
            exporter_file: exporter_file.into(),
        }
    }

    pub fn namespace(&self) -> &N {
        &self.namespace
    }

    /// Map every non-private sub-package to its exporter text.
    ///
    /// Sub-packages without a readable exporter are left out of the map.
    /// If the namespace itself cannot be listed the map is empty.
    pub fn read_adapter_exporters(&self) -> BTreeMap<String, String> {
        let modules = match self.namespace.iter_modules() {
            Ok(modules) => modules,
            Err(e) => {
                debug!(namespace = self.namespace.qualified_name(), error = %e, "cannot enumerate adapters");
                return BTreeMap::new();
            }
        };

        modules
            .into_iter()
            .filter(|m| !m.name.starts_with('_'))
            .filter_map(|m| {
                let text = self.read_exporter_from_package(&m.name)?;
                Some((m.name, text))
            })
            .collect()
    }

    /// Exporter text of one sub-package, or `None` if it cannot be read.
    pub fn read_exporter_from_package(&self, package: &str) -> Option<String> {
        match self.try_read_exporter(package) {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                debug!(
                    package = %format!("{}.{package}", self.namespace.qualified_name()),
                    file = %self.exporter_file,
                    "no exporter"
                );
                None
            }
            Err(e) => {
                debug!(package, error = %e, "exporter unreadable, treating as absent");
                None
            }
        }
    }

    /// Explicit three-way result: found, absent, or failed.
    pub fn try_read_exporter(&self, package: &str) -> Result<Option<String>, AnanSayError> {
        Ok(self
            .namespace
            .read_resource(package, &self.exporter_file)?
            .map(decode_source))
    }
}

/// Decode as UTF-8, falling back to a lossy decode for invalid bytes.
pub fn decode_source(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!(valid_up_to = e.utf8_error().valid_up_to(), "exporter is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{DirectoryNamespace, ModuleInfo, StaticNamespace};

    /// Namespace whose `locked` package exists but cannot be read.
    struct LockedNamespace;

    impl AdapterNamespace for LockedNamespace {
        fn qualified_name(&self) -> &str {
            "locked.adapters"
        }

        fn iter_modules(&self) -> Result<Vec<ModuleInfo>, AnanSayError> {
            Ok(vec![
                ModuleInfo {
                    name: "locked".to_string(),
                    is_package: true,
                },
                ModuleInfo {
                    name: "open".to_string(),
                    is_package: true,
                },
            ])
        }

        fn read_resource(&self, package: &str, file: &str) -> Result<Option<Vec<u8>>, AnanSayError> {
            if package == "locked" {
                return Err(AnanSayError::io(
                    format!("{package}/{file}"),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
                ));
            }
            Ok(Some(b"x = 1\n".to_vec()))
        }
    }

    #[test]
    fn private_and_absent_packages_are_omitted() {
        let ns = StaticNamespace::new()
            .with_file("foo", "exporter.py", "x = 1\n")
            .with_file("_internal", "exporter.py", "x = 2\n")
            .with_package("bar")
            .with_module("helpers");

        let map = ExporterReader::new(ns).read_adapter_exporters();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("foo").map(String::as_str), Some("x = 1\n"));
    }

    #[test]
    fn nonexistent_package_is_absent() {
        let reader = ExporterReader::new(StaticNamespace::new());
        assert_eq!(reader.read_exporter_from_package("does_not_exist"), None);
    }

    #[test]
    fn custom_exporter_file_name() {
        let ns = StaticNamespace::new().with_file("foo", "caps.py", "pass\n");
        let reader = ExporterReader::with_exporter_file(ns, "caps.py");
        assert_eq!(reader.read_exporter_from_package("foo").as_deref(), Some("pass\n"));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut bytes = b"from a import Image  # ".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.push(b'\n');
        let text = decode_source(bytes);
        assert!(text.starts_with("from a import Image"));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn unlistable_namespace_yields_empty_map() {
        let reader = ExporterReader::new(DirectoryNamespace::new("/nonexistent/adapters"));
        assert!(reader.read_adapter_exporters().is_empty());
    }

    #[test]
    fn read_error_is_reported_as_failed_then_folded_to_absent() {
        let reader = ExporterReader::new(LockedNamespace);
        assert!(matches!(
            reader.try_read_exporter("locked"),
            Err(AnanSayError::Io { .. })
        ));
        assert_eq!(reader.read_exporter_from_package("locked"), None);

        let map = reader.read_adapter_exporters();
        assert!(!map.contains_key("locked"));
        assert_eq!(map.get("open").map(String::as_str), Some("x = 1\n"));
    }

    #[test]
    fn exporter_that_is_a_directory_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let pkg = tmp.path().join("odd");
        std::fs::create_dir_all(pkg.join("exporter.py")).unwrap();
        std::fs::write(pkg.join("__init__.py"), "").unwrap();

        let reader = ExporterReader::new(DirectoryNamespace::new(tmp.path()));
        assert_eq!(reader.try_read_exporter("odd").unwrap(), None);
        assert!(reader.read_adapter_exporters().is_empty());
    }
}
