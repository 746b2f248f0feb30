// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The adapters namespace: a package whose immediate children are adapter
//! sub-packages.
//!
//! [`DirectoryNamespace`] reads an installed package from disk, enumerating
//! children the way Python's module discovery does. [`StaticNamespace`] is a
//! registry of sub-packages supplied at build time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anansay_config::model::ADAPTERS_RELATIVE_PATH;
use anansay_core::AnanSayError;

/// Dotted name of the namespace the probe inspects.
pub const ADAPTERS_PACKAGE: &str = "nonebot_plugin_alconna.uniseg.adapters";

/// An immediate child of a namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModuleInfo {
    pub name: String,
    /// Packages have a resource root; plain modules do not.
    pub is_package: bool,
}

/// A package-like structure holding adapter sub-packages.
pub trait AdapterNamespace {
    /// Dotted name used in log output.
    fn qualified_name(&self) -> &str;

    /// Immediate children, sorted by name. Private names are included.
    fn iter_modules(&self) -> Result<Vec<ModuleInfo>, AnanSayError>;

    /// Read `file` from the resource root of sub-package `package`.
    ///
    /// `Ok(None)` when the package has no resource root or the file is not
    /// there; `Err` only for failures while reading something that exists.
    fn read_resource(&self, package: &str, file: &str) -> Result<Option<Vec<u8>>, AnanSayError>;
}

/// An installed package directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryNamespace {
    root: PathBuf,
    qualified_name: String,
}

impl DirectoryNamespace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            qualified_name: ADAPTERS_PACKAGE.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn package_dir(&self, package: &str) -> Option<PathBuf> {
        if !is_identifier(package) {
            return None;
        }
        let dir = self.root.join(package);
        dir.join("__init__.py").is_file().then_some(dir)
    }
}

impl AdapterNamespace for DirectoryNamespace {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn iter_modules(&self) -> Result<Vec<ModuleInfo>, AnanSayError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| AnanSayError::Namespace {
            path: self.root.clone(),
            message: "cannot list directory".to_string(),
            source: Some(e),
        })?;

        let mut found: BTreeMap<String, bool> = BTreeMap::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if path.is_dir() {
                if is_identifier(file_name) && path.join("__init__.py").is_file() {
                    found.insert(file_name.to_string(), true);
                }
            } else if let Some(stem) = file_name.strip_suffix(".py") {
                if stem != "__init__" && is_identifier(stem) {
                    found.entry(stem.to_string()).or_insert(false);
                }
            }
        }

        Ok(found
            .into_iter()
            .map(|(name, is_package)| ModuleInfo { name, is_package })
            .collect())
    }

    fn read_resource(&self, package: &str, file: &str) -> Result<Option<Vec<u8>>, AnanSayError> {
        let Some(dir) = self.package_dir(package) else {
            return Ok(None);
        };
        let path = dir.join(file);
        if !path.is_file() {
            return Ok(None);
        }
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AnanSayError::io(path, e)),
        }
    }
}

/// An in-memory namespace: sub-package names mapped to their files.
#[derive(Debug, Clone, Default)]
pub struct StaticNamespace {
    packages: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    modules: Vec<String>,
}

impl StaticNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sub-package with no files.
    pub fn with_package(mut self, name: &str) -> Self {
        self.packages.entry(name.to_string()).or_default();
        self
    }

    /// Add a file to a sub-package, creating the package if needed.
    pub fn with_file(mut self, package: &str, file: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.packages
            .entry(package.to_string())
            .or_default()
            .insert(file.to_string(), contents.into());
        self
    }

    /// Add a plain module (no resource root).
    pub fn with_module(mut self, name: &str) -> Self {
        self.modules.push(name.to_string());
        self
    }
}

impl AdapterNamespace for StaticNamespace {
    fn qualified_name(&self) -> &str {
        ADAPTERS_PACKAGE
    }

    fn iter_modules(&self) -> Result<Vec<ModuleInfo>, AnanSayError> {
        let mut all: Vec<ModuleInfo> = self
            .packages
            .keys()
            .map(|name| ModuleInfo {
                name: name.clone(),
                is_package: true,
            })
            .chain(
                self.modules
                    .iter()
                    .filter(|m| !self.packages.contains_key(*m))
                    .map(|name| ModuleInfo {
                        name: name.clone(),
                        is_package: false,
                    }),
            )
            .collect();
        all.sort();
        all.dedup();
        Ok(all)
    }

    fn read_resource(&self, package: &str, file: &str) -> Result<Option<Vec<u8>>, AnanSayError> {
        Ok(self
            .packages
            .get(package)
            .and_then(|files| files.get(file))
            .cloned())
    }
}

/// Find the installed adapters directory under the first root that has one.
pub fn locate_adapters_dir(search_roots: &[PathBuf]) -> Option<PathBuf> {
    search_roots.iter().find_map(|root| {
        let candidate = root.join(ADAPTERS_RELATIVE_PATH);
        if candidate.is_dir() {
            tracing::debug!(path = %candidate.display(), "found adapters namespace");
            Some(candidate)
        } else {
            None
        }
    })
}

/// Resolve the namespace from configuration: an explicit `adapters_dir`
/// wins, otherwise the search roots are scanned.
pub fn resolve_namespace(
    config: &anansay_config::model::ProbeConfig,
) -> Result<DirectoryNamespace, AnanSayError> {
    if let Some(dir) = &config.adapters_dir {
        let path = PathBuf::from(dir);
        if !path.is_dir() {
            tracing::warn!(path = %path.display(), "configured adapters_dir is not a directory");
            return Err(AnanSayError::Namespace {
                path,
                message: "configured adapters_dir is not a directory".to_string(),
                source: None,
            });
        }
        return Ok(DirectoryNamespace::new(path));
    }

    let roots = config.search_roots();
    locate_adapters_dir(&roots)
        .map(DirectoryNamespace::new)
        .ok_or_else(|| AnanSayError::Namespace {
            path: PathBuf::from(ADAPTERS_RELATIVE_PATH),
            message: format!("not found under {} search root(s)", roots.len()),
            source: None,
        })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_namespace_lists_packages_and_modules() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("telegram")).unwrap();
        std::fs::write(root.join("telegram/__init__.py"), "").unwrap();
        std::fs::create_dir_all(root.join("no_init")).unwrap();
        std::fs::create_dir_all(root.join("__pycache__")).unwrap();
        std::fs::write(root.join("loader.py"), "").unwrap();
        std::fs::write(root.join("__init__.py"), "").unwrap();
        std::fs::write(root.join("README.md"), "").unwrap();

        let ns = DirectoryNamespace::new(root);
        let modules = ns.iter_modules().unwrap();
        assert_eq!(
            modules,
            vec![
                ModuleInfo {
                    name: "loader".into(),
                    is_package: false
                },
                ModuleInfo {
                    name: "telegram".into(),
                    is_package: true
                },
            ]
        );
    }

    #[test]
    fn directory_namespace_missing_root_is_an_error() {
        let ns = DirectoryNamespace::new("/nonexistent/adapters");
        assert!(matches!(
            ns.iter_modules(),
            Err(AnanSayError::Namespace { .. })
        ));
    }

    #[test]
    fn read_resource_rejects_path_like_names() {
        let tmp = tempfile::tempdir().unwrap();
        let ns = DirectoryNamespace::new(tmp.path());
        assert!(ns.read_resource("../etc", "passwd").unwrap().is_none());
        assert!(ns.read_resource("a/b", "exporter.py").unwrap().is_none());
    }

    #[test]
    fn static_namespace_reports_packages_and_files() {
        let ns = StaticNamespace::new()
            .with_file("qq", "exporter.py", "pass\n")
            .with_package("bare")
            .with_module("util");

        let names: Vec<String> = ns.iter_modules().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["bare", "qq", "util"]);
        assert_eq!(
            ns.read_resource("qq", "exporter.py").unwrap(),
            Some(b"pass\n".to_vec())
        );
        assert!(ns.read_resource("bare", "exporter.py").unwrap().is_none());
        assert!(ns.read_resource("util", "exporter.py").unwrap().is_none());
    }

    #[test]
    fn locate_uses_first_root_that_has_the_namespace() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(second.path().join(ADAPTERS_RELATIVE_PATH)).unwrap();

        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            locate_adapters_dir(&roots),
            Some(second.path().join(ADAPTERS_RELATIVE_PATH))
        );
        assert_eq!(locate_adapters_dir(&roots[..1]), None);
    }

    #[test]
    fn resolve_prefers_explicit_adapters_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = anansay_config::model::ProbeConfig {
            adapters_dir: Some(tmp.path().display().to_string()),
            ..Default::default()
        };
        let ns = resolve_namespace(&config).unwrap();
        assert_eq!(ns.root(), tmp.path());
    }

    #[test]
    fn resolve_fails_for_missing_explicit_dir() {
        let config = anansay_config::model::ProbeConfig {
            adapters_dir: Some("/nonexistent/adapters".to_string()),
            ..Default::default()
        };
        assert!(resolve_namespace(&config).is_err());
    }
}
