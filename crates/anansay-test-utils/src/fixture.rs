// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk adapters namespace fixture.
//!
//! Lays out a fake `site-packages` tree containing
//! `nonebot_plugin_alconna/uniseg/adapters/` in a temp directory.

use std::path::{Path, PathBuf};

use anansay_config::model::{ADAPTERS_RELATIVE_PATH, DEFAULT_EXPORTER_FILE};
use anansay_core::AnanSayError;

enum Entry {
    /// Sub-package with an `__init__.py` and optional exporter bytes.
    Package { name: String, exporter: Option<Vec<u8>> },
    /// Directory without `__init__.py`.
    BareDir { name: String },
    /// Plain `name.py` module.
    Module { name: String },
}

/// Builder for [`AdaptersFixture`].
pub struct AdaptersFixtureBuilder {
    entries: Vec<Entry>,
}

impl AdaptersFixtureBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sub-package whose exporter contains `source`.
    pub fn with_exporter(self, name: &str, source: &str) -> Self {
        self.with_exporter_bytes(name, source.as_bytes())
    }

    /// Sub-package whose exporter contains raw `bytes`.
    pub fn with_exporter_bytes(mut self, name: &str, bytes: &[u8]) -> Self {
        self.entries.push(Entry::Package {
            name: name.to_string(),
            exporter: Some(bytes.to_vec()),
        });
        self
    }

    /// Sub-package without an exporter.
    pub fn with_package(mut self, name: &str) -> Self {
        self.entries.push(Entry::Package {
            name: name.to_string(),
            exporter: None,
        });
        self
    }

    /// Directory that is not a package.
    pub fn with_bare_dir(mut self, name: &str) -> Self {
        self.entries.push(Entry::BareDir {
            name: name.to_string(),
        });
        self
    }

    /// Plain module file next to the sub-packages.
    pub fn with_module(mut self, name: &str) -> Self {
        self.entries.push(Entry::Module {
            name: name.to_string(),
        });
        self
    }

    /// Write the tree to a fresh temp directory.
    pub fn build(self) -> Result<AdaptersFixture, AnanSayError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| AnanSayError::io(std::env::temp_dir(), e))?;
        let site_packages = temp_dir.path().to_path_buf();
        let adapters_dir = site_packages.join(ADAPTERS_RELATIVE_PATH);

        mkdir(&adapters_dir)?;
        write(&adapters_dir.join("__init__.py"), b"")?;

        for entry in self.entries {
            match entry {
                Entry::Package { name, exporter } => {
                    let dir = adapters_dir.join(&name);
                    mkdir(&dir)?;
                    write(&dir.join("__init__.py"), b"")?;
                    if let Some(bytes) = exporter {
                        write(&dir.join(DEFAULT_EXPORTER_FILE), &bytes)?;
                    }
                }
                Entry::BareDir { name } => mkdir(&adapters_dir.join(name))?,
                Entry::Module { name } => {
                    write(&adapters_dir.join(format!("{name}.py")), b"")?
                }
            }
        }

        Ok(AdaptersFixture {
            site_packages,
            adapters_dir,
            _temp_dir: temp_dir,
        })
    }
}

/// A temporary adapters namespace on disk. Removed on drop.
pub struct AdaptersFixture {
    site_packages: PathBuf,
    adapters_dir: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl AdaptersFixture {
    pub fn builder() -> AdaptersFixtureBuilder {
        AdaptersFixtureBuilder::new()
    }

    /// Root to put in `probe.site_packages`.
    pub fn site_packages(&self) -> &Path {
        &self.site_packages
    }

    /// The `.../uniseg/adapters` directory.
    pub fn adapters_dir(&self) -> &Path {
        &self.adapters_dir
    }

    /// Overwrite (or create) a sub-package's exporter after building.
    pub fn write_exporter(&self, name: &str, source: &str) -> Result<(), AnanSayError> {
        let dir = self.adapters_dir.join(name);
        mkdir(&dir)?;
        write(&dir.join("__init__.py"), b"")?;
        write(&dir.join(DEFAULT_EXPORTER_FILE), source.as_bytes())
    }
}

fn mkdir(path: &Path) -> Result<(), AnanSayError> {
    std::fs::create_dir_all(path).map_err(|e| AnanSayError::io(path, e))
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), AnanSayError> {
    std::fs::write(path, bytes).map_err(|e| AnanSayError::io(path, e))
}
