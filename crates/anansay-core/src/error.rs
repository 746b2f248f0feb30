// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the anansay plugin.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type shared by the probe, the plugin surface and the CLI.
#[derive(Debug, Error)]
pub enum AnanSayError {
    /// The adapters namespace could not be enumerated or located.
    #[error("adapters namespace unavailable at {}: {message}", path.display())]
    Namespace {
        path: PathBuf,
        message: String,
        source: Option<std::io::Error>,
    },

    /// Filesystem errors while resolving a resource inside the namespace.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The host-supplied renderer failed to produce an image.
    #[error("render error: {message}")]
    Render {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnanSayError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnanSayError::Io {
            path: path.into(),
            source,
        }
    }
}
