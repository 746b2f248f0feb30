// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter capability probe and plugin surface for anansay.
//!
//! The probe reads every adapter sub-package's exporter source from the
//! alconna adapters namespace and reports the adapters whose exporter
//! imports the `Image` segment. Around it sit the plugin metadata, the
//! `安安说` command matcher and the `library_mode` gated loader.

pub mod capability;
pub mod command;
pub mod exporter;
mod lexer;
pub mod loader;
pub mod metadata;
pub mod namespace;
pub mod scan;

pub use capability::{AdapterProbe, AdapterReport, ImageCapability, check_adapter_support};
pub use command::{SayCommand, SayRequest, SketchbookRenderer};
pub use exporter::ExporterReader;
pub use loader::{LoadedPlugin, load_plugin};
pub use metadata::PluginMetadata;
pub use namespace::{
    AdapterNamespace, DirectoryNamespace, ModuleInfo, StaticNamespace, locate_adapters_dir,
    resolve_namespace,
};
