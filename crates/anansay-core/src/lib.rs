// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the anansay plugin.
//!
//! Holds the shared error type and the closed registry of adapter
//! sub-packages used by the capability probe.

pub mod error;
pub mod types;

pub use error::AnanSayError;
pub use types::{AdapterModule, PluginType};
