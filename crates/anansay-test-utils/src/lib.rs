// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for anansay integration tests.
//!
//! - [`AdaptersFixture`] - temporary on-disk adapters namespace
//! - [`exporter_source`] - canned exporter texts

pub mod fixture;

pub use fixture::{AdaptersFixture, AdaptersFixtureBuilder};

/// Canned exporter sources.
pub mod exporter_source {
    /// Imports `Image` from the segment module.
    pub const IMAGE: &str = "\
from nonebot.adapters import Bot
from nonebot_plugin_alconna.uniseg.segment import At, Image, Text
from nonebot_plugin_alconna.uniseg.exporter import MessageExporter


class Exporter(MessageExporter):
    pass
";

    /// Wildcard import of the segment module.
    pub const WILDCARD: &str = "from nonebot_plugin_alconna.uniseg.segment import *\n";

    /// Imports `Image` from the wrong module.
    pub const WRONG_MODULE: &str = "from some.other.module import Image\n";

    /// Imports only text segments.
    pub const TEXT_ONLY: &str = "from nonebot_plugin_alconna.uniseg.segment import Text, At\n";

    /// Would pass but does not parse.
    pub const BROKEN: &str = "\
from nonebot_plugin_alconna.uniseg.segment import Image
def broken(:
";

    /// Would pass but the class body is not indented.
    pub const MISSING_BLOCK: &str = "\
from nonebot_plugin_alconna.uniseg.segment import Image


class Exporter:
pass
";
}
