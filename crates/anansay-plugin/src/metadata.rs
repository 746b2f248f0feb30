// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin metadata handed to the host framework at load time.

use std::collections::BTreeSet;

use anansay_core::PluginType;
use serde::{Deserialize, Serialize};

pub const PLUGIN_NAME: &str = "安安说";
pub const PLUGIN_DESCRIPTION: &str = "一个向安安的素描本上渲染文字并发送出去的插件";
pub const PLUGIN_USAGE: &str = "发送指令`安安说 + 内容`来使用\n";
pub const PLUGIN_HOMEPAGE: &str = "https://github.com/Chzxxuanzheng/nonebot_plugin_anan_say";

/// Config keys the plugin reads, as the host framework sees them.
pub const CONFIG_KEYS: &[&str] = &["anan_say_library_mode"];

/// Metadata describing the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub description: String,
    pub usage: String,
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    pub homepage: String,
    pub config_keys: Vec<String>,
    /// Adapters the plugin can send images through. `None` means the set
    /// could not be determined and the host should not restrict the plugin.
    pub supported_adapters: Option<BTreeSet<String>>,
}

impl PluginMetadata {
    /// Metadata with the given supported-adapter set.
    pub fn new(supported_adapters: Option<BTreeSet<String>>) -> Self {
        Self {
            name: PLUGIN_NAME.to_string(),
            description: PLUGIN_DESCRIPTION.to_string(),
            usage: PLUGIN_USAGE.to_string(),
            plugin_type: PluginType::Application,
            homepage: PLUGIN_HOMEPAGE.to_string(),
            config_keys: CONFIG_KEYS.iter().map(|k| k.to_string()).collect(),
            supported_adapters,
        }
    }

    /// Whether the host may load this plugin for `adapter`.
    pub fn supports(&self, adapter: &str) -> bool {
        self.supported_adapters
            .as_ref()
            .is_none_or(|set| set.contains(adapter))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
