// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types: the supported-adapter registry and plugin kinds.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Registry of adapter sub-packages the alconna uniseg layer knows about.
///
/// The variant is looked up by the sub-package name found in the adapters
/// namespace (`"onebot11"`, `"tail_chat"`, ...) and maps to the canonical
/// adapter identifier, which is the adapter's distribution name. Several
/// sub-packages can share one identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AdapterModule {
    #[strum(serialize = "console")]
    Console,
    #[strum(serialize = "ding")]
    Ding,
    #[strum(serialize = "discord")]
    Discord,
    #[strum(serialize = "dodo")]
    Dodo,
    #[strum(serialize = "feishu")]
    Feishu,
    #[strum(serialize = "github")]
    Github,
    #[strum(serialize = "heybox")]
    Heybox,
    #[strum(serialize = "kritor")]
    Kritor,
    #[strum(serialize = "kook")]
    Kook,
    #[strum(serialize = "mail")]
    Mail,
    #[strum(serialize = "milky")]
    Milky,
    #[strum(serialize = "minecraft")]
    Minecraft,
    #[strum(serialize = "mirai")]
    Mirai,
    #[strum(serialize = "ntchat")]
    Ntchat,
    #[strum(serialize = "onebot11")]
    Onebot11,
    #[strum(serialize = "onebot12")]
    Onebot12,
    #[strum(serialize = "qq")]
    Qq,
    #[strum(serialize = "red")]
    Red,
    #[strum(serialize = "satori")]
    Satori,
    #[strum(serialize = "telegram")]
    Telegram,
    #[strum(serialize = "tail_chat")]
    TailChat,
    #[strum(serialize = "wxmp")]
    Wxmp,
    #[strum(serialize = "yunhu")]
    Yunhu,
}

impl AdapterModule {
    /// Look up a sub-package name. Unknown names yield `None`.
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Canonical adapter identifier reported to the host framework.
    pub fn identifier(self) -> &'static str {
        match self {
            AdapterModule::Console => "nonebot-adapter-console",
            AdapterModule::Ding => "nonebot-adapter-ding",
            AdapterModule::Discord => "nonebot-adapter-discord",
            AdapterModule::Dodo => "nonebot-adapter-dodo",
            AdapterModule::Feishu => "nonebot-adapter-feishu",
            AdapterModule::Github => "nonebot-adapter-github",
            AdapterModule::Heybox => "nonebot-adapter-heybox",
            AdapterModule::Kritor => "nonebot-adapter-kritor",
            AdapterModule::Kook => "nonebot-adapter-kaiheila",
            AdapterModule::Mail => "nonebot-adapter-mail",
            AdapterModule::Milky => "nonebot-adapter-milky",
            AdapterModule::Minecraft => "nonebot-adapter-minecraft",
            AdapterModule::Mirai => "nonebot-adapter-mirai",
            AdapterModule::Ntchat => "nonebot-adapter-ntchat",
            AdapterModule::Onebot11 | AdapterModule::Onebot12 => "nonebot-adapter-onebot",
            AdapterModule::Qq => "nonebot-adapter-qq",
            AdapterModule::Red => "nonebot-adapter-red",
            AdapterModule::Satori => "nonebot-adapter-satori",
            AdapterModule::Telegram => "nonebot-adapter-telegram",
            AdapterModule::TailChat => "nonebot-adapter-tailchat",
            AdapterModule::Wxmp => "nonebot-adapter-wxmp",
            AdapterModule::Yunhu => "nonebot-adapter-yunhu",
        }
    }
}

/// Kind of plugin declared to the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PluginType {
    Application,
    Library,
}
