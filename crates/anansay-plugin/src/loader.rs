// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin loading: metadata always, the command handler unless the plugin
//! runs in library mode.

use anansay_config::AnanSayConfig;
use anansay_core::AnanSayError;
use tracing::info;

use crate::capability::AdapterProbe;
use crate::command::{SayCommand, SketchbookRenderer};
use crate::metadata::PluginMetadata;
use crate::namespace::AdapterNamespace;

/// The plugin as registered with the host.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    pub metadata: PluginMetadata,
    say: Option<SayCommand>,
}

impl LoadedPlugin {
    /// The command handler, absent in library mode.
    pub fn command(&self) -> Option<&SayCommand> {
        self.say.as_ref()
    }

    /// Route a chat message. `Ok(None)` when no handler takes it.
    pub fn dispatch(
        &self,
        message: &str,
        renderer: &dyn SketchbookRenderer,
    ) -> Result<Option<Vec<u8>>, AnanSayError> {
        match &self.say {
            Some(cmd) => cmd.handle(message, renderer),
            None => Ok(None),
        }
    }
}

/// Build the plugin from configuration.
///
/// `namespace` is the installed adapters namespace; without one the
/// supported-adapter set is left undetermined.
pub fn load_plugin<N: AdapterNamespace>(
    config: &AnanSayConfig,
    namespace: Option<N>,
) -> LoadedPlugin {
    let supported = namespace
        .map(|ns| AdapterProbe::from_config(ns, &config.probe).get_supported_adapters());
    let metadata = PluginMetadata::new(supported);

    let say = if config.plugin.library_mode {
        info!("library mode: command handler not registered");
        None
    } else {
        Some(SayCommand)
    };

    LoadedPlugin { metadata, say }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::StaticNamespace;

    struct LenRenderer;

    impl SketchbookRenderer for LenRenderer {
        fn render(&self, text: &str) -> Result<Vec<u8>, AnanSayError> {
            Ok(vec![text.len() as u8])
        }
    }

    fn namespace() -> StaticNamespace {
        StaticNamespace::new().with_file(
            "discord",
            "exporter.py",
            "from nonebot_plugin_alconna.uniseg.segment import Image\n",
        )
    }

    #[test]
    fn default_mode_registers_command() {
        let plugin = load_plugin(&AnanSayConfig::default(), Some(namespace()));
        assert!(plugin.command().is_some());
        assert_eq!(
            plugin.dispatch("安安说 abc", &LenRenderer).unwrap(),
            Some(vec![3])
        );
        assert!(plugin.metadata.supports("nonebot-adapter-discord"));
        assert!(!plugin.metadata.supports("nonebot-adapter-qq"));
    }

    #[test]
    fn library_mode_loads_metadata_only() {
        let mut config = AnanSayConfig::default();
        config.plugin.library_mode = true;

        let plugin = load_plugin(&config, Some(namespace()));
        assert!(plugin.command().is_none());
        assert_eq!(plugin.dispatch("安安说 abc", &LenRenderer).unwrap(), None);
        assert_eq!(plugin.metadata.name, "安安说");
        assert!(plugin.metadata.supported_adapters.is_some());
    }

    #[test]
    fn missing_namespace_leaves_support_undetermined() {
        let plugin = load_plugin::<StaticNamespace>(&AnanSayConfig::default(), None);
        assert!(plugin.metadata.supported_adapters.is_none());
    }
}
