// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! anansay - render text onto An'an's sketchbook.
//!
//! Binary entry point exposing the adapter capability probe, the plugin
//! metadata and the `安安说` command matcher.

mod probe;
mod say;

use std::path::PathBuf;
use std::process::ExitCode;

use anansay_config::AnanSayConfig;
use clap::{Parser, Subcommand};

/// Exit code when the adapters namespace cannot be located.
pub(crate) const EXIT_NO_NAMESPACE: u8 = 2;

/// anansay - sketchbook text plugin tooling.
#[derive(Parser, Debug)]
#[command(name = "anansay", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the `nonebot_plugin_alconna/uniseg/adapters` directory.
    #[arg(long, global = true)]
    adapters_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List adapters whose exporter declares image support.
    Probe {
        /// Print a JSON array instead of one identifier per line.
        #[arg(long)]
        json: bool,
    },
    /// Show the probe outcome for every adapter sub-package.
    Exporters {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the plugin metadata as JSON.
    Metadata,
    /// Run the command matcher on a chat message.
    Say {
        /// Message text, e.g. `安安说 你好`.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => anansay_config::load_and_validate_path(path),
        None => anansay_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            anansay_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    if let Some(dir) = &cli.adapters_dir {
        config.probe.adapters_dir = Some(dir.display().to_string());
    }

    run(cli.command, &config)
}

fn run(command: Commands, config: &AnanSayConfig) -> ExitCode {
    match command {
        Commands::Probe { json } => probe::run_probe(config, json),
        Commands::Exporters { plain } => probe::run_exporters(config, plain),
        Commands::Metadata => probe::run_metadata(config),
        Commands::Say { message } => say::run_say(config, &message.join(" ")),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "anansay={log_level},anansay_plugin={log_level},anansay_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn say_joins_message_words() {
        let cli = Cli::parse_from(["anansay", "say", "安安说", "你好"]);
        match cli.command {
            Commands::Say { message } => assert_eq!(message.join(" "), "安安说 你好"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_adapters_dir_after_subcommand() {
        let cli = Cli::parse_from(["anansay", "probe", "--json", "--adapters-dir", "/x"]);
        assert_eq!(cli.adapters_dir, Some(PathBuf::from("/x")));
        assert!(matches!(cli.command, Commands::Probe { json: true }));
    }
}
