// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `anansay say`: run the command matcher without rendering.

use std::process::ExitCode;

use anansay_config::AnanSayConfig;
use anansay_plugin::{DirectoryNamespace, load_plugin};

/// Print the text the renderer would receive for `message`.
///
/// Exits with 1 when the message does not match or the handler is not
/// registered.
pub fn run_say(config: &AnanSayConfig, message: &str) -> ExitCode {
    // Matching does not depend on adapter support, so skip the adapter scan.
    let plugin = load_plugin::<DirectoryNamespace>(config, None);

    let Some(command) = plugin.command() else {
        eprintln!("anansay: library mode is on; the {} command handler is not registered", plugin.metadata.name);
        return ExitCode::FAILURE;
    };

    match command.match_message(message) {
        Some(request) => {
            println!("{}", request.text);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("anansay: message does not match `{} <内容>`", command.trigger());
            ExitCode::FAILURE
        }
    }
}
