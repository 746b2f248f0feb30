// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `anansay probe`, `anansay exporters` and `anansay metadata`.

use std::io::IsTerminal;
use std::process::ExitCode;

use anansay_config::AnanSayConfig;
use anansay_plugin::{AdapterProbe, AdapterReport, DirectoryNamespace, load_plugin, resolve_namespace};

use crate::EXIT_NO_NAMESPACE;

fn namespace_or_exit(config: &AnanSayConfig) -> Result<DirectoryNamespace, ExitCode> {
    resolve_namespace(&config.probe).map_err(|e| {
        eprintln!("anansay: {e}");
        eprintln!("  set probe.adapters_dir, probe.site_packages or pass --adapters-dir");
        ExitCode::from(EXIT_NO_NAMESPACE)
    })
}

/// Print supported adapter identifiers.
pub fn run_probe(config: &AnanSayConfig, json: bool) -> ExitCode {
    let namespace = match namespace_or_exit(config) {
        Ok(ns) => ns,
        Err(code) => return code,
    };
    let supported = AdapterProbe::from_config(namespace, &config.probe).get_supported_adapters();

    if json {
        match serde_json::to_string(&supported) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("anansay: failed to encode JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for id in &supported {
            println!("{id}");
        }
    }
    ExitCode::SUCCESS
}

/// Print a per-sub-package table.
pub fn run_exporters(config: &AnanSayConfig, plain: bool) -> ExitCode {
    let namespace = match namespace_or_exit(config) {
        Ok(ns) => ns,
        Err(code) => return code,
    };
    let root = namespace.root().display().to_string();
    let report = AdapterProbe::from_config(namespace, &config.probe).report();
    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    println!("  anansay exporters ({root})");
    println!("  {}", "-".repeat(60));
    for entry in &report {
        println!("{}", format_report_line(entry, use_color));
    }
    println!();

    let supported = report.iter().filter(|r| r.contributes().is_some()).count();
    println!("  {supported} of {} sub-package(s) support images.", report.len());
    println!();
    ExitCode::SUCCESS
}

/// Print the plugin metadata. A missing namespace leaves the supported set
/// undetermined instead of failing.
pub fn run_metadata(config: &AnanSayConfig) -> ExitCode {
    let namespace = match resolve_namespace(&config.probe) {
        Ok(ns) => Some(ns),
        Err(e) => {
            tracing::warn!(error = %e, "adapters namespace unavailable; supported adapters left undetermined");
            None
        }
    };
    let plugin = load_plugin(config, namespace);

    match plugin.metadata.to_json_pretty() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("anansay: failed to encode metadata: {e}");
            ExitCode::FAILURE
        }
    }
}

fn format_report_line(entry: &AdapterReport, use_color: bool) -> String {
    let detail = describe(entry);
    let (tag, symbol) = match entry.contributes() {
        Some(_) => ("[OK]  ", "✓"),
        None => ("[SKIP]", "-"),
    };

    if use_color {
        use colored::Colorize;
        let symbol = if entry.contributes().is_some() {
            symbol.green().to_string()
        } else {
            symbol.dimmed().to_string()
        };
        format!("    {symbol} {:<16} {detail}", entry.name)
    } else {
        format!("    {tag} {:<16} {detail}", entry.name)
    }
}

fn describe(entry: &AdapterReport) -> String {
    if !entry.is_package {
        return "plain module".to_string();
    }
    let Some(module) = entry.registered else {
        return "not in adapter registry".to_string();
    };
    if !entry.has_exporter {
        return "no exporter".to_string();
    }
    if entry.supports_image {
        module.identifier().to_string()
    } else {
        "exporter does not import Image".to_string()
    }
}
