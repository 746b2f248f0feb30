// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probe tests against adapters namespaces laid out on disk.

use std::collections::BTreeSet;

use anansay_config::model::ProbeConfig;
use anansay_plugin::{
    AdapterProbe, DirectoryNamespace, ExporterReader, check_adapter_support, resolve_namespace,
};
use anansay_test_utils::{AdaptersFixture, exporter_source};
use tracing_test::traced_test;

fn probe(fixture: &AdaptersFixture) -> AdapterProbe<DirectoryNamespace> {
    AdapterProbe::new(DirectoryNamespace::new(fixture.adapters_dir()))
}

/// Private sub-packages are skipped, registered image exporters count and
/// packages without an exporter contribute nothing.
#[test]
fn scenario_private_registered_and_missing_exporter() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("telegram", exporter_source::IMAGE)
        .with_exporter("_internal", exporter_source::IMAGE)
        .with_package("discord")
        .build()
        .unwrap();

    let reader = ExporterReader::new(DirectoryNamespace::new(fixture.adapters_dir()));
    let exporters = reader.read_adapter_exporters();
    assert_eq!(exporters.keys().collect::<Vec<_>>(), vec!["telegram"]);

    let supported = probe(&fixture).get_supported_adapters();
    assert_eq!(
        supported,
        BTreeSet::from(["nonebot-adapter-telegram".to_string()])
    );
}

#[test]
fn scenario_wrong_module_is_excluded() {
    assert!(!check_adapter_support(exporter_source::WRONG_MODULE));

    let fixture = AdaptersFixture::builder()
        .with_exporter("qq", exporter_source::WRONG_MODULE)
        .build()
        .unwrap();
    assert!(probe(&fixture).get_supported_adapters().is_empty());
}

#[test]
fn scenario_wildcard_import_passes() {
    assert!(check_adapter_support(exporter_source::WILDCARD));

    let fixture = AdaptersFixture::builder()
        .with_exporter("satori", exporter_source::WILDCARD)
        .build()
        .unwrap();
    assert!(
        probe(&fixture)
            .get_supported_adapters()
            .contains("nonebot-adapter-satori")
    );
}

#[test]
fn unregistered_sub_package_is_ignored() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("homebrew", exporter_source::IMAGE)
        .build()
        .unwrap();
    assert!(probe(&fixture).get_supported_adapters().is_empty());
}

#[test]
fn broken_and_text_only_exporters_are_excluded() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("kook", exporter_source::BROKEN)
        .with_exporter("kritor", exporter_source::MISSING_BLOCK)
        .with_exporter("mail", exporter_source::TEXT_ONLY)
        .with_exporter("feishu", exporter_source::IMAGE)
        .with_bare_dir("dodo")
        .with_module("mirai")
        .build()
        .unwrap();

    assert_eq!(
        probe(&fixture).get_supported_adapters(),
        BTreeSet::from(["nonebot-adapter-feishu".to_string()])
    );
}

#[test]
fn invalid_utf8_exporter_is_still_checked() {
    let mut bytes = exporter_source::IMAGE.as_bytes().to_vec();
    bytes.extend_from_slice(b"# \xff\xfe\n");

    let fixture = AdaptersFixture::builder()
        .with_exporter_bytes("red", &bytes)
        .build()
        .unwrap();
    assert!(
        probe(&fixture)
            .get_supported_adapters()
            .contains("nonebot-adapter-red")
    );
}

#[test]
fn repeated_probes_are_equal() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("onebot11", exporter_source::IMAGE)
        .with_exporter("onebot12", exporter_source::WILDCARD)
        .with_exporter("github", exporter_source::TEXT_ONLY)
        .build()
        .unwrap();

    let probe = probe(&fixture);
    let first = probe.get_supported_adapters();
    let second = probe.get_supported_adapters();
    assert_eq!(first, second);
    assert_eq!(first, BTreeSet::from(["nonebot-adapter-onebot".to_string()]));
}

#[test]
fn probe_sees_exporter_changes_between_calls() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("yunhu", exporter_source::TEXT_ONLY)
        .build()
        .unwrap();
    let probe = probe(&fixture);
    assert!(probe.get_supported_adapters().is_empty());

    fixture.write_exporter("yunhu", exporter_source::IMAGE).unwrap();
    assert!(probe.get_supported_adapters().contains("nonebot-adapter-yunhu"));
}

#[test]
fn missing_namespace_yields_empty_set() {
    let probe = AdapterProbe::new(DirectoryNamespace::new("/nonexistent/site-packages/adapters"));
    assert!(probe.get_supported_adapters().is_empty());
    assert!(probe.report().is_empty());
}

#[test]
fn namespace_resolves_through_site_packages() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("minecraft", exporter_source::IMAGE)
        .build()
        .unwrap();

    let config = ProbeConfig {
        site_packages: vec![fixture.site_packages().display().to_string()],
        ..Default::default()
    };
    let namespace = resolve_namespace(&config).unwrap();
    assert_eq!(namespace.root(), fixture.adapters_dir());
    assert!(
        AdapterProbe::from_config(namespace, &config)
            .get_supported_adapters()
            .contains("nonebot-adapter-minecraft")
    );
}

#[test]
#[traced_test]
fn parse_failures_are_logged_not_raised() {
    let fixture = AdaptersFixture::builder()
        .with_exporter("ding", exporter_source::BROKEN)
        .build()
        .unwrap();

    assert!(probe(&fixture).get_supported_adapters().is_empty());
    assert!(logs_contain("could not be parsed"));
    assert!(logs_contain("adapter capability probe finished"));
}
