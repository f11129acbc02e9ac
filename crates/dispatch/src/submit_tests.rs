// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lab_core::SequentialIdGen;
use serde_json::json;
use yare::parameterized;

const BBB: &str = "\
hostname: bbb-01
device_type: beaglebone-black
driver:
  kind: pdu
  config:
    power_on: pdu-ctl on 4
    power_off: pdu-ctl off 4
actions:
  deploy:
    methods: [tftp, nfs]
  boot:
    methods:
      - method: u-boot
        commands: ramdisk
";

#[test]
fn device_splits_identity_driver_and_parameters() {
    let device = load_device(BBB).unwrap();
    assert_eq!(device.hostname, "bbb-01");
    assert_eq!(device.device_type.as_deref(), Some("beaglebone-black"));

    let driver = device.driver.as_ref().unwrap();
    assert_eq!(driver.kind, "pdu");
    let config: Value = serde_json::from_str(&driver.config).unwrap();
    assert_eq!(config["power_on"], "pdu-ctl on 4");

    assert_eq!(device.parameters.keys().collect::<Vec<_>>(), ["actions"]);
    assert_eq!(device.declared_methods("deploy"), ["tftp", "nfs"]);
}

#[test]
fn driver_config_text_is_kept_verbatim() {
    let device = load_device("hostname: x\ndriver:\n  kind: pdu\n  config: '{bad json'\n").unwrap();
    assert_eq!(device.driver.unwrap().config, "{bad json");
}

#[test]
fn driver_without_config_is_empty() {
    let device = load_device("hostname: x\ndriver: {kind: 'null'}\n").unwrap();
    assert_eq!(device.driver.unwrap().config, "");
}

#[parameterized(
    not_mapping = { "- a\n" },
    no_hostname = { "device_type: x\n" },
    empty_hostname = { "hostname: ''\n" },
    numeric_type = { "hostname: x\ndevice_type: 4\n" },
    driver_scalar = { "hostname: x\ndriver: pdu\n" },
    driver_no_kind = { "hostname: x\ndriver: {config: ''}\n" },
)]
fn bad_devices_are_rejected(text: &str) {
    let err = load_device(text).unwrap_err();
    assert_eq!(err.kind(), "device");
    assert_eq!(err.line(), None);
}

#[test]
fn device_syntax_errors_are_parse_errors() {
    assert_eq!(load_device("hostname: [x\n").unwrap_err().kind(), "parse");
}

#[test]
fn submit_returns_compiled_job() {
    let compiler = JobCompiler::with_id_gen(SequentialIdGen::default());
    let device = load_device(BBB).unwrap();
    let text = "\
actions:
  - deploy:
      to: tftp
      kernel:
        url: http://images/zImage
  - boot:
      method: u-boot
";
    let job = submit(&compiler, text, &device, &CompileOptions::default()).unwrap();
    assert_eq!(job.id().to_string(), "job-1");
    let boot = &job.pipeline().actions()[1];
    assert_eq!(boot.name, "uboot-action");
    // `commands` came from the device's first boot method
    assert_eq!(boot.parameters["commands"], json!("ramdisk"));
}

#[test]
fn submit_reduces_errors_to_diagnostics() {
    let compiler = JobCompiler::with_id_gen(SequentialIdGen::default());
    let device = load_device(BBB).unwrap();
    let text = "actions:\n  - deploy:\n      to: tmpfs\n";
    let diagnostic = submit(&compiler, text, &device, &CompileOptions::default()).unwrap_err();
    assert_eq!(diagnostic.kind, "selection");
    assert_eq!(diagnostic.line, Some(2));
    assert!(diagnostic.message.starts_with("no deploy strategy"), "{diagnostic}");
}

#[test]
fn runaway_aliases_are_rejected_before_compiling() {
    let compiler = JobCompiler::with_id_gen(SequentialIdGen::default());
    let device = load_device(BBB).unwrap();
    let mut text = String::from("x0: &x0 [a, b, c, d, e, f, g, h, i]\n");
    for i in 1..=5 {
        let refs = vec![format!("*x{}", i - 1); 10].join(", ");
        text.push_str(&format!("x{i}: &x{i} [{refs}]\n"));
    }
    text.push_str("actions: []\n");

    let diagnostic = submit(&compiler, &text, &device, &CompileOptions::default()).unwrap_err();
    assert_eq!(diagnostic.kind, "parse");
    assert!(diagnostic.message.contains("aliases expand"), "{diagnostic}");
}
