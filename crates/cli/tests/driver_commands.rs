// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for driver interfaces and power actions

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{Lab, QEMU_DEVICE};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn pdu_device(log: &Path) -> String {
    format!(
        "\
hostname: bbb-01
driver:
  kind: pdu
  config:
    power_on: echo on >> {log}
    power_off: echo off >> {log}
",
        log = log.display()
    )
}

#[test]
fn test_interfaces_lists_power_actions() {
    let lab = Lab::new();
    let device = lab.file("bbb.yaml", &pdu_device(&lab.path().join("outlet.log")));

    lab.lab()
        .arg("interfaces")
        .arg("--device")
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("power: power_on, power_off, hard_reset"))
        .stdout(predicate::str::contains("shutdown").not());
}

#[test]
fn test_interfaces_requires_driver() {
    let lab = Lab::new();
    let device = lab.file("qemu.yaml", QEMU_DEVICE);

    lab.lab()
        .arg("interfaces")
        .arg("--device")
        .arg(&device)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("device 'qemu-01' has no driver"));
}

#[test]
fn test_null_driver_has_no_interfaces() {
    let lab = Lab::new();
    let device = lab.file("qemu.yaml", "hostname: qemu-01\ndriver:\n  kind: 'null'\n");

    lab.lab()
        .arg("interfaces")
        .arg("--device")
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("driver 'null' has no interfaces"));
}

#[test]
fn test_emulated_driver_resets_without_hardware() {
    let lab = Lab::new();
    let device = lab.file("qemu.yaml", "hostname: qemu-01\ndriver:\n  kind: emulated\n");

    lab.lab()
        .arg("power")
        .arg("--device")
        .arg(&device)
        .arg("power")
        .arg("hard_reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("power.hard_reset: ok"));
}

#[test]
fn test_power_runs_configured_command() {
    let lab = Lab::new();
    let log = lab.path().join("outlet.log");
    let device = lab.file("bbb.yaml", &pdu_device(&log));

    lab.lab()
        .args(["power", "power", "hard_reset", "--device"])
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("power.hard_reset: ok"));

    let switched = fs::read_to_string(&log).unwrap();
    assert_eq!(switched.lines().collect::<Vec<_>>(), ["off", "on"]);
}

#[test]
fn test_power_refuses_untagged_member() {
    let lab = Lab::new();
    let log = lab.path().join("outlet.log");
    let device = lab.file("bbb.yaml", &pdu_device(&log));

    lab.lab()
        .args(["power", "power", "shutdown", "--device"])
        .arg(&device)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'shutdown' is not an action"))
        .stderr(predicate::str::contains("lab interfaces --device"));
    assert!(!log.exists());
}

#[test]
fn test_power_unknown_interface() {
    let lab = Lab::new();
    let device = lab.file("bbb.yaml", &pdu_device(&lab.path().join("outlet.log")));

    lab.lab()
        .args(["power", "relay", "close", "--device"])
        .arg(&device)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "interface 'relay' not implemented by this driver",
        ));
}

#[test]
fn test_bad_driver_config_is_reported() {
    let lab = Lab::new();
    let device = lab.file(
        "bbb.yaml",
        "hostname: bbb-01\ndriver:\n  kind: pdu\n  config: '{bad json'\n",
    );

    lab.lab()
        .arg("interfaces")
        .arg("--device")
        .arg(&device)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid JSON"));
}
