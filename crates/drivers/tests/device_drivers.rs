// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drivers built from device descriptions

#![allow(clippy::unwrap_used)]

use lab_core::Params;
use lab_dispatch::load_device;
use lab_drivers::{ConfigError, DriverRegistry, InterfaceError};
use tempfile::TempDir;

fn device_text(dir: &TempDir) -> String {
    let log = dir.path().join("outlet.log");
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
fn pdu_from_device_switches_outlet() {
    let dir = TempDir::new().unwrap();
    let device = load_device(&device_text(&dir)).unwrap();
    let driver = DriverRegistry::with_defaults()
        .build_spec(device.driver.as_ref().unwrap())
        .unwrap();

    let power = driver.get_interface("power").unwrap();
    power.run_action("power_on", &Params::new()).unwrap();
    power.run_action("hard_reset", &Params::new()).unwrap();

    let log = std::fs::read_to_string(dir.path().join("outlet.log")).unwrap();
    assert_eq!(log.lines().collect::<Vec<_>>(), ["on", "off", "on"]);
}

#[test]
fn members_cannot_be_run_by_name() {
    let dir = TempDir::new().unwrap();
    let device = load_device(&device_text(&dir)).unwrap();
    let driver = DriverRegistry::with_defaults()
        .build_spec(device.driver.as_ref().unwrap())
        .unwrap();
    let err = driver
        .get_interface("power")
        .unwrap()
        .run_action("shutdown", &Params::new())
        .unwrap_err();
    assert_eq!(err, InterfaceError::NotAnAction("shutdown".to_string()));
}

#[test]
fn unparsable_config_text_fails_at_construction() {
    let device = load_device("hostname: x\ndriver:\n  kind: 'null'\n  config: '{bad json'\n").unwrap();
    let err = DriverRegistry::with_defaults()
        .build_spec(device.driver.as_ref().unwrap())
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidJson(_)));
}
