// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::pipeline::Pipeline;
use super::{TestShell, Tmpfs};
use crate::strategy::{BuildError, Intent, Strategy, StrategyRegistry};
use lab_core::{Device, Params};
use serde_json::{json, Value};
use yare::parameterized;

fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("not a mapping: {other}"),
    }
}

fn device(actions: Value) -> Device {
    Device::new("board-01").with_parameters(params(json!({ "actions": actions })))
}

fn selected(device: &Device, intent: Intent, job: Value) -> &'static str {
    let registry = StrategyRegistry::with_defaults();
    registry
        .select(intent, device, &params(job))
        .map(|s| s.name())
        .unwrap()
}

fn child_names(pipeline: &Pipeline) -> Vec<&str> {
    pipeline.actions()[0]
        .children()
        .iter()
        .map(|a| a.name.as_str())
        .collect()
}

#[parameterized(
    tmpfs = { Intent::Deploy, json!({"to": "tmpfs"}), "tmpfs" },
    qemu = { Intent::Boot, json!({"method": "qemu"}), "qemu" },
    ssh = { Intent::Boot, json!({"method": "ssh"}), "ssh" },
    shell = { Intent::Test, json!({"definitions": []}), "lava-test-shell" },
    monitor = { Intent::Test, json!({"monitors": []}), "lava-test-monitor" },
)]
fn undeclared_device_allows_generic_methods(intent: Intent, job: Value, expected: &str) {
    assert_eq!(selected(&Device::new("qemu-01"), intent, job), expected);
}

#[parameterized(
    tftp = { Intent::Deploy, json!({"to": "tftp"}) },
    nfs = { Intent::Deploy, json!({"to": "nfs"}) },
    uboot = { Intent::Boot, json!({"method": "u-boot"}) },
)]
fn hardware_methods_need_declaration(intent: Intent, job: Value) {
    let registry = StrategyRegistry::with_defaults();
    let err = registry
        .select(intent, &Device::new("qemu-01"), &params(job))
        .map(|s| s.name())
        .unwrap_err();
    assert!(err.to_string().contains("no"), "{err}");
}

#[test]
fn declared_methods_restrict_generic_strategies() {
    let device = device(json!({"deploy": {"methods": ["tftp"]}}));
    let registry = StrategyRegistry::with_defaults();
    assert!(registry
        .select(Intent::Deploy, &device, &params(json!({"to": "tmpfs"})))
        .is_err());
    assert_eq!(selected(&device, Intent::Deploy, json!({"to": "tftp"})), "tftp");
}

#[test]
fn definitions_and_monitors_together_are_ambiguous() {
    let registry = StrategyRegistry::with_defaults();
    let job = params(json!({"definitions": [], "monitors": []}));
    let err = registry
        .select(Intent::Test, &Device::new("qemu-01"), &job)
        .map(|s| s.name())
        .unwrap_err();
    assert!(err.to_string().contains("ambiguous"), "{err}");
}

#[test]
fn tmpfs_downloads_each_image() {
    let registry = StrategyRegistry::with_defaults();
    let job = params(json!({
        "to": "tmpfs",
        "images": {
            "rootfs": {"url": "http://images/rootfs.img"},
            "kernel": {"url": "http://images/vmlinuz"},
        },
        "deployment_data": {"distro": "oe"},
    }));
    let device = Device::new("qemu-01");
    let strategy = registry.select(Intent::Deploy, &device, &job).unwrap();

    let mut pipeline = Pipeline::new();
    let root = strategy.build(&mut pipeline, job).unwrap();
    assert_eq!(root.name, "deployimages");
    assert_eq!(
        child_names(&pipeline),
        ["download-retry", "download-retry", "deploy-device-env"]
    );
    let env = &pipeline.actions()[0].children()[2];
    assert_eq!(env.parameters["deployment_data"], json!({"distro": "oe"}));
}

#[parameterized(
    missing = { json!({"to": "tmpfs"}), BuildError::MissingParameter("images") },
    not_mapping = { json!({"to": "tmpfs", "images": ["a"]}), BuildError::InvalidParameter {
        key: "images",
        reason: "must be a mapping of image names".to_string(),
    } },
    no_url = { json!({"to": "tmpfs", "images": {"rootfs": {}}}), BuildError::InvalidParameter {
        key: "images",
        reason: "image 'rootfs' has no url".to_string(),
    } },
    bad_type = { json!({"to": "tmpfs", "images": {"r": {"url": "u"}}, "type": "disk"}),
        BuildError::InvalidParameter { key: "type", reason: "must be 'monitor'".to_string() } },
)]
fn tmpfs_rejects_bad_images(job: Value, expected: BuildError) {
    let mut pipeline = Pipeline::new();
    let err = super::Tmpfs.build(&mut pipeline, params(job)).map(|_| ()).unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn tftp_downloads_present_artifacts_only() {
    let mut pipeline = Pipeline::new();
    let job = params(json!({
        "to": "tftp",
        "kernel": {"url": "http://images/zImage"},
        "dtb": {"url": "http://images/board.dtb"},
    }));
    super::Tftp.build(&mut pipeline, job).unwrap();
    assert_eq!(
        child_names(&pipeline),
        ["download-retry", "download-retry", "prepare-tftp-overlay", "deploy-device-env"]
    );
    let keys: Vec<_> = pipeline.actions()[0].children()[..2]
        .iter()
        .map(|a| a.parameters["key"].clone())
        .collect();
    assert_eq!(keys, [json!("kernel"), json!("dtb")]);
}

#[test]
fn tftp_requires_kernel() {
    let mut pipeline = Pipeline::new();
    let err = super::Tftp
        .build(&mut pipeline, params(json!({"to": "tftp"})))
        .map(|_| ())
        .unwrap_err();
    assert_eq!(err, BuildError::MissingParameter("kernel"));
    assert!(pipeline.is_empty());
}

#[test]
fn uboot_nests_retry_actions() {
    let mut pipeline = Pipeline::new();
    let job = params(json!({"method": "u-boot", "commands": "ramdisk", "prompts": ["# "]}));
    super::UBoot.build(&mut pipeline, job).unwrap();
    assert_eq!(
        child_names(&pipeline),
        ["bootloader-overlay", "connect-device", "uboot-retry"]
    );
    let retry: Vec<_> = pipeline.actions()[0].children()[2]
        .children()
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(
        retry,
        ["reset-device", "bootloader-interrupt", "bootloader-commands", "expect-shell-connection"]
    );
}

#[test]
fn qemu_adds_login_only_when_asked() {
    let mut pipeline = Pipeline::new();
    super::Qemu
        .build(&mut pipeline, params(json!({"method": "qemu"})))
        .unwrap();
    assert_eq!(child_names(&pipeline), ["execute-qemu"]);

    let mut pipeline = Pipeline::new();
    let job = params(json!({"method": "qemu", "auto_login": {"login_prompt": "login:"}, "prompts": ["$ "]}));
    super::Qemu.build(&mut pipeline, job).unwrap();
    assert_eq!(
        child_names(&pipeline),
        ["execute-qemu", "auto-login-action", "expect-shell-connection"]
    );
}

#[parameterized(
    git_default = { json!({"name": "smoke"}), "git-repo-action" },
    inline = { json!({"name": "smoke", "from": "inline"}), "inline-repo-action" },
    url = { json!({"name": "smoke", "from": "url"}), "url-repo-action" },
)]
fn test_shell_fetches_by_source(definition: Value, repo: &str) {
    let mut pipeline = Pipeline::new();
    let job = params(json!({"definitions": [definition]}));
    super::TestShell.build(&mut pipeline, job).unwrap();
    assert_eq!(child_names(&pipeline), [repo, "lava-test-shell"]);
}

#[test]
fn test_shell_rejects_unknown_source() {
    let mut pipeline = Pipeline::new();
    let job = params(json!({"definitions": [{"name": "smoke", "from": "ftp"}]}));
    let err = super::TestShell.build(&mut pipeline, job).map(|_| ()).unwrap_err();
    assert!(err.to_string().contains("unknown source 'ftp'"), "{err}");
}

#[test]
fn monitor_requires_markers() {
    let mut pipeline = Pipeline::new();
    let job = params(json!({"monitors": [{"name": "boot", "start": "BOOT"}]}));
    let err = super::TestMonitor.build(&mut pipeline, job).map(|_| ()).unwrap_err();
    assert_eq!(
        err,
        BuildError::InvalidParameter {
            key: "monitors",
            reason: "every monitor needs 'name', 'start' and 'end'".to_string(),
        }
    );
}

#[test]
fn monitor_builds_one_child_per_monitor() {
    let mut pipeline = Pipeline::new();
    let job = params(json!({"monitors": [
        {"name": "boot", "start": "BOOT", "end": "DONE"},
        {"name": "net", "start": "NET", "end": "UP"},
    ]}));
    super::TestMonitor.build(&mut pipeline, job).unwrap();
    assert_eq!(child_names(&pipeline), ["lava-test-monitor", "lava-test-monitor"]);
    assert_eq!(pipeline.actions()[0].children()[1].summary, "monitor net");
}
