// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end compilation: device text and job text to a described pipeline

#![allow(clippy::unwrap_used)]

use lab_core::SequentialIdGen;
use lab_dispatch::{load_device, submit, CompileOptions, JobCompiler, JobError};

const QEMU_DEVICE: &str = "\
hostname: qemu-01
device_type: qemu
actions:
  boot:
    prompts: ['root@qemu:~# ']
";

const QEMU_JOB: &str = "\
job_name: qemu smoke test
timeouts:
  job:
    minutes: 15

actions:

  - deploy:
      to: tmpfs
      os: debian
      images:
        rootfs:
          url: http://images.example/debian.img

  - boot:
      method: qemu
      timeout:
        minutes: 2

  - test:
      definitions:
        - name: smoke
          from: inline
        - name: network
          repository: https://git.example/tests.git

  - submit:
      stream: /anonymous/qemu/
";

fn line_of(text: &str, needle: &str) -> usize {
    text.lines().position(|l| l.contains(needle)).unwrap() + 1
}

#[test]
fn qemu_job_compiles_and_describes() {
    let device = load_device(QEMU_DEVICE).unwrap();
    let compiler = JobCompiler::with_id_gen(SequentialIdGen::new("qemu"));
    let job = submit(&compiler, QEMU_JOB, &device, &CompileOptions::default()).unwrap();

    let roots: Vec<_> = job.pipeline().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        roots,
        ["deployimages", "boot-qemu-image", "lava-test-retry", "submit", "finalize"]
    );

    let describe = job.pipeline().describe();
    let levels: Vec<_> = describe.iter().map(|d| d.level.as_str()).collect();
    assert_eq!(
        levels,
        [
            "1", "1.1", "1.2", "2", "2.1", "2.2", "3", "3.1", "3.2", "3.3", "4", "5", "5.1", "5.2"
        ]
    );

    // Runtime log lines map back to the entries that produced them
    for (needle, name) in [
        ("- deploy:", "deployimages"),
        ("- boot:", "boot-qemu-image"),
        ("- test:", "lava-test-retry"),
        ("- submit:", "submit"),
    ] {
        let action = job.pipeline().find_by_line(line_of(QEMU_JOB, needle)).unwrap();
        assert_eq!(action.name, name);
    }

    let boot = &job.pipeline().actions()[1];
    assert_eq!(boot.parameters["prompts"][0], "root@qemu:~# ");
    assert_eq!(boot.timeout.map(|t| t.as_secs()), Some(120));
    assert_eq!(job.job_timeout().map(|t| t.as_secs()), Some(900));
    assert_eq!(job.job_name(), Some("qemu smoke test"));
}

#[test]
fn compiled_job_serializes_without_provenance_keys() {
    let device = load_device(QEMU_DEVICE).unwrap();
    let compiler = JobCompiler::with_id_gen(SequentialIdGen::new("qemu"));
    let job = compiler
        .compile_str(QEMU_JOB, &device, &CompileOptions::default())
        .unwrap();

    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["id"], "qemu-1");
    assert_eq!(json["timeout"], "15m");
    assert_eq!(json["pipeline"][1]["timeout"], "2m");
    let deploy = &json["pipeline"][0];
    assert_eq!(deploy["source_line"], line_of(QEMU_JOB, "- deploy:"));
    assert!(deploy["parameters"].get("source_line").is_none());
    assert!(deploy["parameters"]["images"]["rootfs"].get("source_line").is_none());
}

#[test]
fn parse_errors_point_at_the_document() {
    let device = load_device(QEMU_DEVICE).unwrap();
    let err = JobCompiler::new()
        .compile_str("actions:\n  - deploy: {to: tmpfs\n", &device, &CompileOptions::default())
        .unwrap_err();
    assert!(matches!(err, JobError::Parse(_)));
    assert!(err.line().is_some());
}
