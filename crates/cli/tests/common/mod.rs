// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const QEMU_DEVICE: &str = "\
hostname: qemu-01
device_type: qemu
";

pub const BBB_DEVICE: &str = "\
hostname: bbb-01
device_type: beaglebone-black
actions:
  deploy:
    methods: [tftp]
  boot:
    methods:
      - method: u-boot
        commands: ramdisk
";

pub const QEMU_JOB: &str = "\
job_name: qemu smoke
actions:
  - deploy:
      to: tmpfs
      images:
        rootfs:
          url: http://images.example/rootfs.img
  - boot:
      method: qemu
";

/// A scratch directory holding job and device files
pub struct Lab {
    pub dir: TempDir,
}

impl Lab {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write a file into the lab directory and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The `lab` binary isolated from the user's config and log settings
    pub fn lab(&self) -> Command {
        let mut cmd = Command::cargo_bin("lab").expect("lab binary");
        cmd.current_dir(self.dir.path())
            .env_remove("LAB_LOG")
            .env_remove("RUST_LOG")
            .env("LAB_CONFIG", self.file("config.toml", ""));
        cmd
    }
}
