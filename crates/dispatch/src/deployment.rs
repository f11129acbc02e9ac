// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-OS deployment constants
//!
//! Attached to every deploy action as `deployment_data` so later actions
//! know which shell, directories and tar flags the deployed system uses.
//! `%s` in the directory templates is replaced by the job id at runtime.

use lab_core::Params;
use serde::Serialize;
use serde_json::Value;

/// OS assumed when a deploy entry does not name one
pub const DEFAULT_OS: &str = "oe";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeploymentData {
    pub distro: &'static str,
    pub lava_test_sh_cmd: &'static str,
    pub lava_test_dir: &'static str,
    pub lava_test_results_dir: &'static str,
    pub tar_flags: &'static str,
    pub line_separator: &'static str,
}

impl DeploymentData {
    pub fn to_params(&self) -> Params {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Params::new(),
        }
    }
}

const GNU_LINUX: DeploymentData = DeploymentData {
    distro: "",
    lava_test_sh_cmd: "/bin/bash",
    lava_test_dir: "/lava-%s",
    lava_test_results_dir: "/lava-%s",
    tar_flags: "--warning no-timestamp",
    line_separator: "\n",
};

const TABLE: [DeploymentData; 6] = [
    DeploymentData {
        distro: "oe",
        lava_test_sh_cmd: "/bin/sh",
        ..GNU_LINUX
    },
    DeploymentData {
        distro: "debian",
        ..GNU_LINUX
    },
    DeploymentData {
        distro: "ubuntu",
        ..GNU_LINUX
    },
    DeploymentData {
        distro: "fedora",
        tar_flags: "",
        ..GNU_LINUX
    },
    DeploymentData {
        distro: "centos",
        tar_flags: "",
        ..GNU_LINUX
    },
    DeploymentData {
        distro: "android",
        lava_test_sh_cmd: "/system/bin/sh",
        lava_test_dir: "/data/local/tmp/lava-%s",
        lava_test_results_dir: "/data/local/tmp/lava-%s",
        tar_flags: "",
        line_separator: "\r\n",
    },
];

/// Deployment constants for an OS identifier
pub fn get_deployment_data(os: &str) -> Option<DeploymentData> {
    TABLE.iter().find(|data| data.distro == os).copied()
}

/// Every supported OS identifier
pub fn supported_os() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|data| data.distro)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        oe = { "oe", "/bin/sh" },
        debian = { "debian", "/bin/bash" },
        android = { "android", "/system/bin/sh" },
    )]
    fn shell_per_os(os: &str, shell: &str) {
        let data = get_deployment_data(os).unwrap();
        assert_eq!(data.distro, os);
        assert_eq!(data.lava_test_sh_cmd, shell);
    }

    #[test]
    fn unknown_os_has_no_data() {
        assert_eq!(get_deployment_data("plan9"), None);
        assert_eq!(get_deployment_data(""), None);
    }

    #[test]
    fn default_os_is_supported() {
        assert!(supported_os().any(|os| os == DEFAULT_OS));
    }

    #[test]
    fn params_carry_every_field() {
        let params = get_deployment_data("ubuntu").unwrap().to_params();
        assert_eq!(params["distro"], "ubuntu");
        assert_eq!(params.len(), 6);
    }
}
