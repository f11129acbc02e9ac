// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deploy strategies

use super::{artifact_url, device_env, download, method_priority, Support};
use crate::action::ActionNode;
use crate::pipeline::Pipeline;
use crate::strategy::{BuildError, Intent, Strategy};
use lab_core::params::str_param;
use lab_core::{Device, Params};
use serde_json::Value;

/// Images downloaded into a tmpfs and booted from there (e.g. by qemu)
pub struct Tmpfs;

impl Strategy for Tmpfs {
    fn name(&self) -> &'static str {
        "tmpfs"
    }

    fn intent(&self) -> Intent {
        Intent::Deploy
    }

    fn priority(&self, device: &Device, params: &Params) -> u32 {
        method_priority(device, Intent::Deploy, params, "to", "tmpfs", Support::Implicit)
    }

    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError> {
        let images = params
            .get("images")
            .ok_or(BuildError::MissingParameter("images"))?
            .as_object()
            .ok_or_else(|| BuildError::InvalidParameter {
                key: "images",
                reason: "must be a mapping of image names".to_string(),
            })?;
        if images.is_empty() {
            return Err(BuildError::InvalidParameter {
                key: "images",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(kind) = params.get("type") {
            if kind.as_str() != Some("monitor") {
                return Err(BuildError::InvalidParameter {
                    key: "type",
                    reason: "must be 'monitor'".to_string(),
                });
            }
        }

        let mut root = ActionNode::new("deployimages", "deploy images to tmpfs");
        for (name, image) in images {
            let url = image.get("url").and_then(Value::as_str).ok_or_else(|| {
                BuildError::InvalidParameter {
                    key: "images",
                    reason: format!("image '{}' has no url", name),
                }
            })?;
            root = root.with_child(download(name, url));
        }
        if let Some(url) = artifact_url(&params, "uefi")? {
            root = root.with_child(download("uefi", url));
        }
        root = root.with_child(device_env(&params));

        Ok(pipeline.add_action(root.with_parameters(params)))
    }
}

/// Kernel and friends served over TFTP to a bootloader
pub struct Tftp;

const TFTP_ARTIFACTS: [&str; 5] = ["kernel", "ramdisk", "dtb", "modules", "nfsrootfs"];

impl Strategy for Tftp {
    fn name(&self) -> &'static str {
        "tftp"
    }

    fn intent(&self) -> Intent {
        Intent::Deploy
    }

    fn priority(&self, device: &Device, params: &Params) -> u32 {
        method_priority(device, Intent::Deploy, params, "to", "tftp", Support::Declared)
    }

    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError> {
        if !params.contains_key("kernel") {
            return Err(BuildError::MissingParameter("kernel"));
        }

        let mut root = ActionNode::new("tftp-deploy", "download files for tftp boot");
        for key in TFTP_ARTIFACTS {
            if let Some(url) = artifact_url(&params, key)? {
                root = root.with_child(download(key, url));
            }
        }
        if params.contains_key("nfsrootfs") {
            root = root.with_child(ActionNode::new("extract-nfsrootfs", "unpack nfs root"));
        }
        root = root
            .with_child(ActionNode::new("prepare-tftp-overlay", "extract overlay into tftp tree"))
            .with_child(device_env(&params));

        Ok(pipeline.add_action(root.with_parameters(params)))
    }
}

/// Root filesystem exported over NFS
pub struct Nfs;

impl Strategy for Nfs {
    fn name(&self) -> &'static str {
        "nfs"
    }

    fn intent(&self) -> Intent {
        Intent::Deploy
    }

    fn priority(&self, device: &Device, params: &Params) -> u32 {
        method_priority(device, Intent::Deploy, params, "to", "nfs", Support::Declared)
    }

    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError> {
        let url = artifact_url(&params, "nfsrootfs")?
            .ok_or(BuildError::MissingParameter("nfsrootfs"))?;

        let mut root = ActionNode::new("nfs-deploy", "deploy nfs root filesystem")
            .with_child(download("nfsrootfs", url))
            .with_child(ActionNode::new("extract-nfsrootfs", "unpack nfs root"));
        if str_param(&params, "compression").is_some() {
            root = root.with_child(ActionNode::new("decompress-nfsrootfs", "decompress nfs root"));
        }
        root = root.with_child(device_env(&params));

        Ok(pipeline.add_action(root.with_parameters(params)))
    }
}
