// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boot strategies

use super::{method_priority, Support};
use crate::action::ActionNode;
use crate::pipeline::Pipeline;
use crate::strategy::{BuildError, Intent, Strategy};
use lab_core::params::shape_name;
use lab_core::{Device, Params};

fn shell_connection(params: &Params) -> ActionNode {
    let mut node = ActionNode::new("expect-shell-connection", "wait for a shell prompt");
    if let Some(prompts) = params.get("prompts") {
        let mut expect = Params::new();
        expect.insert("prompts".to_string(), prompts.clone());
        node = node.with_parameters(expect);
    }
    node
}

fn login(params: &Params, mut root: ActionNode) -> ActionNode {
    if params.contains_key("auto_login") {
        root = root.with_child(ActionNode::new("auto-login-action", "log in on the console"));
    }
    if params.contains_key("prompts") {
        root = root.with_child(shell_connection(params));
    }
    root
}

/// Start the deployed image under a qemu process
pub struct Qemu;

impl Strategy for Qemu {
    fn name(&self) -> &'static str {
        "qemu"
    }

    fn intent(&self) -> Intent {
        Intent::Boot
    }

    fn priority(&self, device: &Device, params: &Params) -> u32 {
        method_priority(device, Intent::Boot, params, "method", "qemu", Support::Implicit)
    }

    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError> {
        if let Some(media) = params.get("media") {
            if media.as_str() != Some("tmpfs") {
                return Err(BuildError::InvalidParameter {
                    key: "media",
                    reason: "must be 'tmpfs'".to_string(),
                });
            }
        }
        let root = ActionNode::new("boot-qemu-image", "boot image with qemu")
            .with_child(ActionNode::new("execute-qemu", "run qemu"));
        let root = login(&params, root);
        Ok(pipeline.add_action(root.with_parameters(params)))
    }
}

/// Interrupt u-boot and feed it boot commands over the serial console
pub struct UBoot;

impl Strategy for UBoot {
    fn name(&self) -> &'static str {
        "u-boot"
    }

    fn intent(&self) -> Intent {
        Intent::Boot
    }

    fn priority(&self, device: &Device, params: &Params) -> u32 {
        method_priority(device, Intent::Boot, params, "method", "u-boot", Support::Declared)
    }

    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError> {
        let commands = params
            .get("commands")
            .ok_or(BuildError::MissingParameter("commands"))?;
        if !(commands.is_string() || commands.is_array()) {
            return Err(BuildError::InvalidParameter {
                key: "commands",
                reason: "must be a command set name or a list of commands".to_string(),
            });
        }

        let retry = ActionNode::new("uboot-retry", "interrupt u-boot and boot")
            .with_child(ActionNode::new("reset-device", "power cycle the device"))
            .with_child(ActionNode::new("bootloader-interrupt", "stop autoboot"))
            .with_child(ActionNode::new("bootloader-commands", "send boot commands"));
        let retry = login(&params, retry);

        let root = ActionNode::new("uboot-action", "boot via u-boot")
            .with_child(ActionNode::new("bootloader-overlay", "substitute boot command values"))
            .with_child(ActionNode::new("connect-device", "open the serial connection"))
            .with_child(retry);
        Ok(pipeline.add_action(root.with_parameters(params)))
    }
}

/// Log in to an already running system over ssh
pub struct Ssh;

impl Strategy for Ssh {
    fn name(&self) -> &'static str {
        "ssh"
    }

    fn intent(&self) -> Intent {
        Intent::Boot
    }

    fn priority(&self, device: &Device, params: &Params) -> u32 {
        method_priority(device, Intent::Boot, params, "method", "ssh", Support::Implicit)
    }

    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError> {
        if let Some(user) = params.get("user") {
            if !user.is_string() {
                return Err(BuildError::InvalidParameter {
                    key: "user",
                    reason: format!("must be a string, found {}", shape_name(user)),
                });
            }
        }
        let root = ActionNode::new("login-ssh", "connect over ssh")
            .with_child(ActionNode::new("scp-overlay", "copy overlay to the device"))
            .with_child(ActionNode::new("prepare-ssh", "prepare ssh connection"))
            .with_child(shell_connection(&params));
        Ok(pipeline.add_action(root.with_parameters(params)))
    }
}
