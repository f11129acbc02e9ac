// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in strategies
//!
//! All registration happens in [`register_defaults`]; nothing registers
//! itself. A strategy chosen by a method key (`to` for deploy, `method`
//! for boot) is inapplicable when the device declares methods for that
//! intent and this method is not among them. Strategies for methods that
//! need device support (tftp, nfs, u-boot) also require the device to
//! declare them.

mod boot;
mod deploy;

pub use boot::{Qemu, Ssh, UBoot};
pub use deploy::{Nfs, Tftp, Tmpfs};
pub use test::{TestMonitor, TestShell};

use crate::action::ActionNode;
use crate::strategy::{BuildError, Intent, StrategyRegistry};
use lab_core::params::{shape_name, str_param};
use lab_core::{Device, Params};
use serde_json::Value;

pub(crate) fn register_defaults(registry: &mut StrategyRegistry) {
    registry
        .register(Tmpfs)
        .register(Tftp)
        .register(Nfs)
        .register(Qemu)
        .register(UBoot)
        .register(Ssh)
        .register(TestShell)
        .register(TestMonitor);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Support {
    /// Usable unless the device declares other methods
    Implicit,
    /// The device must declare the method
    Declared,
}

fn method_priority(
    device: &Device,
    intent: Intent,
    params: &Params,
    key: &str,
    method: &str,
    support: Support,
) -> u32 {
    if str_param(params, key) != Some(method) {
        return 0;
    }
    let usable = match support {
        Support::Implicit => device.allows_method(intent.name(), method),
        Support::Declared => device.declares_method(intent.name(), method),
    };
    u32::from(usable)
}

/// URL of an artifact parameter shaped `{url: ...}`, if present
fn artifact_url<'a>(params: &'a Params, key: &'static str) -> Result<Option<&'a str>, BuildError> {
    let Some(artifact) = params.get(key) else {
        return Ok(None);
    };
    artifact
        .get("url")
        .and_then(Value::as_str)
        .map(Some)
        .ok_or_else(|| BuildError::InvalidParameter {
            key,
            reason: format!("must be a mapping with a 'url', found {}", shape_name(artifact)),
        })
}

/// Non-empty sequence of mappings under `key`
fn mapping_list<'a>(
    params: &'a Params,
    key: &'static str,
) -> Result<Vec<&'a Params>, BuildError> {
    let items = params
        .get(key)
        .ok_or(BuildError::MissingParameter(key))?
        .as_array()
        .ok_or_else(|| BuildError::InvalidParameter {
            key,
            reason: "must be a sequence".to_string(),
        })?;
    if items.is_empty() {
        return Err(BuildError::InvalidParameter {
            key,
            reason: "must not be empty".to_string(),
        });
    }
    items
        .iter()
        .map(|item| {
            item.as_object().ok_or_else(|| BuildError::InvalidParameter {
                key,
                reason: format!("entries must be mappings, found {}", shape_name(item)),
            })
        })
        .collect()
}

fn download(key: &str, url: &str) -> ActionNode {
    let mut params = Params::new();
    params.insert("key".to_string(), Value::from(key));
    params.insert("url".to_string(), Value::from(url));
    ActionNode::new("download-retry", format!("download {}", key)).with_parameters(params)
}

fn device_env(params: &Params) -> ActionNode {
    let mut env = Params::new();
    if let Some(data) = params.get("deployment_data") {
        env.insert("deployment_data".to_string(), data.clone());
    }
    ActionNode::new("deploy-device-env", "export device environment").with_parameters(env)
}

#[cfg(test)]
#[path = "strategies_tests.rs"]
mod tests;
