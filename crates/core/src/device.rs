// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device descriptions
//!
//! A device is read-only input to the dispatcher: a fixed identity, a
//! parameter mapping, and optionally the driver used for hardware control.
//! Per-intent defaults live under the `actions` key of the parameters:
//!
//! ```text
//! actions:
//!   deploy:
//!     methods: [tmpfs, tftp]
//!   boot:
//!     connection: serial
//!     methods:
//!       - method: u-boot
//!         commands: ramdisk
//!       - qemu
//! ```
//!
//! `methods[count]` holds the defaults for the count-th occurrence (zero
//! based) of that intent in a job. A bare tag marks the occurrence and
//! leaves the intent-level keys (`connection` above) as the defaults; a
//! mapping is used as the defaults directly.

use crate::params::Params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ACTIONS: &str = "actions";
const METHODS: &str = "methods";

/// Which driver controls a device, with its opaque configuration text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSpec {
    /// Driver kind, looked up in the driver registry
    pub kind: String,
    /// Empty, or a JSON document
    #[serde(default)]
    pub config: String,
}

/// A device description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Identity, unique within a lab
    pub hostname: String,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub parameters: Params,
    #[serde(default)]
    pub driver: Option<DriverSpec>,
}

impl Device {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            device_type: None,
            parameters: Params::new(),
            driver: None,
        }
    }

    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Params) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_driver(mut self, driver: DriverSpec) -> Self {
        self.driver = Some(driver);
        self
    }

    /// The device's entry for an intent under `actions`
    pub fn intent_entry(&self, intent: &str) -> Option<&Params> {
        self.parameters
            .get(ACTIONS)?
            .as_object()?
            .get(intent)?
            .as_object()
    }

    /// Method names the device declares for an intent.
    ///
    /// `methods` may be a sequence (of tags, or of mappings naming their
    /// method under `method` or `to`) or a mapping keyed by method name.
    pub fn declared_methods(&self, intent: &str) -> Vec<&str> {
        let Some(methods) = self.intent_entry(intent).and_then(|e| e.get(METHODS)) else {
            return Vec::new();
        };
        match methods {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag.as_str()),
                    Value::Object(map) => map
                        .get("method")
                        .or_else(|| map.get("to"))
                        .and_then(Value::as_str),
                    _ => None,
                })
                .collect(),
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a method is usable for an intent.
    ///
    /// A device that declares no methods for the intent allows any method.
    pub fn allows_method(&self, intent: &str, method: &str) -> bool {
        let declared = self.declared_methods(intent);
        declared.is_empty() || declared.contains(&method)
    }

    /// Whether the device explicitly declares a method for an intent
    pub fn declares_method(&self, intent: &str, method: &str) -> bool {
        self.declared_methods(intent).contains(&method)
    }

    /// Device defaults for the `count`-th occurrence of an intent.
    ///
    /// Counts beyond the configured `methods` yield empty defaults.
    pub fn action_defaults(&self, intent: &str, count: usize) -> Params {
        let Some(entry) = self.intent_entry(intent) else {
            return Params::new();
        };
        let intent_level = || -> Params {
            entry
                .iter()
                .filter(|(key, _)| key.as_str() != METHODS)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        };

        match entry.get(METHODS) {
            Some(Value::Array(methods)) => match methods.get(count) {
                Some(Value::Object(defaults)) => defaults.clone(),
                Some(_) => intent_level(),
                None => {
                    tracing::warn!(
                        device = %self.hostname,
                        intent,
                        count,
                        configured = methods.len(),
                        "no device defaults for this occurrence"
                    );
                    Params::new()
                }
            },
            _ => intent_level(),
        }
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
