// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Power distribution unit driver
//!
//! Configuration is a JSON object of shell commands:
//!
//! ```text
//! {"power_on": "pdu-ctl on 4", "power_off": "pdu-ctl off 4", "hard_reset": "pdu-ctl reboot 4"}
//! ```
//!
//! At least one command is required.

use crate::config::{ConfigError, DriverConfig};
use crate::driver::{Driver, InterfaceTable};
use crate::interface::{ActionTable, Interface, InterfaceError};
use crate::power::{CommandPowerControl, PowerControl, PowerError};
use crate::traced::TracedPowerControl;
use lab_core::Params;
use serde_json::Value;

const KIND: &str = "pdu";
const COMMANDS: [&str; 3] = ["power_on", "power_off", "hard_reset"];

pub struct PduDriver {
    config: DriverConfig,
    power: Box<dyn PowerControl>,
    interfaces: InterfaceTable<PduDriver>,
}

impl PduDriver {
    /// Driver running the configured commands, with traced power calls
    pub fn new(config: DriverConfig) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            driver: KIND,
            reason,
        };
        let Some(Value::Object(fields)) = config.value() else {
            return Err(invalid(format!("expected an object with {}", COMMANDS.join(", "))));
        };
        for (key, value) in fields {
            if !COMMANDS.contains(&key.as_str()) {
                return Err(invalid(format!("unknown key '{}'", key)));
            }
            if !value.is_string() {
                return Err(invalid(format!("'{}' must be a command string", key)));
            }
        }
        if fields.is_empty() {
            return Err(invalid(format!("needs at least one of {}", COMMANDS.join(", "))));
        }

        let command = |key: &str| config.str_field(key).map(str::to_string);
        let power = CommandPowerControl::new(
            command("power_on"),
            command("power_off"),
            command("hard_reset"),
        );
        Ok(Self::with_power(config, TracedPowerControl::new(power, KIND)))
    }

    /// Driver using an already built power adapter
    pub fn with_power(config: DriverConfig, power: impl PowerControl + 'static) -> Self {
        Self {
            config,
            power: Box::new(power),
            interfaces: InterfaceTable::new().with("power", power_interface),
        }
    }

    pub fn power(&self) -> PowerInterface<'_> {
        PowerInterface::new(self.power.as_ref())
    }
}

fn power_interface(driver: &PduDriver) -> Box<dyn Interface + '_> {
    Box::new(driver.power())
}

impl Driver for PduDriver {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn enumerate_interfaces(&self) -> Box<dyn Iterator<Item = &'static str> + '_> {
        Box::new(self.interfaces.names())
    }

    fn get_interface(&self, name: &str) -> Result<Box<dyn Interface + '_>, InterfaceError> {
        self.interfaces.get(self, name)
    }
}

/// The `power` interface over a power adapter
pub struct PowerInterface<'a> {
    power: &'a dyn PowerControl,
    actions: ActionTable<dyn PowerControl + 'a>,
}

impl<'a> PowerInterface<'a> {
    pub fn new(power: &'a dyn PowerControl) -> Self {
        let actions = ActionTable::<dyn PowerControl + 'a>::new()
            .action("power_on", |power, _| done(power.power_on()))
            .action("power_off", |power, _| done(power.power_off()))
            .action("hard_reset", |power, _| done(power.hard_reset()))
            .member("shutdown", |power, _| done(power.power_off()));
        Self { power, actions }
    }

    /// Graceful power off, not invocable through `run_action`
    pub fn shutdown(&self) -> Result<(), InterfaceError> {
        done(self.power.power_off()).map(|_| ())
    }
}

fn done(result: Result<(), PowerError>) -> Result<Value, InterfaceError> {
    result.map(|()| Value::Null).map_err(|e| match e {
        PowerError::NotConfigured(op) | PowerError::CommandFailed { op, .. } => {
            InterfaceError::ActionFailed {
                action: op.name().to_string(),
                reason: e.to_string(),
            }
        }
    })
}

impl Interface for PowerInterface<'_> {
    fn name(&self) -> &'static str {
        "power"
    }

    fn enumerate_actions(&self) -> Box<dyn Iterator<Item = &'static str> + '_> {
        Box::new(self.actions.names())
    }

    fn run_action(&self, action: &str, params: &Params) -> Result<Value, InterfaceError> {
        tracing::debug!(action, "running power action");
        self.actions.run(self.power, action, params)
    }
}

#[cfg(test)]
#[path = "pdu_tests.rs"]
mod tests;
