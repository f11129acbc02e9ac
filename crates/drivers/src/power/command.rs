// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Power adapter that runs lab shell commands

use super::{PowerControl, PowerError, PowerOp};
use std::process::Command;

/// Runs one configured shell command per operation.
///
/// Without a reset command, a hard reset is power off then power on.
#[derive(Clone, Debug, Default)]
pub struct CommandPowerControl {
    on: Option<String>,
    off: Option<String>,
    reset: Option<String>,
}

impl CommandPowerControl {
    pub fn new(on: Option<String>, off: Option<String>, reset: Option<String>) -> Self {
        Self { on, off, reset }
    }

    fn run(&self, op: PowerOp, command: Option<&str>) -> Result<(), PowerError> {
        let command = command.ok_or(PowerError::NotConfigured(op))?;
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| PowerError::CommandFailed {
                op,
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PowerError::CommandFailed {
                op,
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}

impl PowerControl for CommandPowerControl {
    fn power_on(&self) -> Result<(), PowerError> {
        self.run(PowerOp::On, self.on.as_deref())
    }

    fn power_off(&self) -> Result<(), PowerError> {
        self.run(PowerOp::Off, self.off.as_deref())
    }

    fn hard_reset(&self) -> Result<(), PowerError> {
        match self.reset.as_deref() {
            Some(reset) => self.run(PowerOp::Reset, Some(reset)),
            None if self.on.is_some() && self.off.is_some() => {
                self.power_off()?;
                self.power_on()
            }
            None => Err(PowerError::NotConfigured(PowerOp::Reset)),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
