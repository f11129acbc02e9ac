// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Power-control adapters

mod command;
mod noop;

pub use command::CommandPowerControl;
pub use noop::NoOpPowerControl;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePowerControl, PowerCall};

use std::fmt;
use thiserror::Error;

/// Errors from power operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PowerError {
    #[error("no command configured for {0}")]
    NotConfigured(PowerOp),
    #[error("{op} command failed: {reason}")]
    CommandFailed { op: PowerOp, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOp {
    On,
    Off,
    Reset,
}

impl PowerOp {
    pub fn name(self) -> &'static str {
        match self {
            PowerOp::On => "power_on",
            PowerOp::Off => "power_off",
            PowerOp::Reset => "hard_reset",
        }
    }
}

impl fmt::Display for PowerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Adapter for switching a device's power
pub trait PowerControl: Send + Sync {
    fn power_on(&self) -> Result<(), PowerError>;

    fn power_off(&self) -> Result<(), PowerError>;

    fn hard_reset(&self) -> Result<(), PowerError>;
}

impl<P: PowerControl + ?Sized> PowerControl for Box<P> {
    fn power_on(&self) -> Result<(), PowerError> {
        (**self).power_on()
    }

    fn power_off(&self) -> Result<(), PowerError> {
        (**self).power_off()
    }

    fn hard_reset(&self) -> Result<(), PowerError> {
        (**self).hard_reset()
    }
}
