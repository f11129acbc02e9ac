// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver for emulated and always-on devices
//!
//! Exposes the same `power` interface as a PDU so jobs can reset a QEMU
//! guest or a board on a permanent supply, but every switch is a no-op.

use crate::config::DriverConfig;
use crate::driver::{Driver, InterfaceTable};
use crate::interface::{Interface, InterfaceError};
use crate::pdu::PowerInterface;
use crate::power::NoOpPowerControl;
use crate::traced::TracedPowerControl;

const KIND: &str = "emulated";

pub struct EmulatedDriver {
    config: DriverConfig,
    power: TracedPowerControl<NoOpPowerControl>,
    interfaces: InterfaceTable<EmulatedDriver>,
}

impl EmulatedDriver {
    /// Accepts any configuration
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            power: TracedPowerControl::new(NoOpPowerControl::new(), KIND),
            interfaces: InterfaceTable::new().with("power", power_interface),
        }
    }

    pub fn power(&self) -> PowerInterface<'_> {
        PowerInterface::new(&self.power)
    }
}

fn power_interface(driver: &EmulatedDriver) -> Box<dyn Interface + '_> {
    Box::new(driver.power())
}

impl Driver for EmulatedDriver {
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
