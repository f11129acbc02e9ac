// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op power adapter for devices that are always on.

use super::{PowerControl, PowerError};

/// Power adapter that does nothing.
///
/// Used for emulated devices and dry runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPowerControl;

impl NoOpPowerControl {
    pub fn new() -> Self {
        Self
    }
}

impl PowerControl for NoOpPowerControl {
    fn power_on(&self) -> Result<(), PowerError> {
        Ok(())
    }

    fn power_off(&self) -> Result<(), PowerError> {
        Ok(())
    }

    fn hard_reset(&self) -> Result<(), PowerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traced::TracedPowerControl;

    #[test]
    fn every_operation_succeeds() {
        let power = TracedPowerControl::new(NoOpPowerControl::new(), "qemu");
        assert!(power.power_on().is_ok());
        assert!(power.power_off().is_ok());
        assert!(power.hard_reset().is_ok());
    }
}
