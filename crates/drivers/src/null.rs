// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver for devices without auxiliary hardware control

use crate::config::DriverConfig;
use crate::driver::Driver;
use crate::interface::{Interface, InterfaceError};

/// Accepts any configuration and implements no interfaces
#[derive(Debug, Clone, Default)]
pub struct NullDriver {
    config: DriverConfig,
}

impl NullDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }
}

impl Driver for NullDriver {
    fn kind(&self) -> &'static str {
        "null"
    }

    fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn enumerate_interfaces(&self) -> Box<dyn Iterator<Item = &'static str> + '_> {
        Box::new(std::iter::empty())
    }

    fn get_interface(&self, name: &str) -> Result<Box<dyn Interface + '_>, InterfaceError> {
        Err(InterfaceError::NotImplemented(name.to_string()))
    }
}
