// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver lookup by kind

use crate::config::{ConfigError, DriverConfig};
use crate::driver::Driver;
use crate::emulated::EmulatedDriver;
use crate::null::NullDriver;
use crate::pdu::PduDriver;
use lab_core::DriverSpec;
use std::collections::BTreeMap;

/// Builds a driver from parsed configuration
pub type DriverFactory = fn(DriverConfig) -> Result<Box<dyn Driver>, ConfigError>;

#[derive(Clone, Default)]
pub struct DriverRegistry {
    factories: BTreeMap<&'static str, DriverFactory>,
}

fn pdu(config: DriverConfig) -> Result<Box<dyn Driver>, ConfigError> {
    Ok(Box::new(PduDriver::new(config)?))
}

fn emulated(config: DriverConfig) -> Result<Box<dyn Driver>, ConfigError> {
    Ok(Box::new(EmulatedDriver::new(config)))
}

fn null(config: DriverConfig) -> Result<Box<dyn Driver>, ConfigError> {
    Ok(Box::new(NullDriver::new(config)))
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `pdu`, `emulated` and `null` drivers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("pdu", pdu)
            .register("emulated", emulated)
            .register("null", null);
        registry
    }

    pub fn register(&mut self, kind: &'static str, factory: DriverFactory) -> &mut Self {
        self.factories.insert(kind, factory);
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Parse the configuration text and build the driver it names
    pub fn build(&self, kind: &str, config: &str) -> Result<Box<dyn Driver>, ConfigError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ConfigError::UnknownKind(kind.to_string()))?;
        let driver = factory(DriverConfig::parse(config)?)?;
        tracing::debug!(kind, "driver built");
        Ok(driver)
    }

    pub fn build_spec(&self, spec: &DriverSpec) -> Result<Box<dyn Driver>, ConfigError> {
        self.build(&spec.kind, &spec.config)
    }
}
