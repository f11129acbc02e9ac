// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The driver abstraction

use crate::config::DriverConfig;
use crate::interface::{Interface, InterfaceError};

/// Builds an interface view borrowing its driver
pub type InterfaceFactory<D> = for<'a> fn(&'a D) -> Box<dyn Interface + 'a>;

/// A hardware-control driver, configured once per device
pub trait Driver: Send + Sync {
    fn kind(&self) -> &'static str;

    fn config(&self) -> &DriverConfig;

    /// Names of every interface. Each call starts a fresh listing.
    fn enumerate_interfaces(&self) -> Box<dyn Iterator<Item = &'static str> + '_>;

    fn get_interface(&self, name: &str) -> Result<Box<dyn Interface + '_>, InterfaceError>;
}

/// Interface names mapped to the factories that extract them from a driver
pub struct InterfaceTable<D> {
    entries: Vec<(&'static str, InterfaceFactory<D>)>,
}

impl<D> Default for InterfaceTable<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<D> InterfaceTable<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, factory: InterfaceFactory<D>) -> Self {
        self.entries.push((name, factory));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn get<'a>(&self, driver: &'a D, name: &str) -> Result<Box<dyn Interface + 'a>, InterfaceError> {
        let (_, factory) = self
            .entries
            .iter()
            .find(|(registered, _)| *registered == name)
            .ok_or_else(|| InterfaceError::NotImplemented(name.to_string()))?;
        Ok(factory(driver))
    }
}
