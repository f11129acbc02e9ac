// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lab interfaces --device <file>` - List a device driver's interfaces

use super::read_device;
use crate::error::LabError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use lab_core::Device;
use lab_drivers::{Driver, DriverRegistry};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct InterfacesArgs {
    /// Device description
    #[arg(long)]
    pub device: PathBuf,
}

#[derive(Serialize)]
struct InterfaceInfo {
    interface: &'static str,
    actions: Vec<&'static str>,
}

impl fmt::Display for InterfaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.interface, self.actions.join(", "))
    }
}

/// Build the driver a device names
pub fn build_driver(device: &Device, path: &Path) -> Result<Box<dyn Driver>> {
    let spec = device
        .driver
        .as_ref()
        .ok_or_else(|| LabError::no_driver(&device.hostname))?;
    DriverRegistry::with_defaults().build_spec(spec).map_err(|e| {
        LabError::new(e.to_string())
            .with_context(format!("driver '{}' of {}", spec.kind, path.display()))
            .into()
    })
}

pub fn handle(args: InterfacesArgs, format: OutputFormat) -> Result<()> {
    let device = read_device(&args.device)?;
    let driver = build_driver(&device, &args.device)?;

    let mut infos = Vec::new();
    for name in driver.enumerate_interfaces() {
        let interface = driver.get_interface(name)?;
        infos.push(InterfaceInfo {
            interface: name,
            actions: interface.enumerate_actions().collect(),
        });
    }

    if infos.is_empty() && matches!(format, OutputFormat::Text) {
        println!("driver '{}' has no interfaces", driver.kind());
        return Ok(());
    }
    output::print_list(&infos, format)
}
