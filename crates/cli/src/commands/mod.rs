// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod compile;
pub mod interfaces;
pub mod power;
pub mod select;
pub mod strategies;

use crate::error::LabError;
use anyhow::{Context, Result};
use lab_core::Device;
use lab_dispatch::load_device;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Load a device description, rendering failures like job diagnostics
pub fn read_device(path: &Path) -> Result<Device> {
    let text = read_file(path)?;
    let device = load_device(&text).map_err(|e| LabError::job_rejected(&e.diagnostic(), path, &text))?;
    tracing::debug!(device = %device.hostname, path = %path.display(), "device loaded");
    Ok(device)
}
