// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lab power --device <file> <interface> <action>` - Run a driver action

use super::interfaces::build_driver;
use super::read_device;
use crate::error::LabError;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use lab_core::Params;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args)]
pub struct PowerArgs {
    /// Device description
    #[arg(long)]
    pub device: PathBuf,

    /// Interface name (e.g., "power")
    pub interface: String,

    /// Action name (e.g., "hard_reset")
    pub action: String,

    /// Action parameters (key=value, value parsed as JSON when possible)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn param_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

pub fn handle(args: PowerArgs, format: OutputFormat) -> Result<()> {
    let device = read_device(&args.device)?;
    let driver = build_driver(&device, &args.device)?;
    let params: Params = args
        .params
        .iter()
        .map(|(key, raw)| (key.clone(), param_value(raw)))
        .collect();

    let suggest = |e: &dyn std::fmt::Display| {
        LabError::new(e.to_string())
            .with_context(format!("device '{}', driver '{}'", device.hostname, driver.kind()))
            .with_suggestion(format!(
                "List the available interfaces and actions: lab interfaces --device {}",
                args.device.display()
            ))
    };
    let interface = driver.get_interface(&args.interface).map_err(|e| suggest(&e))?;
    let result = interface
        .run_action(&args.action, &params)
        .map_err(|e| suggest(&e))?;

    match format {
        OutputFormat::Text if result.is_null() => println!("{}.{}: ok", args.interface, args.action),
        OutputFormat::Text => println!("{}.{}: {}", args.interface, args.action, result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
