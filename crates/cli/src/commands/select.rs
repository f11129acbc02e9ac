// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lab select <intent> --device <file>` - Explain strategy selection

use super::read_device;
use crate::error::LabError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use lab_core::Params;
use lab_dispatch::{Intent, StrategyRegistry};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct SelectArgs {
    /// Intent to select for (deploy, boot, test)
    pub intent: Intent,

    /// Device description
    #[arg(long)]
    pub device: PathBuf,

    /// The job entry's parameters as a JSON object
    #[arg(long)]
    pub params: Option<String>,
}

#[derive(Serialize)]
struct Candidate {
    strategy: &'static str,
    priority: u32,
}

#[derive(Serialize)]
struct Selection {
    intent: Intent,
    device: String,
    candidates: Vec<Candidate>,
    selected: Option<&'static str>,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} strategies for {}:", self.intent, self.device)?;
        for candidate in &self.candidates {
            let mark = if Some(candidate.strategy) == self.selected { "*" } else { " " };
            writeln!(f, " {} {:<20} {}", mark, candidate.strategy, candidate.priority)?;
        }
        match self.selected {
            Some(name) => write!(f, "selected: {}", name),
            None => write!(f, "selected: none"),
        }
    }
}

pub fn handle(args: SelectArgs, format: OutputFormat) -> Result<()> {
    let device = read_device(&args.device)?;
    let params = match &args.params {
        Some(text) => parse_params(text)?,
        None => Params::new(),
    };

    let registry = StrategyRegistry::with_defaults();
    let candidates = registry
        .rank(args.intent, &device, &params)
        .into_iter()
        .map(|(strategy, priority)| Candidate { strategy, priority })
        .collect();
    let chosen = registry.select(args.intent, &device, &params).map(|s| s.name());

    let selection = Selection {
        intent: args.intent,
        device: device.hostname.clone(),
        candidates,
        selected: chosen.as_ref().ok().copied(),
    };
    output::print(&selection, format)?;

    chosen.map(|_| ()).map_err(|e| {
        LabError::new(e.to_string())
            .with_suggestion("Set the entry's method key ('to' for deploy, 'method' for boot)")
            .with_suggestion("Check the methods the device declares under 'actions'")
            .into()
    })
}

fn parse_params(text: &str) -> Result<Params> {
    match serde_json::from_str(text) {
        Ok(serde_json::Value::Object(params)) => Ok(params),
        Ok(_) => Err(LabError::new("--params must be a JSON object").into()),
        Err(e) => Err(LabError::new(format!("--params is not valid JSON: {}", e)).into()),
    }
}
