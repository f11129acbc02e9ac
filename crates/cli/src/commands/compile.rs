// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lab compile <job> --device <file>` - Compile a job and show its pipeline

use super::{read_device, read_file};
use crate::config::Config;
use crate::error::LabError;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use lab_dispatch::{submit, CompileOptions, JobCompiler};
use std::path::PathBuf;

#[derive(Args)]
pub struct CompileArgs {
    /// Job document
    pub job: PathBuf,

    /// Device description
    #[arg(long)]
    pub device: PathBuf,

    /// Output location recorded in the job (overrides the config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

pub fn handle(args: CompileArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let device = read_device(&args.device)?;
    let text = read_file(&args.job)?;
    let options = CompileOptions {
        output_dir: args.output_dir.or_else(|| config.output_dir.clone()),
    };

    let compiler = JobCompiler::new();
    let job = submit(&compiler, &text, &device, &options)
        .map_err(|diagnostic| LabError::job_rejected(&diagnostic, &args.job, &text))?;

    match format {
        OutputFormat::Text => {
            println!("job {} for {}", job.id(), job.device());
            if let Some(name) = job.job_name() {
                println!("  name: {}", name);
            }
            if let Some(timeout) = job.job_timeout() {
                println!("  timeout: {}", lab_core::format_timeout(timeout));
            }
            println!();
            for action in job.pipeline().describe() {
                println!("{}", action);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&job)?),
    }
    Ok(())
}
