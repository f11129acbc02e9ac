// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lab - hardware test-lab job dispatcher

mod commands;
mod completions;
mod config;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{compile, interfaces, power, select, strategies};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;
use crate::error::LabError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "lab",
    version,
    about = "lab compiles test jobs into action pipelines for lab devices"
)]
struct Cli {
    /// Configuration file (default: $LAB_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a job for a device and show its pipeline
    Compile(compile::CompileArgs),
    /// Explain strategy selection for one intent
    Select(select::SelectArgs),
    /// List the registered strategies
    Strategies,
    /// List the interfaces and actions of a device's driver
    Interfaces(interfaces::InterfacesArgs),
    /// Run a driver action against a device
    Power(power::PowerArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<LabError>() {
                Some(lab) => eprint!("{}", lab),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions(args) = &cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let _guard = logging::init(cli.log_file.as_deref(), config.log_level.as_deref())?;
    tracing::debug!(command = command_name(&cli.command), "starting");

    match cli.command {
        Commands::Compile(args) => compile::handle(args, &config, cli.output),
        Commands::Select(args) => select::handle(args, cli.output),
        Commands::Strategies => strategies::handle(cli.output),
        Commands::Interfaces(args) => interfaces::handle(args, cli.output),
        Commands::Power(args) => power::handle(args, cli.output),
        Commands::Completions(_) => Ok(()),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Compile(_) => "compile",
        Commands::Select(_) => "select",
        Commands::Strategies => "strategies",
        Commands::Interfaces(_) => "interfaces",
        Commands::Power(_) => "power",
        Commands::Completions(_) => "completions",
    }
}
