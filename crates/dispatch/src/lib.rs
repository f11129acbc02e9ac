// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job compilation and action dispatch
//!
//! ```text
//! job text → lab_jobdoc::load_document → JobCompiler ─┬─ StrategyRegistry (deploy/boot/test)
//!                                                     └─ ActionRegistry (named actions)
//!                                                   → Job { Pipeline of ActionNodes }
//! ```

mod action;
mod actions;
mod compiler;
mod deployment;
mod error;
mod job;
mod pipeline;
mod strategy;
pub mod strategies;
mod submit;

pub use action::ActionNode;
pub use actions::{finalize_action, ActionFactory, ActionRegistry, FINALIZE};
pub use compiler::{CompileOptions, JobCompiler};
pub use deployment::{get_deployment_data, supported_os, DeploymentData, DEFAULT_OS};
pub use error::{CompilationError, Diagnostic, JobError, SelectionError};
pub use job::Job;
pub use pipeline::{ActionDescription, Pipeline};
pub use strategy::{BuildError, Intent, Strategy, StrategyRegistry};
pub use submit::{load_device, submit};
