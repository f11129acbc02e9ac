// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job compilation
//!
//! Walks the document's `actions` in order. Intent entries (deploy, boot,
//! test) go through strategy selection with device defaults merged under
//! the job's own values; every other entry names an action directly. A
//! finaliser always closes the pipeline. Compilation is all-or-nothing.

use crate::action::ActionNode;
use crate::actions::{finalize_action, ActionRegistry};
use crate::deployment::{get_deployment_data, DEFAULT_OS};
use crate::error::{CompilationError, JobError};
use crate::job::Job;
use crate::pipeline::Pipeline;
use crate::strategy::{Intent, StrategyRegistry};
use lab_core::params::overlay;
use lab_core::{parse_timeout, Device, IdGen, Params, UuidIdGen};
use lab_jobdoc::{load_document, Mapping, Node};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

const ACTIONS: &str = "actions";
const TIMEOUTS: &str = "timeouts";
const TIMEOUT: &str = "timeout";
const OUTPUT_DIR: &str = "output_dir";

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Injected into the job parameters as `output_dir`
    pub output_dir: Option<PathBuf>,
}

/// Job-level timeouts from the `timeouts` mapping
#[derive(Default)]
struct Timeouts {
    job: Option<Duration>,
    action: Option<Duration>,
}

pub struct JobCompiler<I: IdGen = UuidIdGen> {
    strategies: StrategyRegistry,
    actions: ActionRegistry,
    id_gen: I,
}

impl JobCompiler<UuidIdGen> {
    /// Compiler with every built-in strategy and action
    pub fn new() -> Self {
        Self::with_id_gen(UuidIdGen)
    }
}

impl Default for JobCompiler<UuidIdGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdGen> JobCompiler<I> {
    pub fn with_id_gen(id_gen: I) -> Self {
        Self::with_registries(
            StrategyRegistry::with_defaults(),
            ActionRegistry::with_defaults(),
            id_gen,
        )
    }

    pub fn with_registries(strategies: StrategyRegistry, actions: ActionRegistry, id_gen: I) -> Self {
        Self {
            strategies,
            actions,
            id_gen,
        }
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Load job text and compile it
    pub fn compile_str(
        &self,
        text: &str,
        device: &Device,
        options: &CompileOptions,
    ) -> Result<Job, JobError> {
        self.compile(load_document(text)?, device, options)
    }

    pub fn compile(
        &self,
        document: Node,
        device: &Device,
        options: &CompileOptions,
    ) -> Result<Job, JobError> {
        let span = tracing::info_span!("job.compile", device = %device.hostname);
        let _guard = span.enter();

        let mut root = match document {
            Node::Mapping(mapping) => mapping,
            other => {
                return Err(CompilationError::NotAMapping {
                    found: other.shape_name(),
                }
                .into())
            }
        };
        let entries = match root.remove(ACTIONS) {
            Some(Node::Sequence(sequence)) => sequence.items,
            Some(Node::Null) => Vec::new(),
            _ => {
                return Err(CompilationError::MissingActions {
                    line: root.source_line(),
                }
                .into())
            }
        };
        let timeouts = job_timeouts(&root)?;

        let mut pipeline = Pipeline::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in &entries {
            let Node::Mapping(entry) = entry else {
                return Err(CompilationError::MalformedEntry {
                    line: entry.source_line().unwrap_or(root.source_line()),
                    found: entry.shape_name(),
                }
                .into());
            };
            let line = entry.source_line();
            for (name, value) in entry.iter() {
                let count = counts.entry(name.to_string()).or_insert(0);
                let occurrence = *count;
                *count += 1;

                let action = match Intent::from_name(name) {
                    Some(intent) => {
                        let ctx = EntryContext { name, line, device };
                        self.compile_intent(&mut pipeline, intent, occurrence, value, &ctx)?
                    }
                    None => self.compile_named(&mut pipeline, name, value, line)?,
                };
                if action.timeout.is_none() {
                    action.timeout = timeouts.action;
                }
            }
        }
        pipeline.add_action(finalize_action());

        let mut parameters = root.to_params();
        let output_dir = options
            .output_dir
            .as_ref()
            .map_or(Value::Null, |dir| Value::from(dir.display().to_string()));
        parameters.insert(OUTPUT_DIR.to_string(), output_dir);

        let job = Job::new(
            self.id_gen.next(),
            device.hostname.clone(),
            parameters,
            timeouts.job,
            pipeline,
        );
        tracing::info!(job = %job.id(), actions = job.pipeline().len(), "compiled");
        Ok(job)
    }

    fn compile_intent<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        intent: Intent,
        occurrence: usize,
        value: &Node,
        ctx: &EntryContext<'_>,
    ) -> Result<&'p mut ActionNode, JobError> {
        let job_params = entry_params(ctx.name, value, ctx.line)?;

        let mut params = ctx.device.action_defaults(intent.name(), occurrence);
        overlay(&mut params, &job_params);
        if intent == Intent::Deploy {
            let os = match params.get("os") {
                None => DEFAULT_OS,
                Some(Value::String(os)) => os.as_str(),
                Some(_) => {
                    return Err(ctx.invalid("'os' must be a string").into());
                }
            };
            let data = get_deployment_data(os).ok_or_else(|| CompilationError::UnsupportedOs {
                os: os.to_string(),
                line: ctx.line,
            })?;
            params.insert("deployment_data".to_string(), Value::Object(data.to_params()));
        }
        let timeout = match job_params.get(TIMEOUT) {
            Some(value) => Some(parse_timeout(value).map_err(|e| {
                CompilationError::InvalidTimeout {
                    name: ctx.name.to_string(),
                    line: ctx.line,
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        // Selection sees only the job's own values for this entry
        let strategy = self
            .strategies
            .select(intent, ctx.device, &job_params)
            .map_err(|source| JobError::Selection {
                line: ctx.line,
                source,
            })?;
        tracing::debug!(%intent, strategy = strategy.name(), occurrence, line = ctx.line, "selected");

        let action = strategy
            .build(pipeline, params)
            .map_err(|e| ctx.invalid(e.to_string()))?;
        action.source_line = Some(ctx.line);
        action.timeout = timeout;
        Ok(action)
    }

    fn compile_named<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        name: &str,
        value: &Node,
        line: usize,
    ) -> Result<&'p mut ActionNode, JobError> {
        let mut action = self
            .actions
            .create(name)
            .ok_or_else(|| CompilationError::UnknownAction {
                name: name.to_string(),
                line,
            })?;
        match value {
            Node::Mapping(mapping) => action.parameters = mapping.to_params(),
            _ if name == "commands" => {}
            Node::Sequence(sequence) => {
                // Each element replaces the last; only the final one is kept
                for item in sequence.iter() {
                    action.parameters = entry_params(name, item, line)?;
                }
            }
            Node::Null => {}
            other => {
                return Err(CompilationError::MalformedParameters {
                    name: name.to_string(),
                    line,
                    found: other.shape_name(),
                }
                .into())
            }
        }
        action.summary = name.to_string();
        action.source_line = Some(line);
        Ok(pipeline.add_action(action))
    }
}

struct EntryContext<'a> {
    name: &'a str,
    line: usize,
    device: &'a Device,
}

impl EntryContext<'_> {
    fn invalid(&self, reason: impl Into<String>) -> CompilationError {
        CompilationError::InvalidParameters {
            name: self.name.to_string(),
            line: self.line,
            reason: reason.into(),
        }
    }
}

/// Parameters of an entry value; null means none
fn entry_params(name: &str, value: &Node, line: usize) -> Result<Params, CompilationError> {
    match value {
        Node::Mapping(mapping) => Ok(mapping.to_params()),
        Node::Null => Ok(Params::new()),
        other => Err(CompilationError::MalformedParameters {
            name: name.to_string(),
            line,
            found: other.shape_name(),
        }),
    }
}

fn job_timeouts(root: &Mapping) -> Result<Timeouts, CompilationError> {
    let Some(node) = root.get(TIMEOUTS) else {
        return Ok(Timeouts::default());
    };
    let Node::Mapping(timeouts) = node else {
        return Err(CompilationError::MalformedParameters {
            name: TIMEOUTS.to_string(),
            line: root.source_line(),
            found: node.shape_name(),
        });
    };
    let parse = |key: &str| -> Result<Option<Duration>, CompilationError> {
        timeouts
            .get(key)
            .map(|value| {
                parse_timeout(&value.to_value()).map_err(|e| CompilationError::InvalidTimeout {
                    name: format!("{}.{}", TIMEOUTS, key),
                    line: timeouts.source_line(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };
    Ok(Timeouts {
        job: parse("job")?,
        action: parse("action")?,
    })
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
