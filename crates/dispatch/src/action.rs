// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action nodes

use crate::pipeline::Pipeline;
use lab_core::Params;
use serde::Serialize;
use std::time::Duration;

/// One compiled step of a job, optionally owning a child pipeline.
///
/// Ownership is top-down only: an action never refers to its parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionNode {
    /// Stable identifier, used for registry lookup and log correlation
    pub name: String,
    /// Human-readable label
    pub summary: String,
    /// Device defaults overlaid with the job's parameters
    pub parameters: Params,
    /// Job document line this action was compiled from; `None` for
    /// synthetic actions such as the finaliser
    pub source_line: Option<usize>,
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Pipeline>,
}

impl ActionNode {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            parameters: Params::new(),
            source_line: None,
            timeout: None,
            pipeline: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Params) -> Self {
        self.parameters = parameters;
        self
    }

    /// Append a child action, creating the child pipeline if needed
    pub fn with_child(mut self, child: ActionNode) -> Self {
        self.child_pipeline_mut().add_action(child);
        self
    }

    pub fn child_pipeline_mut(&mut self) -> &mut Pipeline {
        self.pipeline.get_or_insert_with(Pipeline::new)
    }

    pub fn children(&self) -> &[ActionNode] {
        self.pipeline.as_ref().map(Pipeline::actions).unwrap_or(&[])
    }

    /// Whether this action was generated rather than written in the job
    pub fn is_synthetic(&self) -> bool {
        self.source_line.is_none()
    }
}
