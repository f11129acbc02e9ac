// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipelines of actions
//!
//! Insertion order is execution order. A pipeline never reorders its
//! actions, and nesting forms a tree through `ActionNode::pipeline`.

use crate::action::ActionNode;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// An ordered, owning sequence of actions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Pipeline {
    actions: Vec<ActionNode>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action and return it for further adjustment
    pub fn add_action(&mut self, action: ActionNode) -> &mut ActionNode {
        self.actions.push(action);
        let last = self.actions.len() - 1;
        &mut self.actions[last]
    }

    pub fn actions(&self) -> &[ActionNode] {
        &self.actions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionNode> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn last(&self) -> Option<&ActionNode> {
        self.actions.last()
    }

    /// Every action depth-first, with its dotted level (`1`, `1.2`, `1.2.1`)
    pub fn walk(&self) -> Vec<(String, &ActionNode)> {
        let mut out = Vec::new();
        visit(self, "", &mut out);
        out
    }

    /// Flattened description of the whole tree
    pub fn describe(&self) -> Vec<ActionDescription> {
        self.walk()
            .into_iter()
            .map(|(level, action)| ActionDescription {
                level,
                name: action.name.clone(),
                summary: action.summary.clone(),
                source_line: action.source_line,
                timeout: action.timeout,
            })
            .collect()
    }

    /// The first action (depth-first) compiled from a job document line
    pub fn find_by_line(&self, line: usize) -> Option<&ActionNode> {
        self.walk()
            .into_iter()
            .map(|(_, action)| action)
            .find(|action| action.source_line == Some(line))
    }
}

fn visit<'a>(pipeline: &'a Pipeline, prefix: &str, out: &mut Vec<(String, &'a ActionNode)>) {
    for (idx, action) in pipeline.actions.iter().enumerate() {
        let level = if prefix.is_empty() {
            (idx + 1).to_string()
        } else {
            format!("{}.{}", prefix, idx + 1)
        };
        out.push((level.clone(), action));
        if let Some(child) = &action.pipeline {
            visit(child, &level, out);
        }
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a ActionNode;
    type IntoIter = std::slice::Iter<'a, ActionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// One line of a pipeline description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDescription {
    pub level: String,
    pub name: String,
    pub summary: String,
    pub source_line: Option<usize>,
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl fmt::Display for ActionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.level.matches('.').count());
        let label = format!("{}{} {}", indent, self.level, self.name);
        write!(f, "{:<36} {}", label, self.summary)?;
        if let Some(line) = self.source_line {
            write!(f, " (line {})", line)?;
        }
        if let Some(timeout) = self.timeout {
            write!(f, " [timeout {}]", lab_core::format_timeout(timeout))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
