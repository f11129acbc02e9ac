// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named actions
//!
//! Job entries that are not an intent name a concrete action directly.
//! The registry maps those names to constructors; the compiler fills in
//! parameters and provenance.

use crate::action::ActionNode;
use std::collections::BTreeMap;

/// Name of the finaliser appended to every compiled pipeline
pub const FINALIZE: &str = "finalize";

/// Constructor for a named action
pub type ActionFactory = fn() -> ActionNode;

fn submit_results() -> ActionNode {
    ActionNode::new("submit", "submit results")
}

fn command() -> ActionNode {
    ActionNode::new("command", "run a lab command on the dispatcher")
}

/// Placeholder; `commands` entries carry their list for a later boot step
fn commands() -> ActionNode {
    ActionNode::new("commands", "commands")
}

/// The closing action: power the device off and collect its feedback
pub fn finalize_action() -> ActionNode {
    ActionNode::new(FINALIZE, "finalize the job")
        .with_child(ActionNode::new("power-off", "power the device off"))
        .with_child(ActionNode::new("read-feedback", "drain remaining console output"))
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    factories: BTreeMap<&'static str, ActionFactory>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("submit", submit_results)
            .register("command", command)
            .register("commands", commands);
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: ActionFactory) -> &mut Self {
        self.factories.insert(name, factory);
        self
    }

    /// A fresh, parameterless action, or `None` for unknown names
    pub fn create(&self, name: &str) -> Option<ActionNode> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}
