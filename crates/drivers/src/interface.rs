// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interfaces and their actions
//!
//! An interface registers its members in an [`ActionTable`]. Only members
//! tagged as actions are listed and invocable by name; an untagged member
//! is reachable from code but never through `run_action`.

use lab_core::Params;
use serde_json::Value;
use thiserror::Error;

/// Errors from interface lookup and action invocation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("interface '{0}' not implemented by this driver")]
    NotImplemented(String),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("'{0}' is not an action")]
    NotAnAction(String),
    #[error("action '{action}' failed: {reason}")]
    ActionFailed { action: String, reason: String },
}

/// A capability exposed by a driver
pub trait Interface {
    fn name(&self) -> &'static str;

    /// Names of every invocable action. Each call starts a fresh listing.
    fn enumerate_actions(&self) -> Box<dyn Iterator<Item = &'static str> + '_>;

    fn run_action(&self, action: &str, params: &Params) -> Result<Value, InterfaceError>;
}

pub type ActionFn<T> = fn(&T, &Params) -> Result<Value, InterfaceError>;

struct Member<T: ?Sized> {
    name: &'static str,
    run: ActionFn<T>,
    is_action: bool,
}

/// Members of an interface, in registration order
pub struct ActionTable<T: ?Sized> {
    members: Vec<Member<T>>,
}

impl<T: ?Sized> Default for ActionTable<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T: ?Sized> ActionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member tagged as an action
    pub fn action(mut self, name: &'static str, run: ActionFn<T>) -> Self {
        self.members.push(Member {
            name,
            run,
            is_action: true,
        });
        self
    }

    /// Register an untagged member
    pub fn member(mut self, name: &'static str, run: ActionFn<T>) -> Self {
        self.members.push(Member {
            name,
            run,
            is_action: false,
        });
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.members
            .iter()
            .filter(|member| member.is_action)
            .map(|member| member.name)
    }

    /// Invoke `name` on `target`, refusing members not tagged as actions
    pub fn run(&self, target: &T, name: &str, params: &Params) -> Result<Value, InterfaceError> {
        let member = self
            .members
            .iter()
            .find(|member| member.name == name)
            .ok_or_else(|| InterfaceError::UnknownAction(name.to_string()))?;
        if !member.is_action {
            return Err(InterfaceError::NotAnAction(name.to_string()));
        }
        (member.run)(target, params)
    }
}

#[cfg(test)]
#[path = "interface_tests.rs"]
mod tests;
