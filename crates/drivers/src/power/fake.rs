// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake power adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PowerControl, PowerError, PowerOp};
use std::sync::{Arc, Mutex};

/// Recorded power call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCall {
    On,
    Off,
    Reset,
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<PowerCall>,
    powered: bool,
    fail: Option<String>,
}

/// Fake power adapter that records calls and tracks the power state
#[derive(Clone, Default)]
pub struct FakePowerControl {
    state: Arc<Mutex<FakeState>>,
}

impl FakePowerControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PowerCall> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).calls.clone()
    }

    pub fn is_powered(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).powered
    }

    /// Make every following call fail with `reason`
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fail = Some(reason.into());
    }

    fn record(&self, call: PowerCall, op: PowerOp, powered: bool) -> Result<(), PowerError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(call);
        if let Some(reason) = &state.fail {
            return Err(PowerError::CommandFailed {
                op,
                reason: reason.clone(),
            });
        }
        state.powered = powered;
        Ok(())
    }
}

impl PowerControl for FakePowerControl {
    fn power_on(&self) -> Result<(), PowerError> {
        self.record(PowerCall::On, PowerOp::On, true)
    }

    fn power_off(&self) -> Result<(), PowerError> {
        self.record(PowerCall::Off, PowerOp::Off, false)
    }

    fn hard_reset(&self) -> Result<(), PowerError> {
        self.record(PowerCall::Reset, PowerOp::Reset, true)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
