// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Strategy selection
//!
//! Each intent category (deploy, boot, test) has competing strategies.
//! Every strategy ranks itself against the device and the job's own
//! parameters for the entry; the single highest non-zero priority wins.
//! Equal top priorities are a configuration error, never resolved by
//! registration order.

use crate::action::ActionNode;
use crate::error::SelectionError;
use crate::pipeline::Pipeline;
use lab_core::{Device, Params};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Job-level operation kinds that need device-specific strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Deploy,
    Boot,
    Test,
}

impl Intent {
    pub const ALL: [Intent; 3] = [Intent::Deploy, Intent::Boot, Intent::Test];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "deploy" => Some(Intent::Deploy),
            "boot" => Some(Intent::Boot),
            "test" => Some(Intent::Test),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Intent::Deploy => "deploy",
            Intent::Boot => "boot",
            Intent::Test => "test",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::from_name(s)
            .ok_or_else(|| format!("unknown intent '{}' (expected deploy, boot or test)", s))
    }
}

/// Why a strategy could not build its actions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("parameter '{key}' {reason}")]
    InvalidParameter { key: &'static str, reason: String },
}

/// A concrete implementation of an intent
pub trait Strategy: Send + Sync {
    /// Registry name, shown in diagnostics
    fn name(&self) -> &'static str;

    fn intent(&self) -> Intent;

    /// How well this strategy fits. Zero means not applicable.
    ///
    /// Must depend only on the device and the job's own parameters.
    fn priority(&self, device: &Device, params: &Params) -> u32;

    /// Append this strategy's actions to `pipeline` and return the root
    fn build<'p>(
        &self,
        pipeline: &'p mut Pipeline,
        params: Params,
    ) -> Result<&'p mut ActionNode, BuildError>;
}

/// Central table of strategies keyed by intent
#[derive(Default)]
pub struct StrategyRegistry {
    table: BTreeMap<Intent, Vec<Box<dyn Strategy>>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in strategy
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::strategies::register_defaults(&mut registry);
        registry
    }

    pub fn register(&mut self, strategy: impl Strategy + 'static) -> &mut Self {
        self.table
            .entry(strategy.intent())
            .or_default()
            .push(Box::new(strategy));
        self
    }

    /// Strategies registered for an intent, in registration order
    pub fn candidates(&self, intent: Intent) -> impl Iterator<Item = &dyn Strategy> + '_ {
        self.table
            .get(&intent)
            .into_iter()
            .flatten()
            .map(|strategy| {
                let strategy: &dyn Strategy = strategy.as_ref();
                strategy
            })
    }

    /// Every candidate's priority, in registration order
    pub fn rank(
        &self,
        intent: Intent,
        device: &Device,
        params: &Params,
    ) -> Vec<(&'static str, u32)> {
        self.candidates(intent)
            .map(|strategy| (strategy.name(), strategy.priority(device, params)))
            .collect()
    }

    /// Pick the strategy with the strictly highest non-zero priority
    pub fn select(
        &self,
        intent: Intent,
        device: &Device,
        params: &Params,
    ) -> Result<&dyn Strategy, SelectionError> {
        let mut best = 0;
        let mut winners: Vec<&dyn Strategy> = Vec::new();

        for strategy in self.candidates(intent) {
            let priority = strategy.priority(device, params);
            tracing::debug!(%intent, strategy = strategy.name(), priority, "ranked");
            if priority == 0 || priority < best {
                continue;
            }
            if priority > best {
                best = priority;
                winners.clear();
            }
            winners.push(strategy);
        }

        match winners.as_slice() {
            [only] => Ok(*only),
            [] => Err(SelectionError::NoStrategy {
                intent,
                device: device.hostname.clone(),
            }),
            tied => Err(SelectionError::Ambiguous {
                intent,
                device: device.hostname.clone(),
                priority: best,
                candidates: tied.iter().map(|s| s.name().to_string()).collect(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
