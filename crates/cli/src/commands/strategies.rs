// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lab strategies` - List registered strategies and named actions

use crate::output::{self, OutputFormat};
use anyhow::Result;
use lab_dispatch::{ActionRegistry, Intent, StrategyRegistry};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
struct Entry {
    kind: &'static str,
    name: &'static str,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {}", self.kind, self.name)
    }
}

pub fn handle(format: OutputFormat) -> Result<()> {
    let strategies = StrategyRegistry::with_defaults();
    let actions = ActionRegistry::with_defaults();

    let mut entries: Vec<Entry> = Intent::ALL
        .into_iter()
        .flat_map(|intent| {
            strategies
                .candidates(intent)
                .map(move |strategy| Entry {
                    kind: intent.name(),
                    name: strategy.name(),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    entries.extend(actions.names().map(|name| Entry { kind: "action", name }));

    output::print_list(&entries, format)
}
