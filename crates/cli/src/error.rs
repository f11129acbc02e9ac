// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! - What went wrong (message)
//! - Where, and why it might have happened (context)
//! - How to fix it (suggestions)

use lab_dispatch::Diagnostic;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct LabError {
    /// What went wrong
    pub message: String,
    /// Where, and why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl LabError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// A rejected job, quoting the offending line of its document
    pub fn job_rejected(diagnostic: &Diagnostic, path: &Path, text: &str) -> Self {
        let mut err = LabError::new(diagnostic.to_string());
        if let Some(line) = diagnostic.line {
            err = err.with_context(format!("{}:{}", path.display(), line));
            if let Some(source) = text.lines().nth(line.saturating_sub(1)) {
                err = err.with_context(format!("{:>4} | {}", line, source.trim_end()));
            }
        }
        match diagnostic.kind {
            "selection" => err
                .with_suggestion("Show every candidate's priority: lab select <intent> --device <file>")
                .with_suggestion("Check the methods the device declares under 'actions'"),
            "parse" => err.with_suggestion("Check indentation and quoting near the reported line"),
            "compilation" => {
                err.with_suggestion("List the known strategies and actions: lab strategies")
            }
            _ => err,
        }
    }

    /// A device without a `driver` entry
    pub fn no_driver(hostname: &str) -> Self {
        LabError::new(format!("device '{}' has no driver", hostname))
            .with_context("Only devices with a 'driver' entry expose interfaces")
            .with_suggestion("Add 'driver: {kind: pdu, config: {...}}' to the device description")
    }
}

impl fmt::Display for LabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for LabError {}
