// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for job compilation
//!
//! Every error carries enough context (intent, device, line) for a
//! submitter-facing diagnostic. Nothing here is retried.

use crate::strategy::Intent;
use lab_jobdoc::ParseError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Strategy selection failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no {intent} strategy accepts these parameters on device '{device}'")]
    NoStrategy { intent: Intent, device: String },
    #[error(
        "ambiguous {intent} strategy on device '{device}': {} share priority {priority}",
        .candidates.join(", ")
    )]
    Ambiguous {
        intent: Intent,
        device: String,
        priority: u32,
        candidates: Vec<String>,
    },
}

/// Failures while turning document entries into actions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompilationError {
    #[error("job document must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
    #[error("job document has no 'actions' sequence (line {line})")]
    MissingActions { line: usize },
    #[error("action entry must be a mapping, found {found} (line {line})")]
    MalformedEntry { line: usize, found: &'static str },
    #[error("parameters for '{name}' must be a mapping, found {found} (line {line})")]
    MalformedParameters {
        name: String,
        line: usize,
        found: &'static str,
    },
    #[error("unknown action '{name}' (line {line})")]
    UnknownAction { name: String, line: usize },
    #[error("invalid parameters for '{name}' (line {line}): {reason}")]
    InvalidParameters {
        name: String,
        line: usize,
        reason: String,
    },
    #[error("unsupported os '{os}' (line {line})")]
    UnsupportedOs { os: String, line: usize },
    #[error("invalid timeout for '{name}' (line {line}): {reason}")]
    InvalidTimeout {
        name: String,
        line: usize,
        reason: String,
    },
}

impl CompilationError {
    pub fn line(&self) -> Option<usize> {
        match self {
            CompilationError::NotAMapping { .. } => None,
            CompilationError::MissingActions { line }
            | CompilationError::MalformedEntry { line, .. }
            | CompilationError::MalformedParameters { line, .. }
            | CompilationError::UnknownAction { line, .. }
            | CompilationError::InvalidParameters { line, .. }
            | CompilationError::UnsupportedOs { line, .. }
            | CompilationError::InvalidTimeout { line, .. } => Some(*line),
        }
    }
}

/// Everything that can go wrong between job text and a compiled job
#[derive(Debug, Error)]
pub enum JobError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{source} (line {line})")]
    Selection {
        line: usize,
        #[source]
        source: SelectionError,
    },
    #[error(transparent)]
    Compilation(#[from] CompilationError),
    #[error("invalid device description: {0}")]
    Device(String),
}

impl JobError {
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Parse(_) => "parse",
            JobError::Selection { .. } => "selection",
            JobError::Compilation(_) => "compilation",
            JobError::Device(_) => "device",
        }
    }

    /// Job document line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            JobError::Parse(e) => Some(e.line()),
            JobError::Selection { line, .. } => Some(*line),
            JobError::Compilation(e) => e.line(),
            JobError::Device(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let message = match self {
            JobError::Selection { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        Diagnostic {
            kind: self.kind(),
            message,
            line: self.line(),
        }
    }
}

/// Structured error returned to job submitters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: &'static str,
    pub message: String,
    pub line: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}
