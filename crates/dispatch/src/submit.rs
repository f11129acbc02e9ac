// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission surface
//!
//! Raw text in, a compiled job or a submitter-facing diagnostic out.

use crate::compiler::{CompileOptions, JobCompiler};
use crate::error::{Diagnostic, JobError};
use crate::job::Job;
use lab_core::{Device, DriverSpec, IdGen};
use lab_jobdoc::{load_document, Node};
use serde_json::Value;

/// Read a device description.
///
/// `hostname` is required; `device_type` and `driver` are optional and
/// every other top-level key becomes a device parameter. A driver's
/// `config` may be JSON text or a mapping, which is re-encoded as JSON.
pub fn load_device(text: &str) -> Result<Device, JobError> {
    let Node::Mapping(mut root) = load_document(text)? else {
        return Err(JobError::Device("device description must be a mapping".to_string()));
    };

    let hostname = match root.remove("hostname") {
        Some(Node::String(hostname)) if !hostname.is_empty() => hostname,
        Some(_) => return Err(JobError::Device("'hostname' must be a non-empty string".to_string())),
        None => return Err(JobError::Device("missing 'hostname'".to_string())),
    };
    let mut device = Device::new(hostname);

    match root.remove("device_type") {
        Some(Node::String(device_type)) => device = device.with_device_type(device_type),
        Some(Node::Null) | None => {}
        Some(_) => return Err(JobError::Device("'device_type' must be a string".to_string())),
    }

    match root.remove("driver") {
        Some(Node::Mapping(driver)) => {
            let kind = driver
                .get("kind")
                .and_then(Node::as_str)
                .ok_or_else(|| JobError::Device("driver needs a 'kind'".to_string()))?
                .to_string();
            let config = match driver.get("config").map(Node::to_value) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(text)) => text,
                Some(value) => value.to_string(),
            };
            device = device.with_driver(DriverSpec { kind, config });
        }
        Some(Node::Null) | None => {}
        Some(_) => return Err(JobError::Device("'driver' must be a mapping".to_string())),
    }

    Ok(device.with_parameters(root.to_params()))
}

/// Compile job text for a device, reducing any failure to a diagnostic
pub fn submit<I: IdGen>(
    compiler: &JobCompiler<I>,
    text: &str,
    device: &Device,
    options: &CompileOptions,
) -> Result<Job, Diagnostic> {
    compiler.compile_str(text, device, options).map_err(|e| {
        let diagnostic = e.diagnostic();
        tracing::warn!(
            device = %device.hostname,
            kind = diagnostic.kind,
            line = ?diagnostic.line,
            "job rejected: {}",
            diagnostic.message
        );
        diagnostic
    })
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
