// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled jobs

use crate::pipeline::Pipeline;
use lab_core::params::str_param;
use lab_core::{JobId, Params};
use serde::Serialize;
use std::time::Duration;

/// A compiled job: its identity, job-level parameters and the pipeline.
///
/// The pipeline is fixed at construction and never replaced.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    id: JobId,
    device: String,
    parameters: Params,
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    timeout: Option<Duration>,
    pipeline: Pipeline,
}

impl Job {
    pub fn new(
        id: JobId,
        device: impl Into<String>,
        parameters: Params,
        timeout: Option<Duration>,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            id,
            device: device.into(),
            parameters,
            timeout,
            pipeline,
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Hostname of the device the job was compiled for
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Top-level job parameters, without the action list
    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn job_name(&self) -> Option<&str> {
        str_param(&self.parameters, "job_name")
    }

    /// Defaults to public
    pub fn visibility(&self) -> &str {
        str_param(&self.parameters, "visibility").unwrap_or("public")
    }

    pub fn job_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn output_dir(&self) -> Option<&str> {
        str_param(&self.parameters, "output_dir")
    }
}
