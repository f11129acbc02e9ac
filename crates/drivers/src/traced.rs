// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::power::{PowerControl, PowerError, PowerOp};

/// Wrapper that adds tracing to any PowerControl
#[derive(Clone)]
pub struct TracedPowerControl<P> {
    inner: P,
    label: String,
}

impl<P> TracedPowerControl<P> {
    pub fn new(inner: P, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PowerControl> TracedPowerControl<P> {
    fn traced(
        &self,
        op: PowerOp,
        call: impl FnOnce(&P) -> Result<(), PowerError>,
    ) -> Result<(), PowerError> {
        let span = match op {
            PowerOp::On => tracing::info_span!("power.on", label = %self.label),
            PowerOp::Off => tracing::info_span!("power.off", label = %self.label),
            PowerOp::Reset => tracing::info_span!("power.reset", label = %self.label),
        };
        let _guard = span.enter();

        tracing::info!("switching");
        let start = std::time::Instant::now();
        let result = call(&self.inner);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "done"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "failed"
            ),
        }

        result
    }
}

impl<P: PowerControl> PowerControl for TracedPowerControl<P> {
    fn power_on(&self) -> Result<(), PowerError> {
        self.traced(PowerOp::On, P::power_on)
    }

    fn power_off(&self) -> Result<(), PowerError> {
        self.traced(PowerOp::Off, P::power_off)
    }

    fn hard_reset(&self) -> Result<(), PowerError> {
        self.traced(PowerOp::Reset, P::hard_reset)
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
