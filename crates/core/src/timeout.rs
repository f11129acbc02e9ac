// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout directives
//!
//! Jobs and actions express timeouts as a mapping of units, e.g.
//! `{minutes: 10}` or `{hours: 1, minutes: 30}`. Units are summed.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from parsing a timeout directive
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeoutError {
    #[error("timeout must be a mapping of units, found {0}")]
    NotAMapping(&'static str),
    #[error("timeout declares no units")]
    Empty,
    #[error("unknown timeout unit '{0}' (expected days, hours, minutes or seconds)")]
    UnknownUnit(String),
    #[error("timeout unit '{0}' must be a non-negative integer")]
    InvalidAmount(String),
}

fn unit_seconds(unit: &str) -> Option<u64> {
    match unit {
        "days" => Some(86_400),
        "hours" => Some(3_600),
        "minutes" => Some(60),
        "seconds" => Some(1),
        _ => None,
    }
}

/// Parse a timeout mapping into a duration
pub fn parse_timeout(value: &Value) -> Result<Duration, TimeoutError> {
    let units = value
        .as_object()
        .ok_or_else(|| TimeoutError::NotAMapping(crate::params::shape_name(value)))?;
    if units.is_empty() {
        return Err(TimeoutError::Empty);
    }

    let mut total: u64 = 0;
    for (unit, amount) in units {
        let scale = unit_seconds(unit).ok_or_else(|| TimeoutError::UnknownUnit(unit.clone()))?;
        let amount = amount
            .as_u64()
            .ok_or_else(|| TimeoutError::InvalidAmount(unit.clone()))?;
        total = amount
            .checked_mul(scale)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| TimeoutError::InvalidAmount(unit.clone()))?;
    }
    Ok(Duration::from_secs(total))
}

/// Human-readable rendering, e.g. `1h 30m`
pub fn format_timeout(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yare::parameterized;

    #[parameterized(
        minutes = { json!({"minutes": 10}), 600 },
        summed = { json!({"hours": 1, "minutes": 30}), 5_400 },
        days = { json!({"days": 1}), 86_400 },
        zero = { json!({"seconds": 0}), 0 },
    )]
    fn parses_units(value: Value, seconds: u64) {
        assert_eq!(parse_timeout(&value), Ok(Duration::from_secs(seconds)));
    }

    #[parameterized(
        scalar = { json!(30), TimeoutError::NotAMapping("number") },
        empty = { json!({}), TimeoutError::Empty },
        unknown_unit = { json!({"weeks": 1}), TimeoutError::UnknownUnit("weeks".into()) },
        negative = { json!({"minutes": -1}), TimeoutError::InvalidAmount("minutes".into()) },
        fractional = { json!({"minutes": 1.5}), TimeoutError::InvalidAmount("minutes".into()) },
    )]
    fn rejects_bad_shapes(value: Value, expected: TimeoutError) {
        assert_eq!(parse_timeout(&value), Err(expected));
    }

    #[test]
    fn formats_compound_durations() {
        assert_eq!(format_timeout(Duration::from_secs(5_400)), "1h 30m");
        assert_eq!(format_timeout(Duration::from_secs(45)), "45s");
    }
}
