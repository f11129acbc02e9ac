// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver configuration

use serde_json::Value;
use thiserror::Error;

/// Errors building a driver from its configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("driver configuration is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid configuration for driver '{driver}': {reason}")]
    Invalid { driver: &'static str, reason: String },
    #[error("unknown driver kind '{0}'")]
    UnknownKind(String),
}

/// Parsed driver configuration, immutable once built.
///
/// Empty text means no configuration at all, which is distinct from a
/// JSON `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverConfig(Option<Value>);

impl DriverConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        if text.is_empty() {
            return Ok(Self(None));
        }
        Ok(Self(Some(serde_json::from_str(text)?)))
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// A string field of an object configuration
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.as_ref()?.get(key)?.as_str()
    }
}

impl From<Value> for DriverConfig {
    fn from(value: Value) -> Self {
        Self(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yare::parameterized;

    #[test]
    fn empty_text_is_no_config() {
        let config = DriverConfig::parse("").unwrap();
        assert!(config.is_empty());
        assert_eq!(config.value(), None);
    }

    #[parameterized(
        object = { r#"{"power_on": "on"}"#, json!({"power_on": "on"}) },
        null = { "null", Value::Null },
        number = { "4", json!(4) },
    )]
    fn json_text_is_parsed(text: &str, expected: Value) {
        assert_eq!(DriverConfig::parse(text).unwrap().value(), Some(&expected));
    }

    #[parameterized(
        unterminated = { "{bad json" },
        whitespace = { "   " },
        trailing = { "{} x" },
    )]
    fn invalid_json_fails(text: &str) {
        assert!(matches!(
            DriverConfig::parse(text),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn string_fields() {
        let config = DriverConfig::from(json!({"power_on": "on", "port": 4}));
        assert_eq!(config.str_field("power_on"), Some("on"));
        assert_eq!(config.str_field("port"), None);
        assert_eq!(DriverConfig::default().str_field("power_on"), None);
    }
}
