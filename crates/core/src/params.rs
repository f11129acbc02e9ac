// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter mappings shared by devices, jobs and actions

use serde_json::Value;

/// A parameter mapping. Device defaults, job directives and action
/// parameters all use this shape.
pub type Params = serde_json::Map<String, Value>;

/// Overlay `top` onto `base`, overwriting on key collision.
pub fn overlay(base: &mut Params, top: &Params) {
    for (key, value) in top {
        base.insert(key.clone(), value.clone());
    }
}

/// Get a string parameter
pub fn str_param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

/// Short name of a JSON value's shape, for diagnostics
pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
