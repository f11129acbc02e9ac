// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document nodes
//!
//! Provenance is kept beside the data: a `Mapping` knows its source line,
//! but converting it to parameters never produces a provenance key.

use lab_core::Params;
use serde_json::Value;

/// A node of a loaded document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Sequence),
    Mapping(Mapping),
}

impl Node {
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Line of the first content inside a mapping or sequence
    pub fn source_line(&self) -> Option<usize> {
        match self {
            Node::Mapping(m) => Some(m.source_line),
            Node::Sequence(s) => Some(s.source_line),
            _ => None,
        }
    }

    /// Short name of the node's shape, for diagnostics
    pub fn shape_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Integer(_) | Node::Float(_) => "number",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Text of a scalar, as used for mapping keys
    pub(crate) fn scalar_text(&self) -> Option<String> {
        match self {
            Node::Null => Some(String::new()),
            Node::Bool(b) => Some(b.to_string()),
            Node::Integer(i) => Some(i.to_string()),
            Node::Float(f) => Some(f.to_string()),
            Node::String(s) => Some(s.clone()),
            Node::Sequence(_) | Node::Mapping(_) => None,
        }
    }

    /// Plain data, without provenance. Non-finite floats become null.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Integer(i) => Value::from(*i),
            Node::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Node::String(s) => Value::String(s.clone()),
            Node::Sequence(s) => Value::Array(s.items.iter().map(Node::to_value).collect()),
            Node::Mapping(m) => Value::Object(m.to_params()),
        }
    }
}

/// A sequence and the line of its first item
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub source_line: usize,
    pub items: Vec<Node>,
}

impl Sequence {
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An ordered mapping and the line of its first key
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    source_line: usize,
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new(source_line: usize) -> Self {
        Self {
            source_line,
            entries: Vec::new(),
        }
    }

    pub fn source_line(&self) -> usize {
        self.source_line
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert a value. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// The mapping as plain parameters
    pub fn to_params(&self) -> Params {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_value()))
            .collect()
    }
}
