// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML loading with line provenance
//!
//! The loader composes nodes from the scanner's event stream. Each mapping
//! records the line of the event that opened it. For block mappings that is
//! the line of the first key, so blank lines and comments before the content
//! never shift a mapping's provenance.

use crate::node::{Mapping, Node, Sequence};
use std::collections::HashMap;
use thiserror::Error;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Upper bound on nodes copied in by alias expansion, across one document
pub const MAX_ALIAS_NODES: usize = 100_000;

/// Errors that can occur while loading a document
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{message} at line {line} column {column}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("mapping keys must be scalars (line {line})")]
    ComplexKey { line: usize },
    #[error("alias refers to an unknown anchor (line {line})")]
    UnknownAlias { line: usize },
    #[error("aliases expand to more than {limit} nodes (line {line})")]
    AliasLimit { line: usize, limit: usize },
}

impl ParseError {
    /// Line the error was detected on (1-indexed)
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. }
            | ParseError::ComplexKey { line }
            | ParseError::UnknownAlias { line }
            | ParseError::AliasLimit { line, .. } => *line,
        }
    }
}

/// Load the first document in `text`.
///
/// An empty document loads as `Node::Null`.
pub fn load_document(text: &str) -> Result<Node, ParseError> {
    let mut composer = Composer::default();
    let mut parser = Parser::new_from_str(text);
    parser
        .load(&mut composer, false)
        .map_err(|e| ParseError::Syntax {
            line: e.marker().line(),
            column: e.marker().col() + 1,
            message: e.info().to_string(),
        })?;

    if let Some(err) = composer.error {
        return Err(err);
    }
    let root = composer.root.unwrap_or(Node::Null);
    tracing::debug!(
        lines = text.lines().count(),
        root = root.shape_name(),
        "loaded document"
    );
    Ok(root)
}

/// An open collection and the number of nodes composed into it so far
enum Frame {
    Sequence {
        anchor: usize,
        items: Sequence,
        nodes: usize,
    },
    Mapping {
        anchor: usize,
        mapping: Mapping,
        key: Option<String>,
        nodes: usize,
    },
}

#[derive(Default)]
struct Composer {
    stack: Vec<Frame>,
    anchors: HashMap<usize, (Node, usize)>,
    expanded: usize,
    root: Option<Node>,
    error: Option<ParseError>,
}

impl Composer {
    fn fail(&mut self, err: ParseError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn awaiting_key(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Mapping { key: None, .. }))
    }

    fn set_key(&mut self, text: String) {
        if let Some(Frame::Mapping { key, .. }) = self.stack.last_mut() {
            *key = Some(text);
        }
    }

    /// Attach a finished node of `size` nodes to its parent, or make it the root
    fn attach(&mut self, node: Node, size: usize, anchor: usize, line: usize) {
        if anchor != 0 {
            self.anchors.insert(anchor, (node.clone(), size));
        }
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, nodes, .. }) => {
                *nodes = nodes.saturating_add(size);
                items.items.push(node);
            }
            Some(Frame::Mapping {
                mapping, key, nodes, ..
            }) => match key.take() {
                Some(k) => {
                    *nodes = nodes.saturating_add(size);
                    mapping.insert(k, node);
                }
                None => match node.scalar_text() {
                    Some(text) => *key = Some(text),
                    None => self.fail(ParseError::ComplexKey { line }),
                },
            },
        }
    }

    /// Copy an anchored node in place of an alias, within the expansion budget
    fn expand_alias(&mut self, id: usize, line: usize) {
        let Some(size) = self.anchors.get(&id).map(|(_, size)| *size) else {
            self.fail(ParseError::UnknownAlias { line });
            return;
        };
        self.expanded = self.expanded.saturating_add(size);
        if self.expanded > MAX_ALIAS_NODES {
            self.fail(ParseError::AliasLimit {
                line,
                limit: MAX_ALIAS_NODES,
            });
            return;
        }
        if let Some((node, _)) = self.anchors.get(&id).cloned() {
            self.attach(node, size, 0, line);
        }
    }
}

fn resolve_plain(text: &str) -> Node {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => Node::Null,
        "true" | "True" | "TRUE" => Node::Bool(true),
        "false" | "False" | "FALSE" => Node::Bool(false),
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Node::Float(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Node::Float(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Node::Float(f64::NAN),
        _ => parse_integer(text)
            .map(Node::Integer)
            .or_else(|| parse_float(text).map(Node::Float))
            .unwrap_or_else(|| Node::String(text.to_string())),
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(octal) = text.strip_prefix("0o") {
        return i64::from_str_radix(octal, 8).ok();
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    let numeric = text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric {
        return None;
    }
    text.parse().ok()
}

impl MarkedEventReceiver for Composer {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        let line = mark.line();
        match event {
            Event::Scalar(value, style, anchor, ..) => {
                if self.awaiting_key() {
                    self.set_key(value);
                    return;
                }
                let node = if style == TScalarStyle::Plain {
                    resolve_plain(&value)
                } else {
                    Node::String(value)
                };
                self.attach(node, 1, anchor, line);
            }
            Event::Alias(id) => self.expand_alias(id, line),
            Event::SequenceStart(anchor, ..) => self.stack.push(Frame::Sequence {
                anchor,
                items: Sequence {
                    source_line: line,
                    items: Vec::new(),
                },
                nodes: 1,
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Frame::Mapping {
                anchor,
                mapping: Mapping::new(line),
                key: None,
                nodes: 1,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (node, size, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence {
                        anchor,
                        items,
                        nodes,
                    }) => (Node::Sequence(items), nodes, anchor),
                    Some(Frame::Mapping {
                        anchor,
                        mapping,
                        nodes,
                        ..
                    }) => (Node::Mapping(mapping), nodes, anchor),
                    None => return,
                };
                self.attach(node, size, anchor, line);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
