// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job document loading with line provenance
//!
//! ```text
//! YAML text → loader → Node tree (every mapping carries its source line)
//! ```

mod loader;
mod node;

pub use loader::{load_document, ParseError, MAX_ALIAS_NODES};
pub use node::{Mapping, Node, Sequence};
