// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lab-core: shared data for the lab dispatcher
//!
//! This crate provides:
//! - The `Params` mapping and its overlay merge
//! - Device descriptions and per-intent device defaults
//! - Job identifiers and their generators
//! - Timeout parsing for job and action directives

pub mod device;
pub mod id;
pub mod params;
pub mod timeout;

pub use device::{Device, DriverSpec};
pub use id::{IdGen, JobId, SequentialIdGen, UuidIdGen};
pub use params::{overlay, Params};
pub use timeout::{format_timeout, parse_timeout, TimeoutError};
