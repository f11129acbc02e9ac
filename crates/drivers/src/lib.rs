// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Hardware-control drivers and their capabilities
//!
//! A driver is built from a device's driver kind and opaque JSON
//! configuration. It exposes named interfaces (such as `power`), and each
//! interface exposes named actions that can be listed and invoked.

mod config;
mod driver;
mod emulated;
mod interface;
mod null;
mod pdu;
pub mod power;
mod registry;
pub mod traced;

pub use config::{ConfigError, DriverConfig};
pub use driver::{Driver, InterfaceFactory, InterfaceTable};
pub use emulated::EmulatedDriver;
pub use interface::{ActionFn, ActionTable, Interface, InterfaceError};
pub use null::NullDriver;
pub use pdu::{PduDriver, PowerInterface};
pub use power::{CommandPowerControl, NoOpPowerControl, PowerControl, PowerError, PowerOp};
pub use registry::{DriverFactory, DriverRegistry};
pub use traced::TracedPowerControl;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use power::{FakePowerControl, PowerCall};
