//! Probe and command-executor interfaces for drowse
//!
//! This crate defines the seam between the decision engine and everything
//! that touches the live system. It contains no platform code itself:
//! - `ActivityProbe` / `WakeProbe` capability traits
//! - `ProbeRegistry` mapping configured class names to factories
//! - `CommandExecutor` for suspend, notify and wake-scheduling commands
//! - Mock probes and a recording executor for tests

mod error;
mod executor;
mod mock;
mod options;
mod registry;
mod traits;

pub use error::*;
pub use executor::*;
pub use mock::*;
pub use options::*;
pub use registry::*;
pub use traits::*;
