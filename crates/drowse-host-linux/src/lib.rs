//! Linux host integration for drowse
//!
//! Provides:
//! - `/bin/sh -c` command execution
//! - The "just woke up" marker written by a resume hook
//! - Built-in activity and wake probes, and the registry that names them

mod executor;
mod marker;
mod probes;
mod registry;

pub use executor::*;
pub use marker::*;
pub use probes::*;
pub use registry::*;
