//! Shared utilities for drowse
//!
//! This crate provides:
//! - Wall-clock time with debug-only mock time
//! - Timestamp parsing and formatting for command templates
//! - Default paths for the config file and the resume marker

mod paths;
mod time;

pub use paths::*;
pub use time::*;
