//! Suspend decision engine for drowse
//!
//! This crate is the heart of drowse, containing:
//! - Aggregation of activity probes (logical OR) and wake probes (earliest future instant)
//! - Idle-tracking state machine (Active -> Idle(since) -> suspend)
//! - Dispatch of notify, wake-scheduling and suspend commands
//! - Construction of probes from validated settings

mod aggregate;
mod dispatcher;
mod processor;
mod setup;
mod state;

pub use aggregate::*;
pub use dispatcher::*;
pub use processor::*;
pub use setup::*;
pub use state::*;
