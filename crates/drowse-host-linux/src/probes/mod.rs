//! Built-in probes
//!
//! Activity: `ExternalCommand`, `Load`, `Ping`, `Processes`.
//! Wake: `Command`, `File`, `Periodic`.

mod command;
mod file;
mod load;
mod periodic;
mod ping;
mod processes;

pub use command::*;
pub use file::*;
pub use load::*;
pub use periodic::*;
pub use ping::*;
pub use processes::*;
