//! CLI handling module
//!
//! Argument parsing and logging setup for the `kbench` binary.

mod args;
mod logging;

pub use args::Args;
pub use logging::init_logging;
