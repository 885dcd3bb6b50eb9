//! Command-line surface of the `vkgen` binary.
//!
//! A thin clap layer: flags mirror the driver's filter and mode options, and
//! everything is converted into a typed [`GenArgs`](crate::run::GenArgs)
//! before the run controller takes over.

mod commands;

pub use commands::{run_cli, Cli};
