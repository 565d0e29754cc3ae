//! cuescan CLI library crate.
//!
//! Command implementations live here; the binary in `main.rs` only parses
//! arguments, installs the tracing subscriber, and dispatches.

pub mod cli_args;
pub mod commands;
pub mod input;
pub mod render;
