//! Road trip CLI library.
//!
//! Holds the pieces of the `roadtrip` binary that are worth testing without
//! spawning a process: the interactive session and output formatting.

pub mod output;
pub mod session;
