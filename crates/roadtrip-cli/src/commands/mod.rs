// Each module handles one CLI subcommand; main.rs only parses and dispatches.

pub mod interactive;
pub mod query;
