//! Interactive command handler.

use std::io;

use anyhow::{Context, Result};

use roadtrip_cli::session;
use roadtrip_lib::RoadAtlas;

/// Run the prompt loop on stdin/stdout.
pub fn handle_interactive_command(atlas: &RoadAtlas) -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    session::run(atlas, stdin, stdout).context("interactive session failed")
}
