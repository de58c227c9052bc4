//! Command dispatch logic for dagwalk

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use dagwalk_core::config::Config;
use dagwalk_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => {
            println!("dagwalk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Walk(args)) => {
            let config = load_config(cli)?;
            debug!(elapsed = ?start.elapsed(), "load_config");
            super::walk::execute(cli, args, &config, start)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::discover(),
    }
}
