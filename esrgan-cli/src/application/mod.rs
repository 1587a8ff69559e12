pub mod handlers;

use clap::Parser;

use esrgan_core::error::Result;

use crate::config;
use crate::presentation::cli::Cli;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.model_help {
        handlers::print_model_help();
        return Ok(());
    }

    let cfg = config::load(&cli.config)?;
    handlers::handle_run(&cli, &cfg)
}
