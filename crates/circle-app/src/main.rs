mod cli;
mod commands;
mod directory;
mod setup;

use anyhow::Result;
use clap::Parser;
use circle_core::config::AppConfig;
use circle_core::lifecycle;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref());
    lifecycle::init_tracing(&config.logging.filter);
    lifecycle::log_startup();

    let result = match cli.command {
        Commands::Login {
            email,
            password,
            remember_me,
        } => commands::login(&config, email, password, remember_me).await,
        Commands::Validate {
            email,
            password,
            json,
        } => commands::validate(email, password, json),
    };

    lifecycle::log_shutdown();
    result
}
