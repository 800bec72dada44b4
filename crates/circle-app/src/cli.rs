use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "circle", about = "Circle client: sign in from the terminal")]
pub struct Cli {
    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in against the configured account directory
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Accepted for parity with the login screen; sessions are not persisted
        #[arg(long)]
        remember_me: bool,
    },

    /// Check login input without contacting any service
    Validate {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Print the field errors as a JSON object
        #[arg(long)]
        json: bool,
    },
}
