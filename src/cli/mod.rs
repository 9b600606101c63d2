//! CLI module - Command-line interface for Watchlist
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a personal movie watchlist served over HTTP
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "run")]
    Serve,

    /// Create the database tables
    #[command(alias = "initdb")]
    InitDb {
        /// Drop all existing tables first
        #[arg(long)]
        drop: bool,
    },

    /// Fill the watchlist with sample movies
    Forge,

    /// Create the account, or update its credentials if it already exists
    Admin {
        /// Login username
        #[arg(long)]
        username: String,
        /// Login password
        #[arg(long)]
        password: String,
        /// Display name (defaults to "Admin" for a new account)
        #[arg(long)]
        name: Option<String>,
    },

    /// Create default config file
    InitConfig,
}

pub use commands::*;
