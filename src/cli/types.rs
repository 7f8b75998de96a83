//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tourbook")]
#[command(about = "Tourbook - cached artist and concert catalogue", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .tourbook/config.yaml)
    #[arg(short, long, global = true, env = "TOURBOOK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every artist in the catalogue
    Artists,

    /// Show one artist with its concerts
    Artist {
        /// Artist id
        id: u32,
    },

    /// Concerts of every artist (location -> dates)
    Concerts,

    /// Locations every artist has played
    Locations,

    /// Performance dates of every artist
    Dates,

    /// Catalogue statistics
    Stats,
}
