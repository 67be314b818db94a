use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Curated movie lists with cached poster artwork")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Fetch the downloaded movies from Radarr and write them as a list
    Fetch {
        /// Output file for the list
        #[arg(short, long, default_value = "movies.json")]
        output: PathBuf,

        /// Name to give the list
        #[arg(short, long, default_value = "library")]
        name: String,
    },

    /// Filter a list file by title keywords
    Filter {
        /// List file to read
        #[arg(required = true)]
        input: PathBuf,

        /// Output file for the filtered list
        #[arg(short, long, default_value = "filtered.json")]
        output: PathBuf,

        /// Keep movies whose title contains any of these keywords
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
