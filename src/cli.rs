//! CLI interface for the freelancer recommender

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freelancer-recommender")]
#[command(about = "Skill-based freelancer recommendation service")]
#[command(long_about = "Train a TF-IDF skill vocabulary and rank freelancers by skill similarity, rating and experience")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit the skill vocabulary from the data store and save the artifact
    Train {
        /// Artifact path (defaults to model.artifact_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fit from a CSV dataset instead of the configured store
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Skills column of the CSV dataset
        #[arg(long, default_value = "Skills")]
        skills_column: String,
    },

    /// Rank freelancers for a set of skills
    Recommend {
        /// Required skills, e.g. "Python" "Django"
        #[arg(required = true)]
        skills: Vec<String>,

        /// Number of results to return
        #[arg(short = 'n', long)]
        top_n: Option<i64>,

        /// Output format: console, json
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Run the HTTP API
    Serve {
        /// Bind host (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Retrain the vocabulary every N seconds
        #[arg(long, value_name = "SECS")]
        retrain_every: Option<u64>,
    },

    /// Model artifact commands
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Show information about the saved artifact
    Info {
        /// Artifact path (defaults to model.artifact_path)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}
