// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the pull, push, build and network subcommands.

use crate::output::OutputMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockwire")]
#[command(about = "Pull, push and build images against a container engine")]
#[command(version)]
pub struct Cli {
    /// Config file (default: dockwire.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Normal, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Normal,
    Quiet,
    Json,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Normal => OutputMode::Normal,
            OutputFormat::Quiet => OutputMode::Quiet,
            OutputFormat::Json => OutputMode::Json,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull an image from a registry
    Pull {
        /// Image name, optionally with its namespace (e.g. library/nginx)
        image: String,
        #[arg(short, long)]
        tag: Option<String>,
        /// Registry host[:port]
        #[arg(short, long)]
        registry: Option<String>,
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Push a repository to a registry
    Push {
        repository: String,
        #[arg(short, long)]
        tag: Option<String>,
        /// Registry host[:port]
        #[arg(short, long)]
        registry: Option<String>,
    },

    /// Build an image from a directory or remote context
    Build {
        /// Context directory, or a URL the engine fetches itself
        context: String,
        /// Repository for the built image
        #[arg(short = 'r', long)]
        repository: Option<String>,
        #[arg(short, long)]
        tag: Option<String>,
        /// Dockerfile path relative to the context
        #[arg(short = 'f', long)]
        dockerfile: Option<String>,
        #[arg(long)]
        no_cache: bool,
        /// Always pull newer base images
        #[arg(long)]
        pull: bool,
        /// Build-time variable, NAME=VALUE
        #[arg(long = "build-arg", value_parser = parse_build_arg)]
        build_args: Vec<(String, String)>,
    },

    /// Network operations
    Network {
        #[command(subcommand)]
        command: NetworkCommands,
    },
}

#[derive(Subcommand)]
pub enum NetworkCommands {
    /// Show a network's configuration as JSON
    Inspect { id: String },
}

fn parse_build_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}
