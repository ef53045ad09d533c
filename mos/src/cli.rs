//! Command-line interface for the demo driver

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "mos", about = "Drive the mosaic module lifecycle against a collections API")]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the collections API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log level (TRACE|DEBUG|INFO|WARN|ERROR)
    #[arg(long)]
    pub log_level: Option<String>,
}
