#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pgbv", version, about = "Visualize the free space of PostgreSQL table blocks")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand. Unset flags fall back to the
/// environment, the config file, then built-in defaults.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Config file, extension optional [default: $HOME/.pg_buffer_viz]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. "info" or "pgbv_db=debug"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// PostgreSQL connection URL
    #[arg(long, global = true)]
    pub connect_url: Option<String>,

    /// Block width in pixels
    #[arg(long, global = true)]
    pub block_width: Option<u32>,

    /// Block height in pixels
    #[arg(long, global = true)]
    pub block_height: Option<u32>,

    /// Horizontal gap between relations, in blocks
    #[arg(long, global = true)]
    pub margin_width: Option<u32>,

    /// Vertical gap between relations, in blocks
    #[arg(long, global = true)]
    pub margin_height: Option<u32>,

    /// Seconds allowed for fetching one table
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Leave the hover script out of the SVG
    #[arg(long, global = true)]
    pub no_interactive: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render one table to an SVG file
    Generate(GenerateArgs),
    /// Serve block maps over HTTP
    Serve(ServeArgs),
    /// Print version and build target
    Version,
}

#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Table to render
    #[arg(long)]
    pub relation: Option<String>,

    /// Output file [default: output.svg]
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to listen on [default: 127.0.0.1:8080]
    #[arg(long)]
    pub listen_address: Option<String>,
}
