//! CLI for the regmirror registry configuration synthesizer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use regmirror_core::config;
use std::path::PathBuf;

use commands::{run_generate, run_show};

/// Top-level CLI for regmirror.
#[derive(Debug, Parser)]
#[command(name = "regmirror")]
#[command(about = "regmirror: containerd registry mirror configuration from cluster mirror policies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Render one hosts.toml per mirrored source.
    Generate {
        /// Policy bundle files (JSON, or TOML by `.toml` extension). Merged in order.
        #[arg(short, long = "policies", value_name = "FILE", required = true, num_args = 1..)]
        policies: Vec<PathBuf>,

        /// Write files under the output directory instead of printing to stdout.
        #[arg(long)]
        write: bool,

        /// Override the configured output directory (used with --write).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Show the merged mirror table without rendering.
    Show {
        /// Policy bundle files (JSON, or TOML by `.toml` extension). Merged in order.
        #[arg(short, long = "policies", value_name = "FILE", required = true, num_args = 1..)]
        policies: Vec<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Generate {
                policies,
                write,
                output_dir,
            } => run_generate(&cfg, &policies, write, output_dir.as_deref())?,
            CliCommand::Show { policies } => run_show(&policies)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
