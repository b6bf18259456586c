pub mod completions;
pub mod generate;
pub mod init;

use clap::{Parser, Subcommand};

/// assets-gen - typed asset module generator
///
/// Without a subcommand, scans the asset directory and writes the module
/// (add --watch to keep it up to date).
#[derive(Parser, Debug)]
#[command(name = "assets-gen")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub generate: generate::GenerateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default assets-gen.config.json
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
