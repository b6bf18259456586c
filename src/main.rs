use assets_gen::cli::{Cli, Commands};
use assets_gen::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Some(Commands::Init(args)) => assets_gen::cli::init::run(args, &printer)?,
        Some(Commands::Completions(args)) => assets_gen::cli::completions::run(args)?,
        None => assets_gen::cli::generate::run(cli.generate)?,
    }

    Ok(())
}
