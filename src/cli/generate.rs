//! Generate command implementation.
//!
//! Loads the configuration, then either writes the module once or hands
//! over to the watch loop.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{Config, ConfigOverrides};
use crate::error::{AssetsGenError, Result};
use crate::output::{Logger, Printer};
use crate::pipeline::generate;
use crate::watch::watch;

/// Generate the typed asset module
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Path to config file (assets-gen.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Watch the assets directory for changes
    #[arg(short, long)]
    pub watch: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Assets directory (overrides config)
    #[arg(long)]
    pub assets_dir: Option<String>,

    /// Output file path (overrides config)
    #[arg(long)]
    pub output: Option<String>,

    /// Project root (default: current directory)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let project_root = resolve_root(&args.root)?;
    let printer = Printer::new().with_verbose(args.verbose);

    let config = load(&args, &project_root, &printer)?;
    let printer = printer.with_verbose(config.verbose);

    printer.debug(&format!("Project root: {}", project_root.display()));
    printer.debug(&format!("Assets directory: {}", config.assets_dir));
    printer.debug(&format!("Output file: {}", config.output));

    if args.watch {
        return watch(&config, &project_root, &printer);
    }

    generate(&config, &project_root, &printer)?;
    printer.success("Done!");

    Ok(())
}

/// Load, override and validate the configuration.
pub fn load(args: &GenerateArgs, project_root: &Path, logger: &dyn Logger) -> Result<Config> {
    let mut config = Config::discover(args.config.as_deref(), project_root, logger);

    config.apply(ConfigOverrides {
        assets_dir: args.assets_dir.clone(),
        output: args.output.clone(),
        verbose: args.verbose,
    });

    config.validate()?;
    Ok(config)
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }

    let cwd = std::env::current_dir()
        .map_err(|e| AssetsGenError::io(root, "Failed to resolve project root", e))?;
    Ok(cwd.join(root))
}
