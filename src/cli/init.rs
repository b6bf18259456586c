//! Init command implementation.
//!
//! Writes a default `assets-gen.config.json`.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::discovery::scan_assets;
use crate::error::{AssetsGenError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize an assets-gen project by writing a default config file
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(AssetsGenError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let config = Config::default();
    let mut json = config.to_json();
    json.push('\n');

    fs::write(&config_path, &json)
        .map_err(|e| AssetsGenError::io(&config_path, "Failed to write config", e))?;

    let assets_path = config.assets_path(&args.path);
    printer.status("Scanning", &display_path(&assets_path));
    let total = scan_assets(&assets_path, printer)?.len();

    printer.status(
        "Created",
        &format!("{} ({} found)", CONFIG_FILENAME, plural(total, "asset", "assets")),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_config() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("\"assetsDir\": \"assets\""));
        assert!(content.contains("\"asComponent\": true"));
        assert_eq!(Config::parse(&content).unwrap(), Config::default());
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        assert!(run(args, &Printer::new()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "assetsDir": "old" }"#).unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(!content.contains("old"));
    }
}
