//! Project configuration (`assets-gen.config.json`).
//!
//! Every field is optional in the file and falls back to its default; the
//! nested `svg` section merges field by field. A configuration that cannot
//! be read or parsed is replaced by the defaults with a warning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AssetsGenError, Result};
use crate::output::Logger;

/// The name of the configuration file looked up in the project root.
pub const CONFIG_FILENAME: &str = "assets-gen.config.json";

/// Required extension of the generated module.
pub const OUTPUT_EXTENSION: &str = ".ts";

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Directory containing assets, relative to the project root.
    pub assets_dir: String,

    /// Output module path, relative to the project root.
    pub output: String,

    /// SVG handling.
    pub svg: SvgConfig,

    /// Enable debug logging.
    pub verbose: bool,
}

/// SVG handling options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgConfig {
    /// Expose SVGs as components (requires an SVG component transform in
    /// the bundler).
    pub as_component: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self { as_component: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            output: "src/generated/assets.ts".to_string(),
            svg: SvgConfig::default(),
            verbose: false,
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub assets_dir: Option<String>,
    pub output: Option<String>,
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AssetsGenError::Config {
            message: format!("Invalid configuration: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AssetsGenError::io(path, "Failed to read config", e))?;

        Self::parse(&content)
    }

    /// Load the configuration for a project, falling back to defaults.
    ///
    /// An explicit path is taken as given, relative to the working directory.
    /// Without one, `assets-gen.config.json` in `project_root` is used when
    /// present.
    pub fn discover(explicit: Option<&Path>, project_root: &Path, logger: &dyn Logger) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = project_root.join(CONFIG_FILENAME);
                if !default_path.is_file() {
                    logger.debug("No config file found, using defaults");
                    return Self::default();
                }
                default_path
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                logger.debug(&format!("Loaded config from: {}", path.display()));
                config
            }
            Err(err) => {
                logger.warn(&format!(
                    "Failed to load config from {}, using defaults",
                    path.display()
                ));
                logger.debug(&err.to_string());
                Self::default()
            }
        }
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(assets_dir) = overrides.assets_dir {
            self.assets_dir = assets_dir;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if overrides.verbose {
            self.verbose = true;
        }
    }

    /// Check required fields before anything is scanned or written.
    pub fn validate(&self) -> Result<()> {
        if self.assets_dir.trim().is_empty() {
            return Err(AssetsGenError::Config {
                message: "assetsDir is required in configuration".to_string(),
                help: Some("Set \"assetsDir\" or pass --assets-dir".to_string()),
            });
        }

        if self.output.trim().is_empty() {
            return Err(AssetsGenError::Config {
                message: "output is required in configuration".to_string(),
                help: Some("Set \"output\" or pass --output".to_string()),
            });
        }

        if !self.output.ends_with(OUTPUT_EXTENSION) {
            return Err(AssetsGenError::Config {
                message: format!("output must be a {} file, got {}", OUTPUT_EXTENSION, self.output),
                help: Some("e.g. \"src/generated/assets.ts\"".to_string()),
            });
        }

        Ok(())
    }

    /// Absolute asset root for a project.
    pub fn assets_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.assets_dir)
    }

    /// Absolute output module path for a project.
    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output)
    }

    /// Render as pretty JSON (used by `init`).
    pub fn to_json(&self) -> String {
        // Serializing plain strings and bools cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
