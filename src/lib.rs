//! assets-gen - typed asset module generator
//!
//! Scans a directory of static assets (images, SVGs, fonts, audio, video)
//! and writes a TypeScript module exposing every file under a nested,
//! strongly typed identifier path that mirrors the directory layout.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod tree;
pub mod watch;

pub use config::{Config, ConfigOverrides, SvgConfig, CONFIG_FILENAME};
pub use discovery::{derive_identifier, scan_assets, AssetCategory, AssetRecord};
pub use emit::{emit_module, EmitOptions};
pub use error::{AssetsGenError, Result};
pub use output::{Level, Logger, MemoryLogger, Printer};
pub use pipeline::{generate, render, GenerateReport};
pub use tree::{build_tree, AssetNode, AssetTree, Collision, TreeBuild, TreeBuilder};
pub use watch::{watch, RunGate, RunState, WatchCoordinator, WatchMessage};
