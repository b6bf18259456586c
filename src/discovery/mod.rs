//! Asset discovery: extension table, identifier derivation and the
//! directory scanner.
//!
//! # Example
//!
//! ```ignore
//! use assets_gen::discovery::scan_assets;
//! use assets_gen::output::Printer;
//!
//! let records = scan_assets(Path::new("assets"), &Printer::new())?;
//! println!("Found {} assets", records.len());
//! ```

mod category;
mod identifier;
mod scanner;

pub use category::{
    detect_category, extension_of, is_supported_asset, AssetCategory, SUPPORTED_EXTENSIONS,
};
pub use identifier::{derive_identifier, path_segments, FALLBACK_IDENTIFIER};
pub use scanner::{normalize_path, scan_assets, AssetRecord};
