//! Identifier derivation from file and directory names.
//!
//! Derivation is lossy: `my-icon.svg` and `my_icon.svg` both become `myIcon`.
//! Resolving the resulting clashes is the tree builder's job.

use std::path::Path;

/// Identifier used when a name contains no alphanumeric characters.
pub const FALLBACK_IDENTIFIER: &str = "asset";

/// Convert a file name into a camelCase identifier.
///
/// The extension is dropped, every run of characters outside `[A-Za-z0-9]`
/// acts as a word break, and names that would start with a digit get an
/// `asset` prefix. Always returns a non-empty identifier.
pub fn derive_identifier(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut ident = String::with_capacity(stem.len());
    let words = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty());

    for (index, word) in words.enumerate() {
        if index == 0 {
            ident.push_str(&word.to_ascii_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                ident.push(first.to_ascii_uppercase());
                ident.push_str(&chars.as_str().to_ascii_lowercase());
            }
        }
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert_str(0, FALLBACK_IDENTIFIER);
    }

    if ident.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        ident
    }
}

/// Convert a relative path into identifier segments: one per directory level
/// plus the file name.
pub fn path_segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(derive_identifier(&part.to_string_lossy())),
            _ => None,
        })
        .collect()
}
