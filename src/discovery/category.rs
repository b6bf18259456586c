//! Supported extensions and the categories they map to.

use std::fmt;
use std::path::Path;

/// Classification of an asset by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Images,
    Svg,
    Fonts,
    Videos,
    Audio,
}

/// Extension table, checked in order. `.ogg` appears under both videos and
/// audio; the earlier entry (videos) claims it.
pub const SUPPORTED_EXTENSIONS: &[(AssetCategory, &[&str])] = &[
    (
        AssetCategory::Images,
        &[".png", ".jpg", ".jpeg", ".webp", ".gif", ".avif"],
    ),
    (AssetCategory::Svg, &[".svg"]),
    (
        AssetCategory::Fonts,
        &[".woff", ".woff2", ".ttf", ".otf", ".eot"],
    ),
    (AssetCategory::Videos, &[".mp4", ".webm", ".ogg"]),
    (AssetCategory::Audio, &[".mp3", ".wav", ".ogg", ".m4a"]),
];

impl AssetCategory {
    /// Classify an extension (with leading dot, any case).
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.to_ascii_lowercase();

        SUPPORTED_EXTENSIONS
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(category, _)| *category)
    }

    /// Get the short name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            AssetCategory::Images => "images",
            AssetCategory::Svg => "svg",
            AssetCategory::Fonts => "fonts",
            AssetCategory::Videos => "videos",
            AssetCategory::Audio => "audio",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lowercased extension of a path, including the leading dot.
pub fn extension_of(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Detect the category of a file path based on its extension.
pub fn detect_category(path: &Path) -> Option<AssetCategory> {
    extension_of(path).and_then(|ext| AssetCategory::from_extension(&ext))
}

/// Check if a path has a supported asset extension.
pub fn is_supported_asset(path: &Path) -> bool {
    detect_category(path).is_some()
}
