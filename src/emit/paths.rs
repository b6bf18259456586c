//! Path arithmetic for references written into the generated module.

use std::path::{Component, Path, PathBuf};

use crate::discovery::normalize_path;

/// Resolve `.` and `..` components without touching the file system.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Relative path from directory `from` to `to`, joined with `/`.
///
/// Returns `None` when the two paths share no root (e.g. different drives).
pub fn relative_path(from: &Path, to: &Path) -> Option<String> {
    let from = clean_path(from);
    let to = clean_path(to);

    let mut from_parts = from.components().peekable();
    let mut to_parts = to.components().peekable();

    if from.has_root() != to.has_root() {
        return None;
    }

    let mut shared = 0;
    while let (Some(a), Some(b)) = (from_parts.peek(), to_parts.peek()) {
        if a != b {
            break;
        }
        from_parts.next();
        to_parts.next();
        shared += 1;
    }

    if from.has_root() && shared == 0 {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for part in from_parts {
        match part {
            Component::Normal(_) => parts.push("..".to_string()),
            _ => return None,
        }
    }
    for part in to_parts {
        match part {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            _ => return None,
        }
    }

    Some(parts.join("/"))
}

/// URL-style reference for an asset: `/` plus its path within the project,
/// or the absolute path when it lives outside the project root.
pub fn url_reference(project_root: &Path, asset: &Path) -> String {
    let root = clean_path(project_root);
    let asset = clean_path(asset);

    match asset.strip_prefix(&root) {
        Ok(relative) => format!("/{}", normalize_path(relative)),
        Err(_) => asset.to_string_lossy().replace('\\', "/"),
    }
}

/// Module specifier importing `asset` from a module located in `module_dir`.
pub fn import_specifier(module_dir: &Path, asset: &Path) -> String {
    match relative_path(module_dir, asset) {
        Some(relative) if relative.starts_with("../") => relative,
        Some(relative) => format!("./{}", relative),
        None => clean_path(asset).to_string_lossy().replace('\\', "/"),
    }
}
