use crate::core::error::{BagError, BagResult};
use std::path::{Component, Path, PathBuf};

/// Get the bagit home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\bagit
/// - Linux: ~/.config/bagit
/// - macOS: ~/Library/Application Support/bagit
pub fn bagit_home() -> BagResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| BagError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("bagit"))
}

/// Get the config file path (`<bagit home>/config.yaml`)
pub fn config_file() -> BagResult<PathBuf> {
    Ok(bagit_home()?.join("config.yaml"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> BagResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolve a path handed over by a bag against its root.
///
/// Absolute paths are returned unchanged, anything else is taken as relative
/// to `root`.
pub fn resolve_in(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Path of `file` relative to `root`, always using `/` separators.
pub fn bag_relative(root: &Path, file: &Path) -> BagResult<String> {
    let file = resolve_in(root, file);
    let relative = pathdiff::diff_paths(&file, root).ok_or_else(|| {
        BagError::Path(format!(
            "Cannot express {} relative to {}",
            file.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    BagError::Path(format!(
                        "{} is not valid UTF-8 and cannot be recorded in a manifest",
                        file.display()
                    ))
                })?;
                parts.push(part.to_string());
            }
            Component::CurDir => {}
            _ => {
                return Err(BagError::Path(format!(
                    "{} is outside the bag at {}",
                    file.display(),
                    root.display()
                )))
            }
        }
    }

    if parts.is_empty() {
        return Err(BagError::Path(format!(
            "{} is the bag root, not a file in it",
            file.display()
        )));
    }

    Ok(parts.join("/"))
}
