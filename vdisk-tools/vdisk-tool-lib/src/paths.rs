use crate::ImageError;
use std::path::{Path, PathBuf};

/// Replaces a leading `~` with the user's home directory. Other paths are returned unchanged.
pub fn expand_path(path: &str) -> PathBuf {
    let rest = if path == "~" {
        ""
    } else if let Some(r) = path.strip_prefix("~/") {
        r
    } else {
        return PathBuf::from(path);
    };

    return match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(path),
    };
}

/// Creates every missing directory above `path`.
pub fn create_parent_directories(path: &Path) -> Result<(), ImageError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };

    return match std::fs::create_dir_all(parent) {
        Ok(_) => Ok(()),
        Err(e) => Err(ImageError::new(&format!(
            "Failed to create directory {}. Error: {}",
            parent.display(),
            e
        ))),
    };
}
