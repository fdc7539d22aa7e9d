//! File discovery around a compose project

use std::path::{Path, PathBuf};

use crate::error::{DcrError, Result};

/// Walk from `start` towards the filesystem root and return the first
/// existing file named one of `names` (earlier names win within a directory).
pub fn find_upwards(start: &Path, names: &[String]) -> Result<PathBuf> {
    let start = std::path::absolute(start)?;
    let mut last_dir = start.clone();

    for dir in start.ancestors() {
        last_dir = dir.to_path_buf();
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(DcrError::ComposeFileNotFound {
        names: names.join(", "),
        last_dir,
    })
}

/// `<stem>.override.<ext>` next to the compose file, if it exists
pub fn override_file(compose_file: &Path) -> Option<PathBuf> {
    let stem = compose_file.file_stem()?.to_str()?;
    let name = match compose_file.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.override.{}", stem, ext),
        None => format!("{}.override", stem),
    };
    let path = compose_file.with_file_name(name);
    path.is_file().then_some(path)
}

/// Project name: the directory holding the compose file
pub fn project_name(compose_file: &Path) -> String {
    compose_file
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "compose".to_string())
}
