//! Remembered projects
//!
//! Each project is a set of flat marker files in the config directory:
//! `<name>.path` holds the compose file path, `<name>.dcrgroups.path` the
//! group document path and `<name>.history` the REPL history.

use std::path::{Path, PathBuf};

use crate::error::{DcrError, Result};

const PATH_SUFFIX: &str = ".path";
const GROUPS_SUFFIX: &str = ".dcrgroups.path";
const HISTORY_SUFFIX: &str = ".history";

/// A project read back from its marker files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub compose_file: PathBuf,
    pub group_file: Option<PathBuf>,
}

/// Marker file store rooted at the dcr config directory
#[derive(Debug, Clone)]
pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    /// Open the store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn marker(&self, name: &str, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}{}", name, suffix))
    }

    pub fn history_path(&self, name: &str) -> PathBuf {
        self.marker(name, HISTORY_SUFFIX)
    }

    /// Record the compose file of a project
    pub fn remember(&self, name: &str, compose_file: &Path) -> Result<()> {
        std::fs::write(
            self.marker(name, PATH_SUFFIX),
            compose_file.to_string_lossy().as_bytes(),
        )?;
        Ok(())
    }

    /// Record the group document of a project
    pub fn remember_groups(&self, name: &str, group_file: &Path) -> Result<()> {
        std::fs::write(
            self.marker(name, GROUPS_SUFFIX),
            group_file.to_string_lossy().as_bytes(),
        )?;
        Ok(())
    }

    /// Resolve a project by name. The group marker is optional.
    pub fn resolve(&self, name: &str) -> Result<ProjectEntry> {
        let compose_file = read_marker(&self.marker(name, PATH_SUFFIX))
            .ok_or_else(|| DcrError::UnknownProject(name.to_string()))?;
        let group_file = read_marker(&self.marker(name, GROUPS_SUFFIX));

        Ok(ProjectEntry {
            name: name.to_string(),
            compose_file,
            group_file,
        })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.marker(name, PATH_SUFFIX).exists()
    }

    /// Make `alias` refer to the same markers as `name`.
    ///
    /// Existing markers of `alias` are replaced. A missing history file is
    /// created first so both names share it; other missing markers are skipped.
    /// Links always point at the resolved file, so aliasing back onto the
    /// project an alias came from leaves its markers in place.
    pub fn alias(&self, name: &str, alias: &str) -> Result<()> {
        for suffix in [HISTORY_SUFFIX, PATH_SUFFIX, GROUPS_SUFFIX] {
            let source = self.marker(name, suffix);
            let target = self.marker(alias, suffix);

            if suffix == HISTORY_SUFFIX && !source.exists() {
                std::fs::write(&source, b"")?;
            }
            let Ok(source) = std::fs::canonicalize(&source) else {
                continue;
            };
            if std::fs::canonicalize(&target).is_ok_and(|resolved| resolved == source) {
                continue;
            }
            if target.symlink_metadata().is_ok() {
                std::fs::remove_file(&target)?;
            }
            link_marker(&source, &target)?;
        }
        tracing::info!("Aliased project {} as {}", name, alias);
        Ok(())
    }

    /// All remembered projects, sorted by name
    pub fn list(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut names: Vec<String> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|file| file.ends_with(PATH_SUFFIX) && !file.ends_with(GROUPS_SUFFIX))
            .map(|file| file.trim_end_matches(PATH_SUFFIX).to_string())
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| {
                let path = read_marker(&self.marker(&name, PATH_SUFFIX)).unwrap_or_default();
                (name, path)
            })
            .collect())
    }
}

fn read_marker(path: &Path) -> Option<PathBuf> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(unix)]
fn link_marker(source: &Path, target: &Path) -> Result<()> {
    std::os::unix::fs::symlink(source, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn link_marker(source: &Path, target: &Path) -> Result<()> {
    std::fs::copy(source, target)?;
    Ok(())
}
