//! Settings loading and defaults
//!
//! Settings live in `config.json` inside the dcr config directory
//! (`$HOME/.config/dcr` unless overridden). Every field is optional.

pub mod projects;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use projects::{ProjectEntry, ProjectStore};

/// Name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "config.json";

/// Main dcr settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Compose file names searched for when walking up the tree, in priority order
    #[serde(default = "default_compose_files")]
    pub compose_files: Vec<String>,

    /// File name of the group document
    #[serde(default = "default_group_file")]
    pub group_file: String,

    /// External compose executable
    #[serde(default)]
    pub tool: ComposeTool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compose_files: default_compose_files(),
            group_file: default_group_file(),
            tool: ComposeTool::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load `config.json` from the config directory, defaults when it is absent
    pub fn load_from_dir(dir: &Path) -> crate::Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

fn default_compose_files() -> Vec<String> {
    vec![
        "docker-compose.yml".to_string(),
        "docker-compose.yaml".to_string(),
        "compose.yml".to_string(),
        "compose.yaml".to_string(),
    ]
}

fn default_group_file() -> String {
    ".dcrgroups".to_string()
}

/// Which executable runs compose commands
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ComposeTool {
    /// `docker compose ...` (compose v2 plugin)
    #[default]
    Docker,
    /// `docker-compose ...` (legacy standalone binary)
    DockerCompose,
}

impl ComposeTool {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            ComposeTool::Docker => "docker",
            ComposeTool::DockerCompose => "docker-compose",
        }
    }

    /// Arguments placed before everything else
    pub fn leading_args(&self) -> &'static [&'static str] {
        match self {
            ComposeTool::Docker => &["compose"],
            ComposeTool::DockerCompose => &[],
        }
    }
}

/// Default config directory, `$HOME/.config/dcr`
pub fn default_config_dir() -> crate::Result<PathBuf> {
    let home = dirs::home_dir().ok_or(crate::DcrError::NoHomeDir)?;
    Ok(home.join(".config").join("dcr"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"tool": "docker-compose"}"#).unwrap();
        assert_eq!(settings.tool, ComposeTool::DockerCompose);
        assert_eq!(settings.group_file, ".dcrgroups");
        assert_eq!(settings.compose_files[0], "docker-compose.yml");
    }

    #[test]
    fn test_missing_settings_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_file_in_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"group_file": "groups.yml", "compose_files": ["stack.yml"]}"#,
        )
        .unwrap();
        let settings = Settings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings.group_file, "groups.yml");
        assert_eq!(settings.compose_files, vec!["stack.yml"]);
        assert_eq!(settings.tool, ComposeTool::Docker);
    }

    #[test]
    fn test_tool_invocation_prefix() {
        assert_eq!(ComposeTool::Docker.program(), "docker");
        assert_eq!(ComposeTool::Docker.leading_args(), &["compose"]);
        assert!(ComposeTool::DockerCompose.leading_args().is_empty());
    }
}
