//! Compose and group documents
//!
//! YAML is decoded once into typed structures: the compose file only
//! contributes its service names, the optional group document a mapping
//! from group name to member services.

pub mod locate;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::{DcrError, Result};

pub use locate::{find_upwards, override_file, project_name};

/// Group name to ordered member services
pub type GroupMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Deserialize)]
struct RawCompose {
    services: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawGroups {
    groups: GroupMap,
}

/// Everything the session needs from a project's documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDocuments {
    /// Sorted, unique service names
    pub services: Vec<String>,
    /// `None` when group support is disabled for the session
    pub groups: Option<GroupMap>,
}

impl ProjectDocuments {
    /// Read the compose file (required) and the group document (optional).
    ///
    /// A missing or malformed group document only disables group support.
    pub fn load(compose_file: &Path, group_file: Option<&Path>) -> Result<Self> {
        let services = read_services(compose_file)?;
        let groups = group_file.and_then(|path| match read_groups(path) {
            Ok(groups) => Some(groups),
            Err(e) => {
                tracing::warn!("Group support disabled: {}", e);
                None
            }
        });

        Ok(Self { services, groups })
    }

    /// Group names, sorted; empty without group support
    pub fn group_names(&self) -> Vec<String> {
        self.groups
            .as_ref()
            .map(|groups| groups.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_groups(&self) -> bool {
        self.groups.is_some()
    }
}

/// Service names declared under `services`
pub fn parse_services(content: &str) -> std::result::Result<Vec<String>, serde_yaml::Error> {
    let raw: RawCompose = serde_yaml::from_str(content)?;
    let names: BTreeSet<String> = raw.services.into_keys().collect();
    Ok(names.into_iter().collect())
}

/// Groups declared under `groups`
pub fn parse_groups(content: &str) -> std::result::Result<GroupMap, serde_yaml::Error> {
    let raw: RawGroups = serde_yaml::from_str(content)?;
    Ok(raw.groups)
}

fn read_services(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    parse_services(&content).map_err(|source| DcrError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn read_groups(path: &Path) -> Result<GroupMap> {
    let content = std::fs::read_to_string(path)?;
    parse_groups(&content).map_err(|source| DcrError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSE: &str = r#"
version: "3"
services:
  worker:
    image: worker:latest
  api:
    build: .
    ports:
      - "8080:80"
volumes:
  data: {}
"#;

    #[test]
    fn test_services_are_sorted() {
        assert_eq!(parse_services(COMPOSE).unwrap(), vec!["api", "worker"]);
    }

    #[test]
    fn test_compose_without_services_is_rejected() {
        assert!(parse_services("version: '3'\nvolumes: {}\n").is_err());
        assert!(parse_services(": : not yaml [").is_err());
    }

    #[test]
    fn test_group_members_keep_declared_order() {
        let groups =
            parse_groups("groups:\n  backend: [worker, api]\n  all:\n    - api\n").unwrap();
        assert_eq!(groups["backend"], vec!["worker", "api"]);
        assert_eq!(groups["all"], vec!["api"]);
    }

    #[test]
    fn test_bad_group_document_disables_groups() {
        let dir = tempfile::tempdir().unwrap();
        let compose = dir.path().join("docker-compose.yml");
        let groups = dir.path().join(".dcrgroups");
        std::fs::write(&compose, COMPOSE).unwrap();
        std::fs::write(&groups, "groups: [not, a, map]").unwrap();

        let docs = ProjectDocuments::load(&compose, Some(&groups)).unwrap();
        assert_eq!(docs.services, vec!["api", "worker"]);
        assert!(!docs.has_groups());
        assert!(docs.group_names().is_empty());
    }

    #[test]
    fn test_missing_compose_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("docker-compose.yml");
        assert!(ProjectDocuments::load(&missing, None).is_err());
    }
}
