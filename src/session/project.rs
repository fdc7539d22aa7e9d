//! Working out which compose project a session is for

use std::path::{Path, PathBuf};

use crate::compose::{find_upwards, project_name};
use crate::config::{ProjectStore, Settings};
use crate::error::Result;

/// How the user pointed at a project
#[derive(Debug, Clone, Default)]
pub struct ProjectSelector {
    /// Remembered project name; `.` means discover from the working directory
    pub name: Option<String>,
    /// Explicit compose file
    pub file: Option<PathBuf>,
    /// Explicit env file
    pub env: Option<PathBuf>,
}

/// A resolved project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub compose_file: PathBuf,
    pub group_file: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

impl Project {
    /// Resolve the project and record its marker files when it was found
    /// on disk rather than by name.
    pub fn resolve(
        selector: &ProjectSelector,
        settings: &Settings,
        store: &ProjectStore,
        cwd: &Path,
    ) -> Result<Self> {
        let (name, compose_file, group_file) = match selector.name.as_deref() {
            Some(name) if name != "." => {
                let entry = store.resolve(name)?;
                (entry.name, entry.compose_file, entry.group_file)
            }
            _ => {
                let compose_file = match &selector.file {
                    Some(file) => std::path::absolute(file)?,
                    None => find_upwards(cwd, &settings.compose_files)?,
                };
                let name = project_name(&compose_file);
                store.remember(&name, &compose_file)?;

                let start = compose_file.parent().unwrap_or(cwd);
                let group_file =
                    find_upwards(start, std::slice::from_ref(&settings.group_file)).ok();
                if let Some(path) = &group_file {
                    if let Err(e) = store.remember_groups(&name, path) {
                        tracing::warn!("Could not record group file for {}: {}", name, e);
                    }
                }
                (name, compose_file, group_file)
            }
        };

        let env_file = match &selector.env {
            Some(env) => Some(std::path::absolute(env)?),
            None => compose_file
                .parent()
                .map(|dir| dir.join(".env"))
                .filter(|path| path.is_file()),
        };

        Ok(Self {
            name,
            compose_file,
            group_file,
            env_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _root: tempfile::TempDir,
        project_dir: PathBuf,
        store: ProjectStore,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let project_dir = root.path().join("shop");
        std::fs::create_dir_all(project_dir.join("src")).unwrap();
        std::fs::write(project_dir.join("docker-compose.yml"), "services:\n  api: {}\n").unwrap();
        let store = ProjectStore::open(root.path().join("config")).unwrap();
        Fixture {
            _root: root,
            project_dir,
            store,
        }
    }

    #[test]
    fn test_discover_records_markers() {
        let fx = fixture();
        std::fs::write(fx.project_dir.join(".dcrgroups"), "groups: {}\n").unwrap();

        let project = Project::resolve(
            &ProjectSelector::default(),
            &Settings::default(),
            &fx.store,
            &fx.project_dir.join("src"),
        )
        .unwrap();

        assert_eq!(project.name, "shop");
        assert_eq!(project.group_file, Some(fx.project_dir.join(".dcrgroups")));
        assert_eq!(project.env_file, None);

        let entry = fx.store.resolve("shop").unwrap();
        assert_eq!(entry.compose_file, fx.project_dir.join("docker-compose.yml"));
        assert_eq!(entry.group_file, project.group_file);
    }

    #[test]
    fn test_resolve_by_name_from_anywhere() {
        let fx = fixture();
        std::fs::write(fx.project_dir.join(".env"), "TAG=1\n").unwrap();
        fx.store
            .remember("shop", &fx.project_dir.join("docker-compose.yml"))
            .unwrap();

        let selector = ProjectSelector {
            name: Some("shop".into()),
            ..Default::default()
        };
        let elsewhere = tempfile::tempdir().unwrap();
        let project =
            Project::resolve(&selector, &Settings::default(), &fx.store, elsewhere.path()).unwrap();

        assert_eq!(project.group_file, None);
        assert_eq!(project.env_file, Some(fx.project_dir.join(".env")));
    }

    #[test]
    fn test_explicit_file() {
        let fx = fixture();
        let selector = ProjectSelector {
            name: Some(".".into()),
            file: Some(fx.project_dir.join("docker-compose.yml")),
            env: Some(fx.project_dir.join("prod.env")),
        };
        let project =
            Project::resolve(&selector, &Settings::default(), &fx.store, Path::new("/")).unwrap();

        assert_eq!(project.name, "shop");
        assert_eq!(project.env_file, Some(fx.project_dir.join("prod.env")));
        assert!(fx.store.exists("shop"));
    }
}
