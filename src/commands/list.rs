//! List remembered projects

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::ProjectStore;

/// Options for the list command
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// dcr config directory
    pub config_dir: PathBuf,
    /// Show compose file paths next to the names
    pub full: bool,
}

/// Execute the list command
pub fn execute_list(options: ListOptions) -> Result<()> {
    let store = ProjectStore::open(&options.config_dir)?;
    let projects = store.list()?;

    if projects.is_empty() && options.full {
        eprintln!("{} No projects remembered yet", style("!").yellow());
        eprintln!("  Run dcr inside a directory with a compose file to add one");
        return Ok(());
    }

    for line in format_project_list(&projects, options.full) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per project; with `full`, paths aligned four columns after the
/// longest name
pub fn format_project_list(projects: &[(String, PathBuf)], full: bool) -> Vec<String> {
    let width = projects.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    projects
        .iter()
        .map(|(name, path)| {
            if full {
                format!("{:width$}    {}", name, path.display(), width = width)
            } else {
                name.clone()
            }
        })
        .collect()
}
