//! Completion candidates for shell completion scripts

use anyhow::Result;

use crate::complete::complete_next;
use crate::config::ProjectStore;

use super::repl::{open_session, SessionOptions};

/// Options for the complete-next command
#[derive(Debug, Clone, Default)]
pub struct CompleteOptions {
    pub session: SessionOptions,
    /// Words of the compose command typed so far
    pub words: Vec<String>,
}

/// Execute the complete-next command
///
/// Without a project the candidates are `.` and every remembered project.
/// Otherwise the candidates for the word after `words`, one per line.
pub fn execute_complete(options: CompleteOptions) -> Result<()> {
    let selector = &options.session.selector;
    if selector.name.is_none() && selector.file.is_none() && options.words.is_empty() {
        let store = ProjectStore::open(options.session.config_dir()?)?;
        for candidate in project_candidates(&store)? {
            println!("{}", candidate);
        }
        return Ok(());
    }

    let session = match open_session(&options.session) {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!("No completions: {}", e);
            return Ok(());
        }
    };

    for candidate in complete_next(&options.words, session.table()) {
        println!("{}", candidate);
    }
    Ok(())
}

/// `.` for the working directory, then every remembered project
pub fn project_candidates(store: &ProjectStore) -> crate::Result<Vec<String>> {
    let mut candidates = vec![".".to_string()];
    candidates.extend(store.list()?.into_iter().map(|(name, _)| name));
    Ok(candidates)
}
