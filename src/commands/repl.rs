//! Interactive and one-shot compose commands

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use crate::config::{default_config_dir, ComposeTool, ProjectStore, Settings};
use crate::dispatch::ProcessDispatcher;
use crate::error::DcrError;
use crate::session::{Project, ProjectSelector, Session};
use crate::signals::absorb_termination_signals;

/// Where the session's project comes from
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Project name, compose file and env file as given on the command line
    pub selector: ProjectSelector,
    /// Config directory override
    pub config_dir: Option<PathBuf>,
    /// Compose executable override
    pub tool: Option<ComposeTool>,
}

impl SessionOptions {
    pub fn config_dir(&self) -> crate::Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_config_dir(),
        }
    }
}

/// Resolve the project and load its documents
pub fn open_session(options: &SessionOptions) -> crate::Result<Session<ProcessDispatcher>> {
    let config_dir = options.config_dir()?;
    let settings = Settings::load_from_dir(&config_dir)?;
    let store = ProjectStore::open(&config_dir)?;
    let cwd = std::env::current_dir()?;

    let project = Project::resolve(&options.selector, &settings, &store, &cwd)?;
    let tool = options.tool.unwrap_or(settings.tool);
    tracing::debug!(
        "Project {} at {} ({})",
        project.name,
        project.compose_file.display(),
        tool.program()
    );

    Session::open(project, store, tool, ProcessDispatcher)
}

/// Execute the interactive REPL
pub fn execute_repl(options: SessionOptions) -> Result<()> {
    let session = open_session(&options)?;
    absorb_termination_signals()?;

    let mut session = session.with_confirm(|question| {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    });

    crate::repl::run(&mut session)?;
    Ok(())
}

/// Execute a single command without entering the REPL
pub fn execute_run(options: SessionOptions, args: Vec<String>) -> Result<()> {
    let mut session = open_session(&options)?;
    absorb_termination_signals()?;

    match session.handle_args(args) {
        Ok(_) => Ok(()),
        Err(e) => match exit_code(&e) {
            Some(code) => {
                eprintln!("{} {}", style("✗").red(), e);
                std::process::exit(code);
            }
            None => Err(e.into()),
        },
    }
}

/// Process exit code for a failed one-shot command.
///
/// The tool's own code when it exited with one, 1 when it was killed by a
/// signal. `None` for errors that are not a tool failure.
pub fn exit_code(error: &DcrError) -> Option<i32> {
    match error {
        DcrError::ToolFailed { code, .. } => Some(code.unwrap_or(1)),
        _ => None,
    }
}
