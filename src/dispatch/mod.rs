//! Running the external compose tool

use std::path::PathBuf;
use std::process::Command;

use crate::config::ComposeTool;
use crate::error::{DcrError, Result};

/// A fully resolved compose command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInvocation {
    pub tool: ComposeTool,
    pub compose_file: PathBuf,
    pub override_file: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Subcommand and its arguments, groups already expanded
    pub args: Vec<String>,
}

impl ComposeInvocation {
    pub fn program(&self) -> &'static str {
        self.tool.program()
    }

    /// Everything after the program name
    pub fn arguments(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .tool
            .leading_args()
            .iter()
            .map(|a| a.to_string())
            .collect();

        out.push("-f".to_string());
        out.push(self.compose_file.to_string_lossy().into_owned());
        if let Some(path) = &self.override_file {
            out.push("-f".to_string());
            out.push(path.to_string_lossy().into_owned());
        }
        if let Some(path) = &self.env_file {
            out.push("--env-file".to_string());
            out.push(path.to_string_lossy().into_owned());
        }
        out.extend(self.args.iter().cloned());
        out
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.arguments());
        command
    }
}

/// Hands invocations to whatever runs them
pub trait Dispatcher {
    /// Run to completion. A non-zero exit is an error.
    fn dispatch(&mut self, invocation: &ComposeInvocation) -> Result<()>;
}

/// Spawns the tool with the terminal's stdin, stdout and stderr and waits
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessDispatcher;

impl Dispatcher for ProcessDispatcher {
    fn dispatch(&mut self, invocation: &ComposeInvocation) -> Result<()> {
        let program = invocation.program();
        tracing::debug!("Dispatching {} {:?}", program, invocation.arguments());

        let status = invocation
            .to_command()
            .status()
            .map_err(|source| DcrError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(DcrError::ToolFailed {
                program: program.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}
