//! REPL session
//!
//! A session owns the resolved project, its decoded documents and the
//! grammar table built from them. Lines are handled one at a time: builtins
//! act on the session, everything else is group-expanded and forwarded to
//! the compose tool.

pub mod project;

use std::path::PathBuf;

use console::style;

use crate::complete::complete;
use crate::compose::{override_file, ProjectDocuments};
use crate::config::{ComposeTool, ProjectStore};
use crate::dispatch::{ComposeInvocation, Dispatcher};
use crate::error::Result;
use crate::grammar::GrammarTable;
use crate::rewrite::rewrite;

pub use project::{Project, ProjectSelector};

pub const REPL_HELP: &str = "REPL:
Wraps docker compose and has a few extra commands

Commands:
  alias <name>       Set alias for current docker compose file
  reload             Reloads docker compose and group files
  services           List services and groups
  exit               Leave the REPL

Docker Compose:";

/// One submitted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Alias(Vec<String>),
    Reload,
    Exit,
    Services,
    /// REPL help, then the tool's own help with these arguments
    Help(Vec<String>),
    Forward(Vec<String>),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        Self::from_args(line.split_whitespace().map(String::from).collect())
    }

    pub fn from_args(args: Vec<String>) -> Self {
        let Some(first) = args.first() else {
            return ReplCommand::Empty;
        };
        match first.as_str() {
            "" => ReplCommand::Empty,
            "alias" => ReplCommand::Alias(args[1..].to_vec()),
            "reload" => ReplCommand::Reload,
            "exit" | "quit" => ReplCommand::Exit,
            "services" => ReplCommand::Services,
            "help" => ReplCommand::Help(args),
            _ => ReplCommand::Forward(args),
        }
    }
}

/// What the input loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Grammar table, name or history file may have changed
    Reloaded,
    Exit,
}

type Confirm = Box<dyn FnMut(&str) -> bool>;

pub struct Session<D: Dispatcher> {
    project: Project,
    store: ProjectStore,
    tool: ComposeTool,
    documents: ProjectDocuments,
    table: GrammarTable,
    dispatcher: D,
    confirm: Confirm,
}

impl<D: Dispatcher> Session<D> {
    /// Load the project's documents. Fails if the compose file is unusable.
    pub fn open(
        project: Project,
        store: ProjectStore,
        tool: ComposeTool,
        dispatcher: D,
    ) -> Result<Self> {
        let documents =
            ProjectDocuments::load(&project.compose_file, project.group_file.as_deref())?;
        let table = GrammarTable::build(&documents.services, &documents.group_names());

        Ok(Self {
            project,
            store,
            tool,
            documents,
            table,
            dispatcher,
            confirm: Box::new(|_| true),
        })
    }

    /// Ask before an existing alias is replaced
    pub fn with_confirm(mut self, confirm: impl FnMut(&str) -> bool + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn documents(&self) -> &ProjectDocuments {
        &self.documents
    }

    pub fn table(&self) -> &GrammarTable {
        &self.table
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn prompt(&self) -> String {
        format!("{} ", style(format!("[{}]>", self.project.name)).green())
    }

    pub fn history_path(&self) -> PathBuf {
        self.store.history_path(&self.project.name)
    }

    /// Completion candidates for the current input
    pub fn complete(&self, line: &str, cursor: usize) -> Vec<String> {
        complete(line, cursor, &self.table)
    }

    /// Re-read both documents and rebuild the grammar table.
    ///
    /// On failure the previous state is kept.
    pub fn reload(&mut self) -> Result<()> {
        let documents = ProjectDocuments::load(
            &self.project.compose_file,
            self.project.group_file.as_deref(),
        )?;
        self.table = GrammarTable::build(&documents.services, &documents.group_names());
        self.documents = documents;
        tracing::debug!(
            "Reloaded {} ({} services, group support: {})",
            self.project.name,
            self.documents.services.len(),
            self.documents.has_groups()
        );
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        self.handle(ReplCommand::parse(line.trim()))
    }

    pub fn handle_args(&mut self, args: Vec<String>) -> Result<Flow> {
        self.handle(ReplCommand::from_args(args))
    }

    pub fn handle(&mut self, command: ReplCommand) -> Result<Flow> {
        match command {
            ReplCommand::Empty => Ok(Flow::Continue),
            ReplCommand::Exit => Ok(Flow::Exit),
            ReplCommand::Reload => {
                self.reload()?;
                Ok(Flow::Reloaded)
            }
            ReplCommand::Alias(names) => self.alias(&names),
            ReplCommand::Services => {
                for line in self.services_report() {
                    println!("{}", line);
                }
                Ok(Flow::Continue)
            }
            ReplCommand::Help(args) => {
                println!("{}", REPL_HELP);
                self.forward(&args)?;
                Ok(Flow::Continue)
            }
            ReplCommand::Forward(args) => {
                self.forward(&args)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn alias(&mut self, names: &[String]) -> Result<Flow> {
        let Some(alias) = names.first() else {
            warn_user(
                "alias needs exactly one parameter to be used as the alias for the compose file",
            );
            return Ok(Flow::Continue);
        };
        if names.len() > 1 {
            warn_user(&format!(
                "alias needs exactly one parameter, using '{}'",
                alias
            ));
        }

        if alias != &self.project.name
            && self.store.exists(alias)
            && !(self.confirm)(&format!("Project '{}' already exists, replace it?", alias))
        {
            return Ok(Flow::Continue);
        }

        self.store.alias(&self.project.name, alias)?;
        self.project.name = alias.clone();
        self.reload()?;
        Ok(Flow::Reloaded)
    }

    /// Services, then groups with their members
    pub fn services_report(&self) -> Vec<String> {
        let mut lines = self.documents.services.clone();
        if let Some(groups) = &self.documents.groups {
            for (name, members) in groups {
                lines.push(format!("{} {}", style(name).cyan(), style(members.join(" ")).dim()));
            }
        }
        lines
    }

    /// Build the invocation for a submitted command, groups expanded
    pub fn invocation(&self, args: &[String]) -> ComposeInvocation {
        ComposeInvocation {
            tool: self.tool,
            compose_file: self.project.compose_file.clone(),
            override_file: override_file(&self.project.compose_file),
            env_file: self.project.env_file.clone(),
            args: rewrite(args, self.documents.groups.as_ref()),
        }
    }

    pub fn forward(&mut self, args: &[String]) -> Result<()> {
        let invocation = self.invocation(args);
        self.dispatcher.dispatch(&invocation)
    }
}

fn warn_user(message: &str) {
    tracing::warn!("{}", message);
    eprintln!("{} {}", style("!").yellow(), message);
}
