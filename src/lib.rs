#![forbid(unsafe_code)]

//! # dcr - a REPL for docker compose
//!
//! Wraps `docker compose` (or the legacy `docker-compose`) in an interactive
//! prompt bound to one compose project.
//!
//! ## Features
//!
//! - **Discovery**: finds the compose file by walking up from the working directory
//! - **Completion**: subcommands, flags, service and group names
//! - **Groups**: named service lists from a `.dcrgroups` file, expanded before dispatch
//! - **Projects**: remembered by name for quick re-entry from anywhere
//!
//! ## Example
//!
//! ```rust
//! use dcr::complete::complete;
//! use dcr::grammar::GrammarTable;
//! use dcr::rewrite::expand_groups;
//! use dcr::compose::GroupMap;
//!
//! let services = vec!["api".to_string(), "worker".to_string()];
//! let table = GrammarTable::build(&services, &[]);
//! assert_eq!(complete("restart w", 9, &table), vec!["orker "]);
//!
//! let mut groups = GroupMap::new();
//! groups.insert("backend".to_string(), services.clone());
//! let args = vec!["restart".to_string(), "backend".to_string()];
//! assert_eq!(expand_groups(&args, &groups), vec!["restart", "api", "worker"]);
//! ```

pub mod cli;
pub mod commands;
pub mod complete;
pub mod compose;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod grammar;
pub mod repl;
pub mod rewrite;
pub mod session;
pub mod signals;

// Re-exports
pub use complete::{complete, complete_next};
pub use compose::{GroupMap, ProjectDocuments};
pub use config::{ComposeTool, ProjectStore, Settings};
pub use dispatch::{ComposeInvocation, Dispatcher, ProcessDispatcher};
pub use error::{DcrError, Result};
pub use grammar::{CommandSpec, GrammarTable};
pub use rewrite::{expand_groups, rewrite};
pub use session::{Flow, Project, ProjectSelector, ReplCommand, Session};
