//! CLI command implementations
//!
//! One submodule per CLI mode. Each exposes an options struct and an
//! `execute_*` function called from `main`.

pub mod complete;
pub mod fish;
pub mod list;
pub mod repl;

pub use complete::{execute_complete, project_candidates, CompleteOptions};
pub use fish::{execute_fish, FISH_SCRIPT};
pub use list::{execute_list, format_project_list, ListOptions};
pub use repl::{execute_repl, execute_run, exit_code, open_session, SessionOptions};
