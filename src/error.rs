//! Error types for dcr

use std::path::PathBuf;

/// Errors raised by the dcr library.
#[derive(Debug, thiserror::Error)]
pub enum DcrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("could not find compose file (tried {names}), last checked dir '{last_dir}'")]
    ComposeFileNotFound { names: String, last_dir: PathBuf },

    #[error("unknown project '{0}', run dcr inside the project once or use --list")]
    UnknownProject(String),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("{program} exited with {}", exit_label(.code))]
    ToolFailed { program: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "a signal".to_string(),
    }
}

/// Result type for dcr operations
pub type Result<T> = std::result::Result<T, DcrError>;
