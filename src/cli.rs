//! Splitting raw arguments between dcr and the compose command
//!
//! `dcr shop logs -f --tail=10 api` must not let clap see `-f` or `--tail`.
//! dcr's own options are only recognised before the compose command starts,
//! except `--complete-next`, which shell completion scripts append at the end.

/// Options understood by dcr itself
const OWN_FLAGS: &[&str] = &[
    "--complete-next",
    "--config-dir",
    "--env",
    "--file",
    "--fish",
    "--help",
    "--list",
    "--tool",
    "--verbose",
    "--version",
    "-V",
    "-h",
    "-v",
    "-vv",
    "-vvv",
];

/// Own options that take a value, either `--opt=value` or `--opt value`
const VALUE_FLAGS: &[&str] = &["--config-dir", "--env", "--file", "--tool"];

const COMPLETE_FLAG: &str = "--complete-next";

/// Arguments after partitioning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedArgs {
    /// dcr options and the project name, for clap
    pub own: Vec<String>,
    /// Compose command, verbatim
    pub compose: Vec<String>,
}

pub fn partition_args(raw: &[String]) -> PartitionedArgs {
    let mut out = PartitionedArgs::default();
    let mut has_project = false;
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        let in_command = !out.compose.is_empty();
        let key = arg.split('=').next().unwrap_or(arg);

        if arg == COMPLETE_FLAG || (!in_command && OWN_FLAGS.contains(&key)) {
            out.own.push(arg.clone());
            if VALUE_FLAGS.contains(&key) && !arg.contains('=') {
                if let Some(value) = iter.next() {
                    out.own.push(value.clone());
                }
            }
            continue;
        }

        if !has_project && !in_command && !arg.starts_with('-') {
            has_project = true;
            out.own.push(arg.clone());
        } else {
            out.compose.push(arg.clone());
        }
    }

    out
}
