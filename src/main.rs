#![forbid(unsafe_code)]
//! dcr command line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use dcr::cli::partition_args;
use dcr::commands::{
    execute_complete, execute_fish, execute_list, execute_repl, execute_run, CompleteOptions,
    ListOptions, SessionOptions,
};
use dcr::config::ComposeTool;
use dcr::session::ProjectSelector;

#[derive(Parser)]
#[command(name = "dcr")]
#[command(about = "A REPL for docker compose")]
#[command(after_help = "Anything after PROJECT is run once as a compose command, \
    e.g. `dcr shop logs -f api`")]
#[command(version)]
struct Cli {
    /// Remembered project name, or `.` to find the compose file from the working directory
    project: Option<String>,

    /// Path to the compose file; found by walking up from the working directory if not given
    #[arg(long)]
    file: Option<PathBuf>,

    /// Env file for the compose context; defaults to .env next to the compose file
    #[arg(long)]
    env: Option<PathBuf>,

    /// Compose executable
    #[arg(long, env = "DCR_TOOL", value_enum)]
    tool: Option<ComposeTool>,

    /// dcr config directory
    #[arg(long, env = "DCR_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// List all remembered compose projects
    #[arg(long)]
    list: bool,

    /// Print the fish shell completion script
    #[arg(long)]
    fish: bool,

    /// Print completions for the next word
    #[arg(long, hide = true)]
    complete_next: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let parts = partition_args(&raw);
    let cli = Cli::parse_from(std::iter::once("dcr".to_string()).chain(parts.own));

    init_tracing(cli.verbose);

    if cli.fish {
        execute_fish();
        return Ok(());
    }

    let options = SessionOptions {
        selector: ProjectSelector {
            name: cli.project,
            file: cli.file,
            env: cli.env,
        },
        config_dir: cli.config_dir,
        tool: cli.tool,
    };

    if cli.list {
        return execute_list(ListOptions {
            config_dir: options.config_dir()?,
            full: true,
        });
    }

    if cli.complete_next {
        return execute_complete(CompleteOptions {
            session: options,
            words: parts.compose,
        });
    }

    if parts.compose.is_empty() {
        execute_repl(options)
    } else {
        execute_run(options, parts.compose)
    }
}
