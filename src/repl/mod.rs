//! Interactive input loop
//!
//! Wires a [`Session`] to a rustyline editor: completion goes through the
//! session's grammar table, accepted lines through [`Session::handle_line`].

use std::path::{Path, PathBuf};

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Context, Editor, Helper, Highlighter, Hinter, Validator};

use crate::complete::complete;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::grammar::GrammarTable;
use crate::session::{Flow, Session};

/// Editor helper completing from a snapshot of the grammar table
#[derive(Helper, Highlighter, Hinter, Validator)]
pub struct CompletionHelper {
    table: GrammarTable,
}

impl CompletionHelper {
    pub fn new(table: GrammarTable) -> Self {
        Self { table }
    }
}

impl Completer for CompletionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let word = if before.ends_with(char::is_whitespace) {
            ""
        } else {
            before.split_whitespace().last().unwrap_or("")
        };

        let candidates = complete(line, pos, &self.table)
            .into_iter()
            .map(|suffix| Pair {
                display: format!("{}{}", word, suffix.trim_end()),
                replacement: suffix,
            })
            .collect();

        Ok((pos, candidates))
    }
}

type DcrEditor = Editor<CompletionHelper, DefaultHistory>;

fn new_editor(table: &GrammarTable) -> Result<DcrEditor> {
    let config = Config::builder()
        .history_ignore_dups(true)?
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut editor = DcrEditor::with_config(config)?;
    editor.set_helper(Some(CompletionHelper::new(table.clone())));
    Ok(editor)
}

fn load_history(editor: &mut DcrEditor, path: &Path) {
    if let Err(e) = editor.load_history(path) {
        tracing::debug!("No history loaded from {}: {}", path.display(), e);
    }
}

/// Run the session until `exit` or end of input
pub fn run<D: Dispatcher>(session: &mut Session<D>) -> Result<()> {
    let mut editor = new_editor(session.table())?;
    let mut history: PathBuf = session.history_path();
    load_history(&mut editor, &history);

    loop {
        let line = match editor.readline(&session.prompt()) {
            Ok(line) => line,
            // Ctrl-C drops the current line only
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let line = line.trim();
        if !line.is_empty() {
            editor.add_history_entry(line)?;
            if let Err(e) = editor.save_history(&history) {
                tracing::warn!("Could not save history to {}: {}", history.display(), e);
            }
        }

        match session.handle_line(line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Ok(Flow::Reloaded) => {
                editor.set_helper(Some(CompletionHelper::new(session.table().clone())));
                let current = session.history_path();
                if current != history {
                    history = current;
                    editor.clear_history()?;
                    load_history(&mut editor, &history);
                }
            }
            Err(e) => eprintln!("{} {}", style("ERROR").red(), e),
        }
    }

    Ok(())
}
