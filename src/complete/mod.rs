//! Completion engine
//!
//! Turns a partially typed line into candidate suffixes for the word under
//! the cursor. Every candidate is what must be appended to the current word,
//! including a trailing space unless the candidate ends in `=` (a value is
//! expected right after it).

use crate::grammar::{CommandSpec, GrammarTable};

const FLAG_MARKER: char = '-';
const VALUE_SEPARATOR: char = '=';

/// Candidate suffixes for the word ending at `cursor`.
///
/// `cursor` is a byte offset into `line`; anything after it is ignored.
/// Never fails: no match is an empty list.
pub fn complete(line: &str, cursor: usize, table: &GrammarTable) -> Vec<String> {
    let input = &line[..floor_char_boundary(line, cursor)];
    let tokens = tokenize(input);

    if tokens.len() == 1 {
        let word = tokens[0];
        return table
            .names()
            .filter(|name| name.starts_with(word))
            .map(|name| suffix(name, word))
            .collect();
    }

    match table.get(tokens[0]) {
        Some(spec) if spec.accepts_children => complete_argument(spec, &tokens),
        _ => Vec::new(),
    }
}

/// Candidates for the word following `words`, with separators trimmed.
///
/// Used by shell completion scripts, which pass the words typed so far.
pub fn complete_next(words: &[String], table: &GrammarTable) -> Vec<String> {
    let mut line = words.join(" ");
    if !line.is_empty() {
        line.push(' ');
    }
    complete(&line, line.len(), table)
        .into_iter()
        .map(|candidate| candidate.trim_end().to_string())
        .collect()
}

fn complete_argument(spec: &CommandSpec, tokens: &[&str]) -> Vec<String> {
    let last = tokens.len() - 1;
    let word = tokens[last];
    let mut suggestions = Vec::new();

    let after_flag = tokens[last - 1].starts_with(FLAG_MARKER);
    if (last == 1 || after_flag) && word.starts_with(FLAG_MARKER) {
        let mut flags: Vec<String> = spec
            .flags
            .iter()
            .filter(|flag| flag.starts_with(word))
            .map(|flag| suffix(flag, word))
            .collect();
        flags.sort();
        suggestions.extend(flags);
    }

    let child_given = tokens[1..last]
        .iter()
        .any(|token| !token.starts_with(FLAG_MARKER));
    if spec.recurses_into_children || !child_given {
        suggestions.extend(
            spec.children
                .iter()
                .filter(|child| child.starts_with(word))
                .map(|child| suffix(child, word)),
        );
    }

    suggestions
}

/// Whitespace separated words; a trailing separator starts a new empty word
fn tokenize(input: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.is_empty() || input.ends_with(char::is_whitespace) {
        tokens.push("");
    }
    tokens
}

fn suffix(candidate: &str, word: &str) -> String {
    let rest = &candidate[word.len()..];
    if candidate.ends_with(VALUE_SEPARATOR) {
        rest.to_string()
    } else {
        format!("{} ", rest)
    }
}

fn floor_char_boundary(line: &str, cursor: usize) -> usize {
    let mut end = cursor.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    end
}
