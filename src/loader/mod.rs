/*
    This module parses grammar description files into a Grammar
*/

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use itertools::Itertools;

use crate::error_handling::*;
use crate::grammar::{Grammar, SymbolKind};

#[derive(Debug)]
pub enum LoadErrorType {
    // A rule line has no `->` after its left-hand symbol
    MissingArrow,
    // The left-hand side of a rule is not a nonterminal
    TerminalLeftSide(String),
    // An alternative between `|` separators (or after the arrow) is empty
    EmptyAlternative,
    // A blank line got past the line filter
    // This is a problem with leftmost, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let LoadErrorType::FileError(a) = self {
            if let LoadErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::MissingArrow => write!(f, "Expected `->` after the left-hand symbol"),
            LoadErrorType::TerminalLeftSide(name) => write!(f, "Left-hand side `{}` is not a nonterminal", name),
            LoadErrorType::EmptyAlternative => write!(f, "Empty alternative (use the EPSILON literal for an empty right side)"),
            LoadErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in the rule parser (this is a problem with leftmost, not the grammar)"),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

pub type Result<T> = std::result::Result<T, LoadErrorType>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

fn io_error(error: std::io::Error, file: PathBuf) -> LoadError {
    LoadError::at(Location::file_only(file), LoadErrorType::FileError(error))
}

// Symbol classification is purely lexical: an uppercase-initial name is a
// nonterminal, anything else is a terminal
fn classify(name: &str) -> SymbolKind {
    if name.chars().next().is_some_and(char::is_uppercase) {
        SymbolKind::Nonterminal
    } else {
        SymbolKind::Terminal
    }
}

// Parses one `LHS -> alt | alt` line, interning every previously-unseen
// name and appending one rule per alternative
fn parse_line(grammar: &mut Grammar, line: &str) -> Result<()> {
    let mut tokens = line.split_whitespace();

    let lhs_name = tokens.next().ok_or(LoadErrorType::UnexpectedBlankLine)?;
    if classify(lhs_name) != SymbolKind::Nonterminal {
        return Err(LoadErrorType::TerminalLeftSide(lhs_name.to_string()));
    }
    if tokens.next() != Some("->") {
        return Err(LoadErrorType::MissingArrow);
    }

    let lhs = grammar.intern(lhs_name, SymbolKind::Nonterminal);

    let rest = tokens.collect_vec();
    for alternative in rest.split(|&t| t == "|") {
        if alternative.is_empty() {
            return Err(LoadErrorType::EmptyAlternative);
        }
        let rhs = alternative.iter()
            .map(|&name| grammar.intern(name, classify(name)))
            .collect();
        grammar.push_rule(lhs, rhs);
    }

    return Ok(());
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with('#')
}

// Parses a whole grammar description. Lines are processed in order so
// symbol codes follow first appearance and the first rule's left side
// becomes the start symbol; every malformed line is reported, not just
// the first one.
pub fn load_str(text: &str, file: &PathBuf) -> FileResult<Grammar> {
    let mut grammar = Grammar::empty();
    let mut errors = LoadErrors::new();

    let numbered_lines = text.lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line));

    for (num, line) in numbered_lines {
        if let Err(error) = parse_line(&mut grammar, line) {
            errors.push(LoadError::at(
                Location { file: file.clone(), line: num + 1 },
                error,
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    return Ok(grammar);
}

pub fn load_file(path: &PathBuf) -> FileResult<Grammar> {
    let text = fs::read_to_string(path)
        .map_err(|e| vec![io_error(e, path.clone())])?;
    load_str(&text, path)
}
