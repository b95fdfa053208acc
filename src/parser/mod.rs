/*
    This module reads grammars from BNF-style text files

    One rule per line: `NAME = alternative | alternative ...` (`->` also works).
    Terminals are quoted, bare words are nonterminals and an empty alternative
    is an epsilon production. Lines starting with `;` are comments.
*/

pub mod json;
mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use crate::debug_info;
use itertools::Itertools;
use lexer::*;

#[derive(Debug)]
pub enum CompileErrorType {
    // The rule name is not followed by `=` or `->`
    MissingArrow,
    // A second `=` or `->` inside the alternatives
    StrayArrow,
    // The line starts with something that cannot name a rule
    BadRuleName,
    UnclosedQuote,
    // A `|` survived splitting into alternatives. This is a bug in scaffold
    UnsplitRule,
    // An empty line reached the rule parser. This is a bug in scaffold
    BlankRule,
    FileError(std::io::Error),
    // A JSON grammar did not have the expected shape
    JsonError(serde_json::Error),
}

impl ErrorType for CompileErrorType {}

// io and serde errors carry no equality, so only their kind is compared
impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Rule name must be followed by `=` or `->`"),
            CompileErrorType::StrayArrow => write!(f, "Only one `=` or `->` is allowed per rule"),
            CompileErrorType::BadRuleName => write!(f, "A rule must start with a bare nonterminal name"),
            CompileErrorType::UnclosedQuote => write!(f, "Terminal is missing its closing quote"),
            CompileErrorType::UnsplitRule => write!(f, "Alternatives were not separated (bug in scaffold)"),
            CompileErrorType::BlankRule => write!(f, "Empty rule reached the parser (bug in scaffold)"),
            CompileErrorType::FileError(e) => write!(f, "Could not read grammar: {}", e),
            CompileErrorType::JsonError(e) => write!(f, "Malformed JSON grammar: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError::new(Location::file(file), CompileErrorType::FileError(error))
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    name: String,
    // Alternatives in the order written; an empty one is epsilon
    alternatives: Vec<Alternative>,
    location: Location
}

fn symbol(token: &Token) -> Result<Symbol> {
    match token {
        Token::Word(name) => Ok(Symbol::Nonterminal(name.clone())),
        Token::Quoted(text) => Ok(Symbol::Terminal(text.clone())),
        Token::Arrow => Err(CompileErrorType::StrayArrow),
        Token::Bar => Err(CompileErrorType::UnsplitRule),
    }
}

fn parse_rule(tokens: &[Token], location: Location) -> Result<Rule> {
    let (name, body) = match tokens {
        [Token::Word(name), Token::Arrow, body @ ..] => (name.clone(), body),
        [Token::Word(_), ..] => return Err(CompileErrorType::MissingArrow),
        [_, ..] => return Err(CompileErrorType::BadRuleName),
        [] => return Err(CompileErrorType::BlankRule),
    };

    let alternatives = body
        .split(|token| *token == Token::Bar)
        .map(|alternative| alternative.iter().map(symbol).collect::<Result<Alternative>>())
        .collect::<Result<Vec<_>>>()?;

    Ok(Rule { name, alternatives, location })
}

fn lex_and_parse(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|tokens| parse_rule(&tokens, location.clone()))
        .map_err(|error| CompileError::new(location, error))
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

// Lines of a file numbered from 1, with io errors located at the file
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .map(|(num, line)| (num + 1, line))
}

// A line ending in `\` carries on into the next one. The joined line keeps
// the number of the line it started on.
fn join_continuations(lines: impl Iterator<Item = (usize, LineResult<String>)>) -> Vec<(usize, LineResult<String>)> {
    let mut joined = Vec::new();
    let mut open: Option<(usize, String)> = None;

    for (num, line) in lines {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                joined.push((num, Err(error)));
                continue;
            }
        };

        let (first, mut text) = match open.take() {
            Some((first, mut text)) => {
                text.push(' ');
                text.push_str(&line);
                (first, text)
            }
            None => (num, line),
        };

        let kept = text.trim_end().len();
        if text[..kept].ends_with('\\') {
            text.truncate(kept - 1);
            open = Some((first, text));
        } else {
            joined.push((first, Ok(text)));
        }
    }

    // A trailing `\` on the last line continues into nothing
    joined.extend(open.map(|(first, text)| (first, Ok(text))));
    joined
}

// Every alternative becomes its own production, in the order written. A name
// defined on several lines keeps all of its alternatives.
fn grammar_from_rules(rules: Vec<Rule>) -> Grammar {
    let start = rules
        .first()
        .map(|rule| rule.name.clone())
        .unwrap_or_default();

    let productions = rules
        .into_iter()
        .flat_map(|rule| {
            let name = rule.name;
            rule.alternatives
                .into_iter()
                .map(move |rhs| Production::new(name.clone(), rhs))
        })
        .collect_vec();

    Grammar::new(start, productions)
}

fn parse_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Grammar> {
    let (rules, errors): (Vec<_>, Vec<_>) = join_continuations(lines)
        .into_iter()
        .filter(|(_, line)| line.as_ref().map_or(true, is_rule_line))
        .map(|(num, line)| line.and_then(|line| lex_and_parse(&line, Location::line(path, num))))
        .partition_result();

    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = grammar_from_rules(rules);
    debug_info!("parser", "{}: {} productions, start `{}`", path.display(), grammar.productions().len(), grammar.start_name());

    Ok(grammar)
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    parse_lines(file_line_nums(file, path), path)
}

// For grammar text held in memory; `origin` only shows up in error locations
pub fn parse_str(text: &str, origin: &Path) -> FileResult<Grammar> {
    let lines = text
        .lines()
        .enumerate()
        .map(|(num, line)| (num + 1, Ok(line.to_string())));

    parse_lines(lines, origin)
}
