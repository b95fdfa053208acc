/*
    Grammars in the JSON exchange shape:
    {"start": "S", "productions": [{"lhs": "S", "rhs": [{"text": "go", "isTerminal": true}]}]}
*/

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{io_error, CompileError, CompileErrorType, FileResult};
use crate::debug_info;
use crate::error_handling::Location;
use crate::grammar::Grammar;

fn json_error(error: serde_json::Error, file: &Path) -> CompileError {
    // serde reports lines starting at 1, and 0 when it has no position
    CompileError::new(Location::line(file, error.line()), CompileErrorType::JsonError(error))
}

pub fn parse_json_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    let grammar: Grammar = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| vec![json_error(e, path)])?;

    debug_info!("parser.json", "{}: {} productions, start `{}`", path.display(), grammar.productions().len(), grammar.start_name());

    Ok(grammar)
}

pub fn parse_json_str(text: &str, origin: &Path) -> FileResult<Grammar> {
    serde_json::from_str(text).map_err(|e| vec![json_error(e, origin)])
}

pub fn to_json_string(grammar: &Grammar) -> String {
    // A grammar is plain strings and booleans, so this cannot fail
    serde_json::to_string(grammar).unwrap_or_default()
}
