/*
    This module composes sentences the way a user of the oracle would: ask
    which tokens may come next, pick one, repeat until the sentence is complete
*/

use rand::prelude::*;
use std::fmt::Display;
use std::path::Path;

use itertools::Itertools;

use crate::debug_debug;
use crate::error_handling::*;
use crate::grammar::Grammar;
use crate::search::completion::complete;

#[derive(Debug, PartialEq)]
pub enum ComposeErrorType {
    // Nothing may follow these tokens, yet they are not a sentence
    DeadEnd(Vec<String>),
    // The sentence grew past the allowed number of tokens
    TokenLimit(usize),
}

impl ErrorType for ComposeErrorType {}

impl Display for ComposeErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeErrorType::DeadEnd(tokens) => write!(f, "No way to continue or finish `{}`", render(tokens)),
            ComposeErrorType::TokenLimit(limit) => write!(f, "Sentence did not finish within {} tokens", limit),
        }
    }
}

pub type ComposeError = Error<ComposeErrorType>;
pub type ComposeResult = Result<Vec<String>, ComposeError>;

pub fn compose(grammar: &Grammar, max_tokens: usize, file: &Path) -> ComposeResult {
    compose_with_rng(grammar, max_tokens, file, &mut thread_rng())
}

// Once the tokens form a sentence, stopping is one more choice alongside the
// candidates
pub fn compose_with_rng(grammar: &Grammar, max_tokens: usize, file: &Path, rng: &mut impl Rng) -> ComposeResult {
    let mut tokens = Vec::new();

    loop {
        let completion = complete(&tokens, grammar);
        if completion.is_dead_end() {
            return Err(ComposeError::new(Location::file(file), ComposeErrorType::DeadEnd(tokens)));
        }

        let candidates = completion.sorted();
        let choices = candidates.len() + usize::from(completion.is_complete);
        let pick = rng.gen_range(0..choices);
        let Some(&token) = candidates.get(pick) else {
            return Ok(tokens);
        };

        if tokens.len() == max_tokens {
            return Err(ComposeError::new(Location::file(file), ComposeErrorType::TokenLimit(max_tokens)));
        }

        debug_debug!("composer", "picked `{}` out of {} choices", token, choices);
        tokens.push(token.to_string());
    }
}

// Joins tokens for plain display
pub fn render(tokens: &[String]) -> String {
    tokens.iter().join(" ")
}
