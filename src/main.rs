use std::process::ExitCode;

use clap::Parser;

use scaffold::cli::{Cli, Command, Format};
use scaffold::composer::{compose, render};
use scaffold::debug::{set_debug_level, DebugLevel};
use scaffold::error_handling::report;
use scaffold::grammar::Grammar;
use scaffold::parser::{self, json, FileResult};
use scaffold::search::completion::complete_with;
use scaffold::search::SearchOrder;

fn load(cli: &Cli) -> FileResult<Grammar> {
    let grammar = match cli.format.unwrap_or_else(|| Format::of(&cli.file)) {
        Format::Bnf => parser::parse_file(&cli.file)?,
        Format::Json => json::parse_json_file(&cli.file)?,
    };

    Ok(match &cli.start {
        Some(start) => grammar.with_start(start.as_str()),
        None => grammar,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_debug_level(DebugLevel::from_verbosity(cli.verbose));

    let grammar = match load(&cli) {
        Ok(grammar) => grammar,
        Err(errors) => {
            report(&errors);
            return ExitCode::FAILURE;
        }
    };
    let order = SearchOrder::from(cli.order);

    match &cli.command {
        Command::Next { tokens } => {
            let completion = complete_with(tokens, &grammar, order);
            for candidate in completion.sorted() {
                println!("{}", candidate);
            }
            if completion.is_complete {
                println!("(complete)");
            }
            ExitCode::SUCCESS
        }
        Command::Check { tokens } => {
            if complete_with(tokens, &grammar, order).is_complete {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Terminals => {
            let mut terminals: Vec<_> = grammar.terminals().into_iter().collect();
            terminals.sort_unstable();
            for terminal in terminals {
                println!("{}", terminal);
            }
            ExitCode::SUCCESS
        }
        Command::Compose { amount, max_tokens } => {
            for _ in 0..*amount {
                match compose(&grammar, *max_tokens, &cli.file) {
                    Ok(tokens) => println!("{}", render(&tokens)),
                    Err(error) => {
                        report(&[error]);
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
    }
}
