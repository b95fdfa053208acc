use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::search::SearchOrder;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Grammar format (default: from the file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Worklist discipline for `next` and `check`
    #[arg(long, value_enum, default_value_t = Order::Lifo)]
    pub order: Order,

    /// Print diagnostics (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the tokens that may follow the given ones
    Next {
        /// Tokens chosen so far
        tokens: Vec<String>,
    },

    /// Exit successfully only if the tokens form a complete sentence
    Check {
        tokens: Vec<String>,
    },

    /// List every terminal in the grammar
    Terminals,

    /// Compose random sentences by repeatedly picking a valid next token
    Compose {
        /// Amount to compose
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        amount: u32,

        /// Give up on a sentence after this many tokens
        #[arg(long, value_name = "TOKENS", default_value_t = 100)]
        max_tokens: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Format {
    Bnf,
    Json,
}

impl Format {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Bnf,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Order {
    Lifo,
    Fifo,
}

impl From<Order> for SearchOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Lifo => SearchOrder::Lifo,
            Order::Fifo => SearchOrder::Fifo,
        }
    }
}
