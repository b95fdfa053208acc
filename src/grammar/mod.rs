/*
    This module is for storing and querying grammars
*/

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSymbol", into = "RawSymbol")]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(text) | Symbol::Nonterminal(text) => text,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

// The JSON shape grammars are exchanged in
#[derive(Serialize, Deserialize)]
struct RawSymbol {
    text: String,
    #[serde(rename = "isTerminal")]
    is_terminal: bool,
}

impl From<RawSymbol> for Symbol {
    fn from(raw: RawSymbol) -> Self {
        if raw.is_terminal {
            Symbol::Terminal(raw.text)
        } else {
            Symbol::Nonterminal(raw.text)
        }
    }
}

impl From<Symbol> for RawSymbol {
    fn from(symbol: Symbol) -> Self {
        let is_terminal = symbol.is_terminal();
        let text = match symbol {
            Symbol::Terminal(text) | Symbol::Nonterminal(text) => text,
        };
        RawSymbol { text, is_terminal }
    }
}

// The symbols in a single alternative. Empty means epsilon.
pub type Alternative = Vec<Symbol>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub lhs: String,
    pub rhs: Alternative,
}

impl Production {
    pub fn new(lhs: impl Into<String>, rhs: Alternative) -> Self {
        Production { lhs: lhs.into(), rhs }
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct RawGrammar {
    start: String,
    productions: Vec<Production>,
}

// A context-free grammar: a start nonterminal plus its productions in
// declaration order.
// Nothing is validated. A nonterminal without productions is legal and
// simply has no expansions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGrammar", into = "RawGrammar")]
pub struct Grammar {
    start: Symbol,
    productions: Vec<Production>,
    // Indices into `productions` per left-hand name, in declaration order
    index: HashMap<String, Vec<usize>>,
}

impl Grammar {
    pub fn new(start: impl Into<String>, productions: Vec<Production>) -> Self {
        let mut index = HashMap::<String, Vec<usize>>::new();
        for (i, production) in productions.iter().enumerate() {
            index.entry(production.lhs.clone()).or_default().push(i);
        }

        Grammar {
            start: Symbol::Nonterminal(start.into()),
            productions,
            index,
        }
    }

    // The same productions rooted at a different nonterminal.
    pub fn with_start(&self, start: impl Into<String>) -> Self {
        Grammar::new(start, self.productions.clone())
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn start_name(&self) -> &str {
        self.start.text()
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    // All productions whose left-hand side is `nonterminal`, in declaration order.
    pub fn productions_for<'g>(&'g self, nonterminal: &str) -> impl Iterator<Item = &'g Production> + 'g {
        self.index
            .get(nonterminal)
            .into_iter()
            .flatten()
            .map(move |&i| &self.productions[i])
    }

    // Every terminal text that appears on some right-hand side
    pub fn terminals(&self) -> HashSet<&str> {
        self.productions
            .iter()
            .flat_map(|production| production.rhs.iter())
            .filter(|symbol| symbol.is_terminal())
            .map(Symbol::text)
            .collect()
    }

    pub fn nonterminals(&self) -> HashSet<&str> {
        self.index.keys().map(String::as_str).collect()
    }
}

impl From<RawGrammar> for Grammar {
    fn from(raw: RawGrammar) -> Self {
        Grammar::new(raw.start, raw.productions)
    }
}

impl From<Grammar> for RawGrammar {
    fn from(grammar: Grammar) -> Self {
        RawGrammar {
            start: grammar.start_name().to_string(),
            productions: grammar.productions,
        }
    }
}
