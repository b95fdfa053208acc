/*
    This module finds the terminals that may legally follow a prefix

    The search simulates a nondeterministic pushdown automaton over an explicit
    worklist of derivation configurations. Each configuration holds the pending
    right frontier of one leftmost derivation and how much of the prefix it has
    matched so far.
*/

pub mod completion;
#[cfg(test)]
mod properties;

use std::collections::{HashSet, VecDeque};

use crate::grammar::{Grammar, Symbol};
use crate::debug_debug;
use crate::debug_trace;

// Something the search can hold configurations in.
// The removal discipline only changes the order in which candidates are
// discovered, never the set that comes back.
pub trait Worklist<T> {
    fn put(&mut self, item: T);
    fn take(&mut self) -> Option<T>;
}

// Stack discipline
impl<T> Worklist<T> for Vec<T> {
    fn put(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop()
    }
}

// Queue discipline
impl<T> Worklist<T> for VecDeque<T> {
    fn put(&mut self, item: T) {
        self.push_back(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Lifo,
    Fifo,
}

// One entry of a pending stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pending<'g> {
    Symbol(&'g Symbol),
    // Reached only once everything above it has been derived and matched
    Sentinel,
}

// What the search can report as the next thing in a sentence
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    Token(String),
    EndOfSentence,
}

// A snapshot of one in-progress derivation
#[derive(Debug, Clone)]
pub struct Configuration<'g> {
    // Top of the stack is the last element
    pending: Vec<Pending<'g>>,
    // How many prefix tokens have been matched
    consumed: usize,
}

// Runs the search from `seed` (given top-first) until the worklist drains.
// There is no cycle guard: a grammar where a nonterminal can reach itself
// without consuming input will not terminate.
pub fn search<'g, W>(grammar: &'g Grammar, prefix: &[String], seed: Vec<Pending<'g>>, mut worklist: W) -> HashSet<Candidate>
where
    W: Worklist<Configuration<'g>>,
{
    let mut found = HashSet::new();
    let mut explored = 0usize;

    worklist.put(Configuration {
        pending: seed.into_iter().rev().collect(),
        consumed: 0,
    });

    while let Some(mut config) = worklist.take() {
        explored += 1;

        // An empty stack has nothing left to propose
        let Some(top) = config.pending.pop() else {
            continue;
        };

        match top {
            Pending::Sentinel => {
                if config.consumed == prefix.len() {
                    found.insert(Candidate::EndOfSentence);
                }
            }
            Pending::Symbol(Symbol::Terminal(text)) => match prefix.get(config.consumed) {
                None => {
                    found.insert(Candidate::Token(text.clone()));
                }
                Some(next) if next == text => {
                    config.consumed += 1;
                    worklist.put(config);
                }
                Some(_) => {}
            },
            Pending::Symbol(Symbol::Nonterminal(name)) => {
                for production in grammar.productions_for(name) {
                    debug_trace!("search", "expand {} -> {:?} at token {}", name, production.rhs, config.consumed);

                    let mut pending = config.pending.clone();
                    pending.extend(production.rhs.iter().rev().map(Pending::Symbol));
                    worklist.put(Configuration {
                        pending,
                        consumed: config.consumed,
                    });
                }
            }
        }
    }

    debug_debug!("search", "explored {} configurations, found {} candidates", explored, found.len());

    found
}

// Runs the search with the worklist `order` asks for
pub fn search_ordered<'g>(grammar: &'g Grammar, prefix: &[String], seed: Vec<Pending<'g>>, order: SearchOrder) -> HashSet<Candidate> {
    match order {
        SearchOrder::Lifo => search(grammar, prefix, seed, Vec::new()),
        SearchOrder::Fifo => search(grammar, prefix, seed, VecDeque::new()),
    }
}

// The set of terminals that can come directly after `prefix`.
// A prefix no sentence starts with gives the empty set.
pub fn continuations_after(prefix: &[String], grammar: &Grammar) -> HashSet<String> {
    continuations_after_with(prefix, grammar, SearchOrder::default())
}

pub fn continuations_after_with(prefix: &[String], grammar: &Grammar, order: SearchOrder) -> HashSet<String> {
    search_ordered(grammar, prefix, vec![Pending::Symbol(grammar.start())], order)
        .into_iter()
        .filter_map(|candidate| match candidate {
            Candidate::Token(text) => Some(text),
            Candidate::EndOfSentence => None,
        })
        .collect()
}
