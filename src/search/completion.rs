use std::collections::HashSet;

use itertools::Itertools;

use super::{search_ordered, Candidate, Pending, SearchOrder};
use crate::debug_info;
use crate::grammar::Grammar;

// The next tokens for a prefix, and whether the prefix is already a full sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub candidates: HashSet<String>,
    pub is_complete: bool,
}

impl Completion {
    // Candidates in a stable order for presenting
    pub fn sorted(&self) -> Vec<&str> {
        self.candidates.iter().map(String::as_str).sorted().collect()
    }

    // Nothing may follow and the prefix is not a sentence
    pub fn is_dead_end(&self) -> bool {
        self.candidates.is_empty() && !self.is_complete
    }
}

pub fn complete(prefix: &[String], grammar: &Grammar) -> Completion {
    complete_with(prefix, grammar, SearchOrder::default())
}

// The sentinel sits beneath the start symbol, so it only surfaces once the
// whole start expansion has been matched against the prefix.
pub fn complete_with(prefix: &[String], grammar: &Grammar, order: SearchOrder) -> Completion {
    let seed = vec![Pending::Symbol(grammar.start()), Pending::Sentinel];

    let mut candidates = HashSet::new();
    let mut is_complete = false;
    for candidate in search_ordered(grammar, prefix, seed, order) {
        match candidate {
            Candidate::Token(text) => {
                candidates.insert(text);
            }
            Candidate::EndOfSentence => is_complete = true,
        }
    }

    debug_info!("search.completion", "{} tokens entered: {} candidates, complete: {}", prefix.len(), candidates.len(), is_complete);

    Completion { candidates, is_complete }
}

pub fn is_complete(prefix: &[String], grammar: &Grammar) -> bool {
    complete(prefix, grammar).is_complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::{directions, nt, t};
    use crate::grammar::Production;
    use crate::search::continuations_after;
    use crate::search::tests::{set, tokens};

    #[test]
    fn detect_complete_sentence() {
        let grammar = directions();

        assert!(is_complete(&tokens(&["go", "north"]), &grammar));
        assert!(!is_complete(&tokens(&["go"]), &grammar));
        assert!(!is_complete(&[], &grammar));
        assert!(!is_complete(&tokens(&["go", "north", "north"]), &grammar));
    }

    #[test]
    fn candidates_match_plain_search() {
        let grammar = directions();

        for prefix in [tokens(&[]), tokens(&["go"]), tokens(&["go", "south"]), tokens(&["stop"])] {
            assert_eq!(complete(&prefix, &grammar).candidates, continuations_after(&prefix, &grammar));
        }
    }

    #[test]
    fn complete_but_extensible() {
        // START -> "done" OPT ; OPT -> "." | ε
        let grammar = Grammar::new("START", vec![
            Production::new("START", vec![t("done"), nt("OPT")]),
            Production::new("OPT", vec![t(".")]),
            Production::new("OPT", vec![]),
        ]);
        let completion = complete(&tokens(&["done"]), &grammar);

        assert!(completion.is_complete);
        assert_eq!(completion.candidates, set(&["."]));
        assert!(!completion.is_dead_end());
    }

    #[test]
    fn sentinel_never_collides_with_terminal_text() {
        let grammar = Grammar::new("S", vec![
            Production::new("S", vec![t("$")]),
        ]);

        let empty = complete(&[], &grammar);
        assert_eq!(empty.candidates, set(&["$"]));
        assert!(!empty.is_complete);

        let full = complete(&tokens(&["$"]), &grammar);
        assert!(full.candidates.is_empty());
        assert!(full.is_complete);
    }

    #[test]
    fn empty_language_accepts_empty_prefix() {
        let grammar = Grammar::new("S", vec![Production::new("S", vec![])]);

        assert!(is_complete(&[], &grammar));
        assert!(complete(&[], &grammar).candidates.is_empty());
    }

    #[test]
    fn dead_end() {
        let completion = complete(&tokens(&["go", "up"]), &directions());

        assert!(completion.is_dead_end());
        assert!(completion.sorted().is_empty());
    }

    #[test]
    fn orders_agree() {
        let grammar = directions();
        let prefix = tokens(&["go"]);

        assert_eq!(
            complete_with(&prefix, &grammar, SearchOrder::Lifo),
            complete_with(&prefix, &grammar, SearchOrder::Fifo)
        );
        assert_eq!(complete(&prefix, &grammar).sorted(), vec!["north", "south"]);
    }
}
