/*
    Property checks for the search over small random acyclic grammars

    Nonterminal `N{i}` may only mention `N{j}` with j > i, so every language is
    finite and can be enumerated outright to compare against.
*/

use std::collections::HashSet;

use proptest::prelude::*;

use super::completion::{complete, complete_with};
use super::{continuations_after, continuations_after_with, SearchOrder};
use crate::grammar::{Grammar, Production, Symbol};

const ALPHABET: [&str; 3] = ["a", "b", "c"];

fn name(i: usize) -> String {
    format!("N{}", i)
}

// Raw picks: (wants a nonterminal, which one)
type RawRhs = Vec<(bool, usize)>;

fn build_grammar(raw: Vec<Vec<RawRhs>>) -> Grammar {
    let count = raw.len();
    let mut productions = Vec::new();

    for (i, alternatives) in raw.into_iter().enumerate() {
        for rhs in alternatives {
            let symbols = rhs
                .into_iter()
                .map(|(wants_nonterminal, pick)| {
                    let higher = count - i - 1;
                    if wants_nonterminal && higher > 0 {
                        Symbol::Nonterminal(name(i + 1 + pick % higher))
                    } else {
                        Symbol::Terminal(ALPHABET[pick % ALPHABET.len()].to_string())
                    }
                })
                .collect();
            productions.push(Production::new(name(i), symbols));
        }
    }

    Grammar::new(name(0), productions)
}

fn arb_grammar() -> impl Strategy<Value = Grammar> {
    let rhs = prop::collection::vec((any::<bool>(), 0usize..8), 0..=3);
    let alternatives = prop::collection::vec(rhs, 1..=2);
    prop::collection::vec(alternatives, 1..=3).prop_map(build_grammar)
}

fn arb_prefix() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 0..=4)
        .prop_map(|words| words.into_iter().map(str::to_string).collect())
}

// Every sentence derivable from `symbol`
fn language(grammar: &Grammar, symbol: &Symbol) -> HashSet<Vec<String>> {
    match symbol {
        Symbol::Terminal(text) => HashSet::from([vec![text.clone()]]),
        Symbol::Nonterminal(nonterminal) => grammar
            .productions_for(nonterminal)
            .flat_map(|production| {
                production.rhs.iter().fold(HashSet::from([Vec::new()]), |sentences, symbol| {
                    let tails = language(grammar, symbol);
                    sentences
                        .iter()
                        .flat_map(|head| {
                            tails.iter().map(move |tail| {
                                let mut sentence = head.clone();
                                sentence.extend(tail.iter().cloned());
                                sentence
                            })
                        })
                        .collect()
                })
            })
            .collect(),
    }
}

fn expected_continuations(sentences: &HashSet<Vec<String>>, prefix: &[String]) -> HashSet<String> {
    sentences
        .iter()
        .filter(|sentence| sentence.len() > prefix.len() && sentence.starts_with(prefix))
        .map(|sentence| sentence[prefix.len()].clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_order_does_not_change_result(grammar in arb_grammar(), prefix in arb_prefix()) {
        prop_assert_eq!(
            continuations_after_with(&prefix, &grammar, SearchOrder::Lifo),
            continuations_after_with(&prefix, &grammar, SearchOrder::Fifo)
        );
        prop_assert_eq!(
            complete_with(&prefix, &grammar, SearchOrder::Lifo),
            complete_with(&prefix, &grammar, SearchOrder::Fifo)
        );
    }

    #[test]
    fn prop_matches_enumerated_language(grammar in arb_grammar(), prefix in arb_prefix()) {
        let sentences = language(&grammar, grammar.start());
        let completion = complete(&prefix, &grammar);

        prop_assert_eq!(&completion.candidates, &expected_continuations(&sentences, &prefix));
        prop_assert_eq!(completion.is_complete, sentences.contains(&prefix));
    }

    #[test]
    fn prop_first_tokens(grammar in arb_grammar()) {
        let sentences = language(&grammar, grammar.start());
        let first: HashSet<String> = sentences.iter().filter_map(|s| s.first().cloned()).collect();

        prop_assert_eq!(continuations_after(&[], &grammar), first);
    }

    #[test]
    fn prop_following_a_candidate_stays_on_a_path(grammar in arb_grammar(), prefix in arb_prefix()) {
        for token in continuations_after(&prefix, &grammar) {
            let mut extended = prefix.clone();
            extended.push(token);

            // The extended prefix starts some sentence, so it either continues or ends
            let next = complete(&extended, &grammar);
            prop_assert!(!next.is_dead_end());
        }
    }
}
