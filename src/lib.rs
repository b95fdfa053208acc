/*
    Guided, grammar-constrained sentence composition

    Given a context-free grammar and the tokens chosen so far, `search` tells
    which tokens may come next and whether the tokens already form a sentence.
*/

pub mod debug;
pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod search;
pub mod composer;
pub mod cli;
