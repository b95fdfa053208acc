use std::iter::Peekable;
use std::str::Chars;

use itertools::Itertools;

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    // `=` or `->`
    Arrow,
    Bar,
    // A bare nonterminal name
    Word(String),
    // A terminal, without its quotes
    Quoted(String)
}

type Cursor<'a> = Peekable<Chars<'a>>;

fn at_arrow(line: &Cursor) -> bool {
    let mut ahead = line.clone();
    ahead.next() == Some('-') && ahead.next() == Some('>')
}

// Characters that end a bare word without being part of it
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '=' | '|' | '"')
}

pub fn lex_quoted(line: &mut Cursor) -> Result<Token> {
    line.next(); // Opening quote
    let text = line.peeking_take_while(|&c| c != '"').collect();

    match line.next() {
        Some('"') => Ok(Token::Quoted(text)),
        _ => Err(CompileErrorType::UnclosedQuote),
    }
}

// Reads a name up to the next delimiter or `->`, leaving that in place
pub fn lex_word(line: &mut Cursor) -> Token {
    let mut name = String::new();
    loop {
        name.extend(line.peeking_take_while(|&c| !is_delimiter(c) && c != '-'));
        if line.peek() != Some(&'-') || at_arrow(line) {
            return Token::Word(name);
        }
        name.extend(line.next());
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut cursor = line.chars().peekable();
    let mut tokens = Vec::new();

    while let Some(&c) = cursor.peek() {
        let token = match c {
            _ if c.is_whitespace() => {
                cursor.next();
                continue;
            }
            '=' => {
                cursor.next();
                Token::Arrow
            }
            '-' if at_arrow(&cursor) => {
                cursor.nth(1);
                Token::Arrow
            }
            '|' => {
                cursor.next();
                Token::Bar
            }
            '"' => lex_quoted(&mut cursor)?,
            _ => lex_word(&mut cursor),
        };
        tokens.push(token);
    }

    Ok(tokens)
}
