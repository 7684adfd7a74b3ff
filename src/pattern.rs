// Copyright (c) 2018 Fabian Schuiki

//! Scanning of raw rule sides into symbol patterns.
//!
//! Rules store their sides as raw concatenations of symbol names. Before a
//! rule can be analyzed, each side is scanned into a sequence of tokens, one
//! per symbol occurrence, by matching prefixes of the text against the
//! grammar's alphabets. This is the only place where raw rule text is
//! dereferenced against symbol names; everything downstream operates on
//! tokens.

use grammar::{Grammar, EMPTY_WORD};
use {Error, Result, Side};

/// A single symbol occurrence within a rule side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An occurrence of a terminal.
    Terminal(String),
    /// An occurrence of a nonterminal.
    Nonterminal(String),
    /// The empty-word marker. Only ever appears on its own.
    Empty,
}

impl Token {
    /// The symbol name of this token, if it has one.
    pub fn name(&self) -> Option<&str> {
        match *self {
            Token::Terminal(ref name) | Token::Nonterminal(ref name) => Some(name),
            Token::Empty => None,
        }
    }

    /// Check whether this token is a nonterminal occurrence.
    pub fn is_nonterminal(&self) -> bool {
        match *self {
            Token::Nonterminal(_) => true,
            _ => false,
        }
    }
}

/// The tokenized form of one rule side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    /// Scan one side of a rule into a pattern.
    ///
    /// A side that consists of exactly the empty-word marker scans to the
    /// single [`Empty`](Token::Empty) token. Any other side is consumed left
    /// to right, at each step matching the longest terminal or nonterminal
    /// name that prefixes the remaining text. Symbol names may span several
    /// characters; the longest match wins, and alphabet insertion order
    /// never influences the result. Text that matches no name fails with
    /// [`UnknownSymbol`](Error::UnknownSymbol).
    pub fn scan(grammar: &Grammar, rule: usize, side: Side) -> Result<Pattern> {
        let text = match side {
            Side::Lhs => grammar.rule(rule).lhs(),
            Side::Rhs => grammar.rule(rule).rhs(),
        };
        if text == EMPTY_WORD {
            return Ok(Pattern {
                tokens: vec![Token::Empty],
            });
        }
        let mut tokens = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            match longest_match(grammar, rest) {
                Some((token, len)) => {
                    tokens.push(token);
                    rest = &rest[len..];
                }
                None => {
                    return Err(Error::UnknownSymbol {
                        rule: rule,
                        side: side,
                        text: rest.to_string(),
                    })
                }
            }
        }
        Ok(Pattern { tokens: tokens })
    }

    /// The tokens of this pattern.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The number of symbol occurrences. The empty-word marker counts as
    /// zero symbols.
    pub fn symbols(&self) -> usize {
        if self.is_empty_word() {
            0
        } else {
            self.tokens.len()
        }
    }

    /// The number of nonterminal occurrences.
    pub fn nonterminals(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_nonterminal()).count()
    }

    /// Check whether this pattern is the empty-word marker.
    pub fn is_empty_word(&self) -> bool {
        self.tokens.first() == Some(&Token::Empty)
    }

    /// Check whether any token of this pattern carries the given name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.tokens.iter().any(|t| t.name() == Some(name))
    }

    /// Count the occurrences of a name within this pattern.
    pub fn count_name(&self, name: &str) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.name() == Some(name))
            .count()
    }
}

/// Find the longest alphabet member prefixing the given text.
fn longest_match(grammar: &Grammar, text: &str) -> Option<(Token, usize)> {
    let mut best: Option<&str> = None;
    let mut best_nonterm = false;
    for name in grammar.nonterminals() {
        let better = best.map(|b| name.len() > b.len()).unwrap_or(true);
        if better && text.starts_with(name.as_str()) {
            best = Some(name.as_str());
            best_nonterm = true;
        }
    }
    for name in grammar.terminals() {
        let better = best.map(|b| name.len() > b.len()).unwrap_or(true);
        if better && text.starts_with(name.as_str()) {
            best = Some(name.as_str());
            best_nonterm = false;
        }
    }
    best.map(|name| {
        let token = if best_nonterm {
            Token::Nonterminal(name.to_string())
        } else {
            Token::Terminal(name.to_string())
        };
        (token, name.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Token::*;

    fn sample(nonterms: &[&str], terms: &[&str], rhs: &str) -> (Grammar, usize) {
        let mut g = Grammar::new();
        for name in nonterms {
            g.add_nonterminal(*name);
        }
        for name in terms {
            g.add_terminal(*name);
        }
        g.add_rule(nonterms[0], rhs);
        let rule = g.num_rules() - 1;
        (g, rule)
    }

    fn scan_rhs(nonterms: &[&str], terms: &[&str], rhs: &str) -> Result<Pattern> {
        let (g, rule) = sample(nonterms, terms, rhs);
        Pattern::scan(&g, rule, Side::Rhs)
    }

    #[test]
    fn single_characters() {
        let pattern = scan_rhs(&["S", "A"], &["a", "b"], "aAb").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                Terminal("a".into()),
                Nonterminal("A".into()),
                Terminal("b".into()),
            ]
        );
        assert_eq!(pattern.symbols(), 3);
        assert_eq!(pattern.nonterminals(), 1);
    }

    #[test]
    fn longest_name_wins() {
        // Both `A` and `AB` are known; the scan must pick `AB` over `A`
        // regardless of which was added first.
        let pattern = scan_rhs(&["A", "AB"], &["b"], "ABb").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[Nonterminal("AB".into()), Terminal("b".into())]
        );
    }

    #[test]
    fn multi_character_terminal() {
        let pattern = scan_rhs(&["S"], &["if", "i"], "ifi").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[Terminal("if".into()), Terminal("i".into())]
        );
    }

    #[test]
    fn empty_word_marker() {
        let pattern = scan_rhs(&["S"], &["a"], "|").unwrap();
        assert_eq!(pattern.tokens(), &[Empty]);
        assert!(pattern.is_empty_word());
        assert_eq!(pattern.symbols(), 0);
    }

    #[test]
    fn unknown_symbol() {
        assert_eq!(
            scan_rhs(&["S"], &["a"], "axb"),
            Err(Error::UnknownSymbol {
                rule: 0,
                side: Side::Rhs,
                text: "xb".into(),
            })
        );
    }

    #[test]
    fn name_queries() {
        let pattern = scan_rhs(&["S", "A"], &["a"], "aAaA").unwrap();
        assert!(pattern.contains_name("A"));
        assert!(!pattern.contains_name("S"));
        assert_eq!(pattern.count_name("a"), 2);
    }
}
