// Copyright (c) 2018 Fabian Schuiki

//! Data structures representing a grammar.

use std;
use std::fmt;

use indexmap;
use indexmap::IndexSet;

/// The reserved literal denoting the empty word.
///
/// A rule whose right-hand side is exactly this marker derives the empty
/// string. The marker belongs to neither alphabet and is distinct from an
/// empty rule side.
pub const EMPTY_WORD: &'static str = "|";

/// A grammar.
///
/// Holds the two symbol alphabets, the start symbol, and the list of
/// production rules. Alphabets and rules preserve insertion order for
/// reproducible display; the order carries no meaning for classification.
/// A name may appear in at most one of the two alphabets.
#[derive(Debug, Clone)]
pub struct Grammar {
    nonterms: IndexSet<String>,
    terms: IndexSet<String>,
    start: Option<String>,
    rules: Vec<Rule>,
}

/// A single production rule within a grammar.
///
/// Both sides are raw concatenations of symbol names without separators.
/// Which substrings form symbols is only decided when a side is scanned
/// against a grammar's alphabets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    lhs: String,
    rhs: String,
}

/// An iterator over the rules of a grammar.
pub type RulesIter<'a> = std::slice::Iter<'a, Rule>;

/// An iterator over the symbol names of one alphabet.
pub type NamesIter<'a> = indexmap::set::Iter<'a, String>;

impl Grammar {
    /// Create a new empty grammar.
    pub fn new() -> Grammar {
        Grammar {
            nonterms: IndexSet::new(),
            terms: IndexSet::new(),
            start: None,
            rules: Vec::new(),
        }
    }

    /// Add a nonterminal.
    pub fn add_nonterminal<S: Into<String>>(&mut self, name: S) {
        self.nonterms.insert(name.into());
    }

    /// Add a terminal.
    pub fn add_terminal<S: Into<String>>(&mut self, name: S) {
        self.terms.insert(name.into());
    }

    /// Set the start symbol.
    ///
    /// The name is added to the nonterminal alphabet if it is not already
    /// present.
    pub fn set_start<S: Into<String>>(&mut self, name: S) {
        let name = name.into();
        self.nonterms.insert(name.clone());
        self.start = Some(name);
    }

    /// The start symbol, if one has been set.
    pub fn start(&self) -> Option<&str> {
        self.start.as_ref().map(|s| s.as_str())
    }

    /// Add a rule to the grammar.
    pub fn add_rule<L, R>(&mut self, lhs: L, rhs: R)
    where
        L: Into<String>,
        R: Into<String>,
    {
        self.rules.push(Rule::new(lhs, rhs));
    }

    /// The rules in this grammar.
    pub fn rules(&self) -> RulesIter {
        self.rules.iter()
    }

    /// Access a single rule by index.
    pub fn rule(&self, index: usize) -> &Rule {
        &self.rules[index]
    }

    /// The number of rules.
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// The nonterminal alphabet, in insertion order.
    pub fn nonterminals(&self) -> NamesIter {
        self.nonterms.iter()
    }

    /// The terminal alphabet, in insertion order.
    pub fn terminals(&self) -> NamesIter {
        self.terms.iter()
    }

    /// The number of nonterminals.
    pub fn num_nonterminals(&self) -> usize {
        self.nonterms.len()
    }

    /// The number of terminals.
    pub fn num_terminals(&self) -> usize {
        self.terms.len()
    }

    /// Check whether a name is a nonterminal of this grammar.
    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterms.contains(name)
    }

    /// Check whether a name is a terminal of this grammar.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.terms.contains(name)
    }

    /// The position of a nonterminal within its alphabet.
    pub fn nonterminal_index(&self, name: &str) -> Option<usize> {
        self.nonterms.get_full(name).map(|(index, _)| index)
    }

    /// The position of a terminal within its alphabet.
    pub fn terminal_index(&self, name: &str) -> Option<usize> {
        self.terms.get_full(name).map(|(index, _)| index)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "nonterminals:")?;
        for name in &self.nonterms {
            write!(f, " \"{}\"", name)?;
        }
        write!(f, "\nterminals:")?;
        for name in &self.terms {
            write!(f, " \"{}\"", name)?;
        }
        if let Some(ref start) = self.start {
            write!(f, "\nstart: {}", start)?;
        }
        write!(f, "\nrules:")?;
        for rule in &self.rules {
            write!(f, "\n    {}", rule)?;
        }
        Ok(())
    }
}

impl Rule {
    /// Create a new rule.
    pub fn new<L, R>(lhs: L, rhs: R) -> Rule
    where
        L: Into<String>,
        R: Into<String>,
    {
        Rule {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// The left-hand side of this rule.
    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    /// The right-hand side of this rule.
    pub fn rhs(&self) -> &str {
        &self.rhs
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}
