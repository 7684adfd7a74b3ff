// Copyright (c) 2018 Fabian Schuiki

//! A grammar classifier for the Chomsky hierarchy.
//!
//! This crate determines which class of the Chomsky hierarchy a formal
//! grammar belongs to (type 0 unrestricted, type 1 context-sensitive, type 2
//! context-free, type 3 regular), and constructs new grammars closed under
//! union, product, and Kleene closure. The constructions dispatch on the
//! operands' classes such that the result stays in the lowest possible
//! class.

#![deny(missing_docs)]

extern crate bit_set;
extern crate indexmap;
#[macro_use]
extern crate log;

pub mod grammar;
pub mod pattern;
pub mod classify;
pub mod rename;
pub mod closure;

use std::error;
use std::fmt;

/// One of the two sides of a production rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left-hand side.
    Lhs,
    /// The right-hand side.
    Rhs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Side::Lhs => write!(f, "left-hand side"),
            Side::Rhs => write!(f, "right-hand side"),
        }
    }
}

/// The ways in which grammar analysis can fail.
///
/// Anything else a grammar does, including legitimately classifying as
/// type 0, is a normal outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule side contains text that matches no symbol of the grammar.
    UnknownSymbol {
        /// The index of the offending rule.
        rule: usize,
        /// The side of the rule the text appeared on.
        side: Side,
        /// The unmatched remainder of that side.
        text: String,
    },
    /// A grammar has production rules but no start symbol among its
    /// nonterminals.
    DegenerateGrammar,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnknownSymbol {
                rule,
                side,
                ref text,
            } => write!(
                f,
                "unknown symbol at `{}` on the {} of rule {}",
                text, side, rule
            ),
            Error::DegenerateGrammar => {
                write!(f, "grammar has production rules but no start symbol")
            }
        }
    }
}

impl error::Error for Error {}

/// The result type used throughout this crate.
pub type Result<T> = ::std::result::Result<T, Error>;
