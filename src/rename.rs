// Copyright (c) 2018 Fabian Schuiki

//! Collision-free merging of grammar alphabets.
//!
//! The closure constructions combine the alphabets and rule sets of two
//! grammars. Names that would collide are disambiguated by suffixing
//! apostrophes, and every rule of the renamed grammar is rewritten through
//! the resulting map. Rewriting operates on tokenized rules and re-joins the
//! mapped names; raw character positions are never spliced.

use indexmap::{IndexMap, IndexSet};

use grammar::{Grammar, EMPTY_WORD};
use pattern::{Pattern, Token};
use {Result, Side};

/// Merge a grammar's nonterminals into an accumulator, renaming collisions.
///
/// Every nonterminal of `incoming` is checked against `reserved` and the
/// accumulator's current alphabets; a colliding name grows an apostrophe
/// until it is unique. The resolved names are added to the accumulator's
/// nonterminal alphabet, and a copy of `incoming` with every rule side and
/// the start symbol rewritten accordingly is returned, ready to have its
/// rules copied over. Callers seed `reserved` with the other operand's
/// terminal set, so a nonterminal colliding with a foreign terminal is
/// renamed as well.
pub fn merge_alphabet(
    accum: &mut Grammar,
    incoming: Grammar,
    reserved: &IndexSet<String>,
) -> Result<Grammar> {
    // Tokenize the incoming rules against the alphabets they were written
    // for, before any renaming can skew the lookup.
    let mut sides = Vec::with_capacity(incoming.num_rules());
    for index in 0..incoming.num_rules() {
        let lhs = Pattern::scan(&incoming, index, Side::Lhs)?;
        let rhs = Pattern::scan(&incoming, index, Side::Rhs)?;
        sides.push((lhs, rhs));
    }

    let mut renames: IndexMap<String, String> = IndexMap::new();
    for name in incoming.nonterminals() {
        let mut resolved = name.clone();
        while reserved.contains(&resolved) || accum.is_nonterminal(&resolved)
            || accum.is_terminal(&resolved)
        {
            resolved.push('\'');
        }
        if resolved != *name {
            debug!("renaming nonterminal `{}` to `{}`", name, resolved);
        }
        accum.add_nonterminal(resolved.clone());
        renames.insert(name.clone(), resolved);
    }

    let mut renamed = Grammar::new();
    for name in renames.values() {
        renamed.add_nonterminal(name.clone());
    }
    for name in incoming.terminals() {
        renamed.add_terminal(name.clone());
    }
    if let Some(start) = incoming.start() {
        if let Some(resolved) = renames.get(start) {
            renamed.set_start(resolved.clone());
        }
    }
    for &(ref lhs, ref rhs) in &sides {
        renamed.add_rule(rejoin(lhs, &renames), rejoin(rhs, &renames));
    }
    Ok(renamed)
}

/// Merge a grammar's terminals into an accumulator.
///
/// Terminals are never renamed; duplicates collapse and first-seen order is
/// kept.
pub fn merge_terminals(accum: &mut Grammar, grammar: &Grammar) {
    for name in grammar.terminals() {
        accum.add_terminal(name.clone());
    }
}

/// Mint a fresh nonterminal for an accumulator.
///
/// Proposes `name` and appends apostrophes until the result is absent from
/// the accumulator's nonterminal alphabet, then registers and returns it.
pub fn allocate_symbol(accum: &mut Grammar, name: &str) -> String {
    let mut resolved = name.to_string();
    while accum.is_nonterminal(&resolved) {
        resolved.push('\'');
    }
    trace!("allocated fresh nonterminal `{}`", resolved);
    accum.add_nonterminal(resolved.clone());
    resolved
}

/// Re-join a tokenized rule side, mapping nonterminal names.
fn rejoin(pattern: &Pattern, renames: &IndexMap<String, String>) -> String {
    let mut out = String::new();
    for token in pattern.tokens() {
        match *token {
            Token::Nonterminal(ref name) => {
                out.push_str(renames.get(name).map(|s| s.as_str()).unwrap_or(name))
            }
            Token::Terminal(ref name) => out.push_str(name),
            Token::Empty => out.push_str(EMPTY_WORD),
        }
    }
    out
}
