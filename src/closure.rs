// Copyright (c) 2018 Fabian Schuiki

//! Closure constructions over grammars.
//!
//! Union, product, and Kleene closure each build a brand new grammar from
//! their operands, which are consumed in the process. The constructions
//! dispatch on the operands' classes to pick the variant that keeps the
//! result in the lowest possible class: regular operands get right-linear
//! preserving constructions, everything else gets generic bridge rules.

use indexmap::IndexSet;

use classify::{classify, GrammarClass};
use grammar::{Grammar, EMPTY_WORD};
use pattern::Pattern;
use rename::{allocate_symbol, merge_alphabet, merge_terminals};
use {Result, Side};

/// Build the union of two grammars.
///
/// The operands' nonterminals are renamed apart, terminals merge
/// deduplicated, and a fresh start symbol branches into either operand's
/// start. The construction itself makes no class guarantee; callers that
/// care re-classify the result.
pub fn union(g1: Grammar, g2: Grammar) -> Result<Grammar> {
    debug!("building union");
    let mut out = Grammar::new();
    let (r1, r2) = merge_operands(&mut out, g1, g2)?;
    let start = allocate_symbol(&mut out, "S");
    out.set_start(start.clone());
    copy_rules(&mut out, &r1);
    copy_rules(&mut out, &r2);
    if let Some(s1) = r1.start() {
        out.add_rule(start.clone(), s1);
    }
    if let Some(s2) = r2.start() {
        out.add_rule(start.clone(), s2);
    }
    Ok(out)
}

/// Build the product (concatenation) of two grammars.
///
/// If both operands are regular, every terminal-only exit rule of the first
/// is redirected into the second's start symbol, which preserves the
/// right-linear shape and needs no fresh start. Any other combination falls
/// back to the generic `S -> start1 start2` bridge.
pub fn product(g1: Grammar, g2: Grammar) -> Result<Grammar> {
    let c1 = classify(&g1)?;
    let c2 = classify(&g2)?;
    debug!("building product of {} and {} operands", c1, c2);
    if c1.is_regular() && c2.is_regular() {
        product_regular(g1, g2)
    } else {
        product_general(g1, g2)
    }
}

/// Build the Kleene closure of a grammar.
pub fn closure(g: Grammar) -> Result<Grammar> {
    let class = classify(&g)?;
    debug!("building closure of a {} operand", class);
    match class {
        GrammarClass::Type3 | GrammarClass::Empty => closure_regular(g),
        GrammarClass::Type2 => Ok(closure_context_free(g)),
        GrammarClass::Type0 | GrammarClass::Type1 => Ok(closure_context_sensitive(g)),
    }
}

/// Rename both operands into an accumulator.
///
/// Each rename is seeded with the other operand's terminal set, so
/// nonterminals colliding with foreign terminals are resolved as well.
fn merge_operands(out: &mut Grammar, g1: Grammar, g2: Grammar) -> Result<(Grammar, Grammar)> {
    let seed1: IndexSet<String> = g2.terminals().cloned().collect();
    let seed2: IndexSet<String> = g1.terminals().cloned().collect();
    let r1 = merge_alphabet(out, g1, &seed1)?;
    let r2 = merge_alphabet(out, g2, &seed2)?;
    merge_terminals(out, &r1);
    merge_terminals(out, &r2);
    Ok((r1, r2))
}

/// Copy all rules of a grammar into an accumulator, in order.
fn copy_rules(out: &mut Grammar, from: &Grammar) {
    for rule in from.rules() {
        out.add_rule(rule.lhs(), rule.rhs());
    }
}

/// Compute the bridged right-hand side for a terminal-only exit rule.
///
/// Returns `None` if the rule is no exit (its right-hand side contains a
/// nonterminal) or if there is no start symbol to bridge into. An exit that
/// derives the empty word bridges into the start symbol alone, since
/// appending to the marker would produce an unscannable side.
fn exit_bridge(grammar: &Grammar, index: usize, start: Option<&str>) -> Result<Option<String>> {
    let start = match start {
        Some(start) => start,
        None => return Ok(None),
    };
    let rhs = Pattern::scan(grammar, index, Side::Rhs)?;
    if rhs.nonterminals() > 0 {
        return Ok(None);
    }
    if rhs.is_empty_word() {
        Ok(Some(start.to_string()))
    } else {
        let mut text = grammar.rule(index).rhs().to_string();
        text.push_str(start);
        Ok(Some(text))
    }
}

/// Concatenate two grammars by redirecting the first one's exits.
fn product_regular(g1: Grammar, g2: Grammar) -> Result<Grammar> {
    let mut out = Grammar::new();
    let (r1, r2) = merge_operands(&mut out, g1, g2)?;
    if let Some(s1) = r1.start() {
        out.set_start(s1);
    }
    for index in 0..r1.num_rules() {
        let rule = r1.rule(index);
        match exit_bridge(&r1, index, r2.start())? {
            Some(rhs) => out.add_rule(rule.lhs(), rhs),
            None => out.add_rule(rule.lhs(), rule.rhs()),
        }
    }
    copy_rules(&mut out, &r2);
    Ok(out)
}

/// Concatenate two grammars through a fresh start symbol.
fn product_general(g1: Grammar, g2: Grammar) -> Result<Grammar> {
    let mut out = Grammar::new();
    let (r1, r2) = merge_operands(&mut out, g1, g2)?;
    let start = allocate_symbol(&mut out, "S");
    out.set_start(start.clone());
    copy_rules(&mut out, &r1);
    copy_rules(&mut out, &r2);
    if let (Some(s1), Some(s2)) = (r1.start(), r2.start()) {
        let mut rhs = s1.to_string();
        rhs.push_str(s2);
        out.add_rule(start, rhs);
    }
    Ok(out)
}

/// Star a regular grammar, preserving its right-linear shape.
///
/// Every exit of the operand additionally loops back into its start; the
/// originals are kept so each iteration can also stop.
fn closure_regular(g: Grammar) -> Result<Grammar> {
    let mut out = Grammar::new();
    for name in g.nonterminals() {
        out.add_nonterminal(name.clone());
    }
    let start = allocate_symbol(&mut out, "S");
    out.set_start(start.clone());
    merge_terminals(&mut out, &g);
    copy_rules(&mut out, &g);
    for index in 0..g.num_rules() {
        if let Some(rhs) = exit_bridge(&g, index, g.start())? {
            out.add_rule(g.rule(index).lhs(), rhs);
        }
    }
    if let Some(s) = g.start() {
        out.add_rule(start.clone(), s);
    }
    out.add_rule(start, EMPTY_WORD);
    Ok(out)
}

/// Star a context-free grammar.
fn closure_context_free(g: Grammar) -> Grammar {
    let mut out = Grammar::new();
    for name in g.nonterminals() {
        out.add_nonterminal(name.clone());
    }
    let start = allocate_symbol(&mut out, "S");
    out.set_start(start.clone());
    merge_terminals(&mut out, &g);
    copy_rules(&mut out, &g);
    if let Some(s) = g.start() {
        let mut rhs = start.clone();
        rhs.push_str(s);
        out.add_rule(start.clone(), rhs);
    }
    out.add_rule(start, EMPTY_WORD);
    out
}

/// Star a context-sensitive or unrestricted grammar without contraction.
///
/// The helper nonterminal `X` tracks a pending repetition; per terminal `a`
/// the bridges `Xa -> start a` and `Xa -> X start a` unroll one repetition
/// while keeping every rule non-contracting. This costs two rules per
/// terminal of the operand's alphabet.
fn closure_context_sensitive(g: Grammar) -> Grammar {
    let mut out = Grammar::new();
    for name in g.nonterminals() {
        out.add_nonterminal(name.clone());
    }
    let start = allocate_symbol(&mut out, "S");
    out.set_start(start.clone());
    let helper = allocate_symbol(&mut out, "X");
    merge_terminals(&mut out, &g);
    copy_rules(&mut out, &g);
    if let Some(s) = g.start() {
        out.add_rule(start.clone(), s);
    }
    out.add_rule(start.clone(), EMPTY_WORD);
    if let Some(s) = g.start() {
        let mut looped = helper.clone();
        looped.push_str(s);
        out.add_rule(start, looped);
        for term in g.terminals() {
            let mut lhs = helper.clone();
            lhs.push_str(term);
            let mut once = s.to_string();
            once.push_str(term);
            let mut again = helper.clone();
            again.push_str(s);
            again.push_str(term);
            out.add_rule(lhs.clone(), once);
            out.add_rule(lhs, again);
        }
    }
    out
}
