// Copyright (c) 2018 Fabian Schuiki

//! Grammar classification along the Chomsky hierarchy.
//!
//! Classification folds over the production rules of a grammar, carrying a
//! running class that starts at type 3 and only ever moves down. Each rule is
//! checked against the structural predicate of the running class; a
//! violation demotes the grammar and the same rule falls through to the next
//! weaker predicate. Once type 0 is reached no later rule can raise the
//! class again, so the scan stops early.

use std::fmt;

use bit_set::BitSet;

use grammar::Grammar;
use pattern::Pattern;
use {Error, Result, Side};

/// The class of a grammar within the Chomsky hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarClass {
    /// Unrestricted grammars.
    Type0,
    /// Context-sensitive grammars.
    Type1,
    /// Context-free grammars.
    Type2,
    /// Regular grammars.
    Type3,
    /// A grammar without production rules, vacuously regular.
    Empty,
}

impl GrammarClass {
    /// Check whether this class dispatches like a regular grammar.
    ///
    /// Rule-less grammars are treated as type 3 by the closure
    /// constructions.
    pub fn is_regular(self) -> bool {
        match self {
            GrammarClass::Type3 | GrammarClass::Empty => true,
            _ => false,
        }
    }
}

impl fmt::Display for GrammarClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GrammarClass::Type0 => write!(f, "type 0"),
            GrammarClass::Type1 => write!(f, "type 1"),
            GrammarClass::Type2 => write!(f, "type 2"),
            GrammarClass::Type3 => write!(f, "type 3"),
            GrammarClass::Empty => write!(f, "empty"),
        }
    }
}

/// Classify a grammar within the Chomsky hierarchy.
///
/// This is a pure read-only traversal; the grammar is never modified. Fails
/// with [`DegenerateGrammar`](Error::DegenerateGrammar) if rules are present
/// but no start symbol is available, and with
/// [`UnknownSymbol`](Error::UnknownSymbol) if a rule references text outside
/// the grammar's alphabets.
pub fn classify(grammar: &Grammar) -> Result<GrammarClass> {
    if grammar.num_rules() == 0 {
        return Ok(GrammarClass::Empty);
    }
    let start = match grammar.start() {
        Some(start) if grammar.is_nonterminal(start) => start,
        _ => return Err(Error::DegenerateGrammar),
    };

    // Scan all rules up front. The erasure side conditions need to know
    // which names ever occur on a right-hand side, which is answered from a
    // bit set over the combined alphabet indices.
    let mut patterns = Vec::with_capacity(grammar.num_rules());
    let mut rhs_names = BitSet::with_capacity(grammar.num_nonterminals() + grammar.num_terminals());
    for index in 0..grammar.num_rules() {
        let lhs = Pattern::scan(grammar, index, Side::Lhs)?;
        let rhs = Pattern::scan(grammar, index, Side::Rhs)?;
        for token in rhs.tokens() {
            if let Some(bit) = token.name().and_then(|name| name_bit(grammar, name)) {
                rhs_names.insert(bit);
            }
        }
        patterns.push((lhs, rhs));
    }

    let mut class = GrammarClass::Type3;
    for (index, &(ref lhs, ref rhs)) in patterns.iter().enumerate() {
        if class == GrammarClass::Type3 && !is_right_linear(grammar, lhs, rhs, &rhs_names) {
            debug!("rule {} `{}` is not right-linear", index, grammar.rule(index));
            class = GrammarClass::Type2;
        }
        if class == GrammarClass::Type2 && !is_context_free(lhs) {
            debug!("rule {} `{}` is not context-free", index, grammar.rule(index));
            class = GrammarClass::Type1;
        }
        if class == GrammarClass::Type1 && !is_context_sensitive(grammar, start, lhs, rhs, &rhs_names)
        {
            debug!(
                "rule {} `{}` is not context-sensitive",
                index,
                grammar.rule(index)
            );
            class = GrammarClass::Type0;
            break;
        }
    }
    trace!("grammar classified as {}", class);
    Ok(class)
}

/// Map a symbol name to its occurrence bit.
///
/// Nonterminal indices come first, terminal indices follow offset by the
/// nonterminal count.
fn name_bit(grammar: &Grammar, name: &str) -> Option<usize> {
    if let Some(index) = grammar.nonterminal_index(name) {
        return Some(index);
    }
    grammar
        .terminal_index(name)
        .map(|index| grammar.num_nonterminals() + index)
}

/// Check whether a name occurs on the right-hand side of any rule.
fn occurs_on_any_rhs(grammar: &Grammar, name: &str, rhs_names: &BitSet) -> bool {
    name_bit(grammar, name)
        .map(|bit| rhs_names.contains(bit))
        .unwrap_or(false)
}

/// Check a rule against the regular (type 3) shape.
///
/// The left-hand side must be a single symbol. A right-hand side without
/// nonterminals is a plain exit, except that an erasing rule is only regular
/// if the erased symbol never reappears on a right-hand side. A single
/// nonterminal on the right must not have terminals on both its outermost
/// flanks at once, which keeps the rule linear.
fn is_right_linear(grammar: &Grammar, lhs: &Pattern, rhs: &Pattern, rhs_names: &BitSet) -> bool {
    if lhs.symbols() != 1 {
        return false;
    }
    match rhs.nonterminals() {
        0 => {
            if rhs.is_empty_word() {
                match lhs.tokens()[0].name() {
                    Some(name) => !occurs_on_any_rhs(grammar, name, rhs_names),
                    None => false,
                }
            } else {
                true
            }
        }
        1 => {
            let tokens = rhs.tokens();
            let first_is_term = !tokens[0].is_nonterminal();
            let last_is_term = !tokens[tokens.len() - 1].is_nonterminal();
            !(first_is_term && last_is_term)
        }
        _ => false,
    }
}

/// Check a rule against the context-free (type 2) shape.
fn is_context_free(lhs: &Pattern) -> bool {
    lhs.symbols() == 1
}

/// Check a rule against the context-sensitive (type 1) shape.
///
/// The rule must not contract, with one exception: erasing the start symbol
/// is permitted as long as the start symbol occurs on no right-hand side. A
/// multi-symbol left-hand side must rewrite exactly one occurrence; the
/// symbols left of the pivot must reappear as a prefix of the right-hand
/// side, the symbols right of it as a suffix.
fn is_context_sensitive(
    grammar: &Grammar,
    start: &str,
    lhs: &Pattern,
    rhs: &Pattern,
    rhs_names: &BitSet,
) -> bool {
    if rhs.is_empty_word() {
        let erases_start = lhs.symbols() == 1 && lhs.tokens()[0].name() == Some(start);
        return erases_start && !occurs_on_any_rhs(grammar, start, rhs_names);
    }
    if lhs.symbols() > rhs.symbols() {
        return false;
    }
    if lhs.symbols() > 1 {
        let pivot = find_pivot(lhs, rhs);
        let lt = lhs.tokens();
        let rt = rhs.tokens();
        let left = &lt[..pivot];
        let right = &lt[pivot + 1..];
        if !rt.starts_with(left) {
            return false;
        }
        if !rt.ends_with(right) {
            return false;
        }
    }
    true
}

/// Locate the pivot within a multi-symbol left-hand side.
///
/// The pivot is the occurrence the rule rewrites: the first symbol that does
/// not occur on the right-hand side at all, or among repeated names with a
/// net count change the occurrence where successive prefixes of the two
/// sides first diverge, defaulting to the last occurrence of the name. If
/// every left-hand symbol survives unchanged, the last position is assumed.
fn find_pivot(lhs: &Pattern, rhs: &Pattern) -> usize {
    let lt = lhs.tokens();
    let rt = rhs.tokens();
    let mut pivot = lt.len() - 1;
    for (index, token) in lt.iter().enumerate() {
        let name = match token.name() {
            Some(name) => name,
            None => continue,
        };
        if !rhs.contains_name(name) {
            pivot = index;
            break;
        }
        if lhs.count_name(name) > 1 {
            pivot = index;
            if lhs.count_name(name) != rhs.count_name(name) {
                let occurrences: Vec<usize> = lt
                    .iter()
                    .enumerate()
                    .filter(|&(_, t)| t.name() == Some(name))
                    .map(|(i, _)| i)
                    .collect();
                let mut diverged = false;
                let mut prev = 0;
                for &occ in &occurrences {
                    let chunk = rt.get(prev..occ).unwrap_or(&[]);
                    if &lt[prev..occ] != chunk {
                        pivot = prev;
                        diverged = true;
                        break;
                    }
                    prev = occ;
                }
                if !diverged {
                    pivot = occurrences[occurrences.len() - 1];
                }
            }
            break;
        }
    }
    pivot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar(nonterms: &[&str], terms: &[&str], rules: &[(&str, &str)]) -> Grammar {
        let mut g = Grammar::new();
        for name in nonterms {
            g.add_nonterminal(*name);
        }
        for name in terms {
            g.add_terminal(*name);
        }
        if !nonterms.is_empty() {
            g.set_start(nonterms[0]);
        }
        for &(lhs, rhs) in rules {
            g.add_rule(lhs, rhs);
        }
        g
    }

    #[test]
    fn no_rules_is_empty() {
        let g = grammar(&["S"], &["a"], &[]);
        assert_eq!(classify(&g), Ok(GrammarClass::Empty));
    }

    #[test]
    fn missing_start_is_degenerate() {
        let g = grammar(&[], &["a"], &[("a", "a")]);
        assert_eq!(classify(&g), Err(Error::DegenerateGrammar));
    }

    #[test]
    fn unknown_symbol_aborts() {
        let g = grammar(&["S"], &["a"], &[("S", "aQ")]);
        assert_eq!(
            classify(&g),
            Err(Error::UnknownSymbol {
                rule: 0,
                side: Side::Rhs,
                text: "Q".into(),
            })
        );
    }

    #[test]
    fn right_linear_grammar() {
        let g = grammar(&["S", "A"], &["a", "b"], &[("S", "aA"), ("A", "b")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type3));
    }

    #[test]
    fn terminal_only_rules_stay_regular() {
        let g = grammar(&["S"], &["a", "b"], &[("S", "ab"), ("S", "a")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type3));
    }

    #[test]
    fn erasing_rule_stays_regular_if_symbol_never_recurs() {
        // `S` occurs on no right-hand side, so `S -> |` keeps the grammar
        // regular.
        let g = grammar(&["S", "A"], &["a"], &[("S", "aA"), ("A", "a"), ("S", "|")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type3));
    }

    #[test]
    fn erasing_recursive_symbol_demotes() {
        // `S` recurs on a right-hand side, so `S -> |` is not a regular
        // rule; with a single-symbol left-hand side it is still
        // context-free.
        let g = grammar(&["S"], &["a"], &[("S", "aS"), ("S", "|")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type2));
    }

    #[test]
    fn two_nonterminals_on_the_right_demote() {
        let g = grammar(
            &["S", "A", "B"],
            &["a", "b"],
            &[
                ("S", "AB"),
                ("A", "aA"),
                ("A", "a"),
                ("B", "bB"),
                ("B", "b"),
            ],
        );
        assert_eq!(classify(&g), Ok(GrammarClass::Type2));
    }

    #[test]
    fn flanked_nonterminal_demotes() {
        let g = grammar(&["S"], &["a", "b"], &[("S", "aSb"), ("S", "ab")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type2));
    }

    #[test]
    fn context_rewrite_is_type1() {
        // `AB -> AbB` rewrites `B` within the left context `A`.
        let g = grammar(
            &["S", "A", "B"],
            &["a", "b"],
            &[("S", "AB"), ("AB", "AbB"), ("A", "a"), ("B", "b")],
        );
        assert_eq!(classify(&g), Ok(GrammarClass::Type1));
    }

    #[test]
    fn context_mismatch_is_type0() {
        // `B` vanishes from the right-hand side, so the right context of
        // the pivot `A` cannot be matched.
        let g = grammar(
            &["S", "A", "B"],
            &["a", "b"],
            &[("S", "AB"), ("AB", "ab")],
        );
        assert_eq!(classify(&g), Ok(GrammarClass::Type0));
    }

    #[test]
    fn contraction_is_type0() {
        let g = grammar(&["S", "A"], &["a"], &[("S", "AAA"), ("AA", "a")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type0));
    }

    #[test]
    fn erasing_the_start_is_type1() {
        // The start symbol may erase even at type 1, as long as it recurs
        // on no right-hand side.
        let g = grammar(
            &["S", "A", "B"],
            &["a", "b"],
            &[
                ("S", "AB"),
                ("AB", "AbB"),
                ("S", "|"),
                ("A", "a"),
                ("B", "b"),
            ],
        );
        assert_eq!(classify(&g), Ok(GrammarClass::Type1));
    }

    #[test]
    fn erasing_a_recurring_start_is_type0() {
        let g = grammar(
            &["S", "A", "B"],
            &["a", "b"],
            &[("S", "AB"), ("AB", "ASB"), ("S", "|")],
        );
        assert_eq!(classify(&g), Ok(GrammarClass::Type0));
    }

    #[test]
    fn classification_is_monotone() {
        // Appending a violating rule can only lower the class, never raise
        // it back.
        let mut g = grammar(&["S", "A"], &["a", "b"], &[("S", "aA"), ("A", "b")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type3));
        g.add_rule("AA", "b");
        assert_eq!(classify(&g), Ok(GrammarClass::Type0));
    }

    #[test]
    fn prepended_violation_sticks() {
        let g = grammar(
            &["S", "A"],
            &["a", "b"],
            &[("AA", "b"), ("S", "aA"), ("A", "b")],
        );
        assert_eq!(classify(&g), Ok(GrammarClass::Type0));
    }

    #[test]
    fn repeated_name_pivot() {
        // `A` appears twice on the left with a net count change. The
        // prefixes of both sides never diverge, so the last occurrence is
        // the one rewritten; its left context `aA` survives as a prefix.
        let g = grammar(&["S", "A"], &["a", "b"], &[("aAA", "aAbb"), ("S", "AA")]);
        assert_eq!(classify(&g), Ok(GrammarClass::Type1));
    }
}
