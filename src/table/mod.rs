/*
    This module builds the LL(1) parsing table: a deterministic map from
    (nonterminal, lookahead terminal) to the rule to apply
*/

use std::collections::HashMap;
use std::fmt::Display;

use crate::grammar::{Grammar, SymbolId, EPSILON};
use crate::sets::{FirstSets, FollowSets};

#[derive(Debug, PartialEq)]
pub struct ParseTable {
    entries: HashMap<(SymbolId, SymbolId), usize>,
}

impl ParseTable {
    // The rule to apply when `nonterminal` is on the stack and
    // `lookahead` is the next input terminal
    pub fn get(&self, nonterminal: SymbolId, lookahead: SymbolId) -> Option<usize> {
        self.entries.get(&(nonterminal, lookahead)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, SymbolId, usize)> + '_ {
        self.entries.iter().map(|(&(nt, t), &rule)| (nt, t, rule))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Two rules claimed the same (nonterminal, lookahead) cell, so the
// grammar is not LL(1)
#[derive(Debug, PartialEq)]
pub struct ConflictError {
    pub nonterminal: String,
    pub lookahead: String,
    pub first_rule: String,
    pub second_rule: String,
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grammar is not LL(1): on `{}` with lookahead `{}`, both `{}` and `{}` apply",
            self.nonterminal, self.lookahead, self.first_rule, self.second_rule
        )
    }
}

impl std::error::Error for ConflictError {}

// For each rule `A -> alpha` in number order: enter the rule under every
// terminal in FIRST(alpha) minus EPSILON, plus every terminal in
// FOLLOW(A) when alpha is nullable. EPSILON is never a lookahead key.
pub fn build(
    grammar: &Grammar,
    first: &FirstSets,
    follow: &FollowSets,
) -> Result<ParseTable, ConflictError> {
    let mut entries = HashMap::new();

    for rule in grammar.rules() {
        let first_of_rhs = first.of_chain(&rule.rhs);

        for &lookahead in &first_of_rhs {
            if lookahead != EPSILON {
                insert(grammar, &mut entries, rule.lhs, lookahead, rule.number)?;
            }
        }

        if first_of_rhs.contains(&EPSILON) {
            for &lookahead in follow.of(rule.lhs) {
                insert(grammar, &mut entries, rule.lhs, lookahead, rule.number)?;
            }
        }
    }

    return Ok(ParseTable { entries });
}

fn insert(
    grammar: &Grammar,
    entries: &mut HashMap<(SymbolId, SymbolId), usize>,
    nonterminal: SymbolId,
    lookahead: SymbolId,
    rule: usize,
) -> Result<(), ConflictError> {
    if let Some(&earlier) = entries.get(&(nonterminal, lookahead)) {
        // a rule may land in its own cell twice (FIRST and FOLLOW paths);
        // only a different rule is a conflict
        if earlier != rule {
            return Err(ConflictError {
                nonterminal: grammar.name(nonterminal).to_string(),
                lookahead: grammar.name(lookahead).to_string(),
                first_rule: grammar.display_rule(earlier),
                second_rule: grammar.display_rule(rule),
            });
        }
        return Ok(());
    }

    entries.insert((nonterminal, lookahead), rule);
    return Ok(());
}
