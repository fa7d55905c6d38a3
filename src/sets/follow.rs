use crate::grammar::{Grammar, SymbolId, SymbolKind, END, EPSILON};

use super::first::{FirstSets, TerminalSet};

// FOLLOW(A) for every nonterminal: the terminals (possibly including
// END) that can appear immediately after A in a derivation from the
// start symbol. Terminal slots stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowSets {
    sets: Vec<TerminalSet>,
}

impl FollowSets {
    pub fn of(&self, nonterminal: SymbolId) -> &TerminalSet {
        &self.sets[nonterminal.0 as usize]
    }
}

// For every occurrence `A -> alpha B beta`:
//   FOLLOW(B) takes FIRST(beta) minus EPSILON, and
//   FOLLOW(B) takes FOLLOW(A) when beta is empty or nullable.
// The second rule makes FOLLOW sets mutually dependent, so contributions
// are re-propagated until no set grows
pub fn follow_sets(grammar: &Grammar, first: &FirstSets) -> FollowSets {
    let mut sets = vec![TerminalSet::new(); grammar.symbol_count()];
    sets[grammar.start_symbol().0 as usize].insert(END);

    loop {
        let mut changed = false;
        for rule in grammar.rules() {
            for (i, &symbol) in rule.rhs.iter().enumerate() {
                if grammar.kind(symbol) != SymbolKind::Nonterminal {
                    continue;
                }

                let beta = &rule.rhs[i + 1..];
                let mut contribution;
                let beta_nullable;
                if beta.is_empty() {
                    contribution = TerminalSet::new();
                    beta_nullable = true;
                } else {
                    contribution = first.of_chain(beta);
                    beta_nullable = contribution.remove(&EPSILON);
                }
                if beta_nullable {
                    let follow_lhs = sets[rule.lhs.0 as usize].clone();
                    contribution.extend(follow_lhs);
                }

                let target = &mut sets[symbol.0 as usize];
                let before = target.len();
                target.extend(contribution);
                changed |= target.len() != before;
            }
        }
        if !changed {
            break;
        }
    }

    return FollowSets { sets };
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::loader::load_str;
    use crate::sets::first_sets;

    fn load(text: &str) -> Grammar {
        load_str(text, &PathBuf::new()).unwrap()
    }

    fn follow(grammar: &Grammar) -> FollowSets {
        follow_sets(grammar, &first_sets(grammar))
    }

    fn set(grammar: &Grammar, names: &[&str]) -> TerminalSet {
        names.iter()
            .map(|&name| {
                if name == "END" { END } else { grammar.lookup(name).unwrap() }
            })
            .collect()
    }

    #[test]
    fn start_symbol_is_followed_by_end() {
        let grammar = load("S -> a A | b\nA -> c A | EPSILON\n");
        let sets = follow(&grammar);

        assert_eq!(sets.of(grammar.lookup("S").unwrap()), &set(&grammar, &["END"]));
        assert_eq!(sets.of(grammar.lookup("A").unwrap()), &set(&grammar, &["END"]));
    }

    #[test]
    fn follow_takes_first_of_the_suffix() {
        let grammar = load("S -> A b\nA -> a\n");
        let sets = follow(&grammar);

        assert_eq!(sets.of(grammar.lookup("A").unwrap()), &set(&grammar, &["b"]));
    }

    #[test]
    fn nullable_suffix_inherits_follow_of_the_left_side() {
        // B is followed by C; C can vanish, so FOLLOW(B) also inherits
        // FOLLOW(S) = {END}
        let grammar = load("S -> B C\nB -> b\nC -> c | EPSILON\n");
        let sets = follow(&grammar);

        assert_eq!(sets.of(grammar.lookup("B").unwrap()), &set(&grammar, &["c", "END"]));
        assert_eq!(sets.of(grammar.lookup("C").unwrap()), &set(&grammar, &["END"]));
    }

    #[test]
    fn follow_never_contains_epsilon() {
        let grammar = load("S -> A B\nA -> a | EPSILON\nB -> b | EPSILON\n");
        let sets = follow(&grammar);

        for &symbol in grammar.alphabet() {
            assert!(!sets.of(symbol).contains(&EPSILON));
        }
    }

    #[test]
    fn propagation_crosses_long_dependency_chains() {
        // FOLLOW(D) depends on FOLLOW(C) on FOLLOW(B) on FOLLOW(A); the
        // fixpoint must push x all the way down
        let grammar = load("S -> A x\nA -> B\nB -> C\nC -> D\nD -> d\n");
        let sets = follow(&grammar);

        for name in ["A", "B", "C", "D"] {
            assert_eq!(sets.of(grammar.lookup(name).unwrap()), &set(&grammar, &["x"]));
        }
    }

    #[test]
    fn expression_grammar_follow_sets() {
        let grammar = load(
            "E -> T Etail\n\
             Etail -> + T Etail | EPSILON\n\
             T -> F Ttail\n\
             Ttail -> * F Ttail | EPSILON\n\
             F -> ( E ) | id\n",
        );
        let sets = follow(&grammar);

        assert_eq!(sets.of(grammar.lookup("E").unwrap()), &set(&grammar, &[")", "END"]));
        assert_eq!(sets.of(grammar.lookup("Etail").unwrap()), &set(&grammar, &[")", "END"]));
        assert_eq!(sets.of(grammar.lookup("T").unwrap()), &set(&grammar, &["+", ")", "END"]));
        assert_eq!(sets.of(grammar.lookup("F").unwrap()), &set(&grammar, &["+", "*", ")", "END"]));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let grammar = load("S -> a A | b\nA -> c A | EPSILON\n");
        let first = first_sets(&grammar);
        assert_eq!(follow_sets(&grammar, &first), follow_sets(&grammar, &first));
    }
}
