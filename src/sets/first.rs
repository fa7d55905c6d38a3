use std::collections::BTreeSet;

use crate::grammar::{Grammar, SymbolId, SymbolKind, END, EPSILON};

// Sets are ordered so printing and equality checks are deterministic
pub type TerminalSet = BTreeSet<SymbolId>;

// FIRST(X) for every symbol in the arena: the terminals (possibly
// including EPSILON) that can begin a derivation from X
#[derive(Debug, Clone, PartialEq)]
pub struct FirstSets {
    sets: Vec<TerminalSet>,
}

impl FirstSets {
    pub fn of(&self, symbol: SymbolId) -> &TerminalSet {
        &self.sets[symbol.0 as usize]
    }

    // FIRST of a symbol chain: the union of each link's FIRST minus
    // EPSILON, cut off at the first non-nullable link; EPSILON itself is
    // a member only when every link is nullable. Reads the computed
    // per-symbol sets without touching them.
    pub fn of_chain(&self, chain: &[SymbolId]) -> TerminalSet {
        let mut result = TerminalSet::new();

        for &symbol in chain {
            let first = self.of(symbol);
            result.extend(first.iter().copied().filter(|&t| t != EPSILON));
            if !first.contains(&EPSILON) {
                return result;
            }
        }

        result.insert(EPSILON);
        return result;
    }
}

pub fn first_sets(grammar: &Grammar) -> FirstSets {
    let mut sets = FirstSets {
        sets: vec![TerminalSet::new(); grammar.symbol_count()],
    };

    // FIRST(t) = {t} for every terminal, the sentinels included
    for &symbol in grammar.alphabet() {
        if grammar.kind(symbol) == SymbolKind::Terminal {
            sets.sets[symbol.0 as usize].insert(symbol);
        }
    }
    sets.sets[END.0 as usize].insert(END);

    // fold each right side into FIRST(lhs) until nothing grows
    loop {
        let mut changed = false;
        for rule in grammar.rules() {
            let from_rhs = sets.of_chain(&rule.rhs);
            let target = &mut sets.sets[rule.lhs.0 as usize];
            let before = target.len();
            target.extend(from_rhs);
            changed |= target.len() != before;
        }
        if !changed {
            break;
        }
    }

    return sets;
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::loader::load_str;

    fn load(text: &str) -> Grammar {
        load_str(text, &PathBuf::new()).unwrap()
    }

    fn set(grammar: &Grammar, names: &[&str]) -> TerminalSet {
        names.iter().map(|name| grammar.lookup(name).unwrap()).collect()
    }

    #[test]
    fn terminals_are_their_own_first() {
        let grammar = load("S -> a A | b\nA -> c A | EPSILON\n");
        let first = first_sets(&grammar);

        for &symbol in grammar.alphabet() {
            if grammar.kind(symbol) == SymbolKind::Terminal {
                assert_eq!(first.of(symbol), &TerminalSet::from([symbol]));
            }
        }
    }

    #[test]
    fn nonterminal_first_unions_its_alternatives() {
        let grammar = load("S -> a A | b\nA -> c A | EPSILON\n");
        let first = first_sets(&grammar);

        assert_eq!(first.of(grammar.lookup("S").unwrap()), &set(&grammar, &["a", "b"]));
        assert_eq!(first.of(grammar.lookup("A").unwrap()), &set(&grammar, &["c", "EPSILON"]));
    }

    #[test]
    fn nullable_prefix_exposes_later_symbols() {
        // B can vanish, so FIRST(S) must see through it to c
        let grammar = load("S -> B c\nB -> b | EPSILON\n");
        let first = first_sets(&grammar);

        assert_eq!(first.of(grammar.lookup("S").unwrap()), &set(&grammar, &["b", "c"]));
    }

    #[test]
    fn epsilon_needs_every_link_nullable() {
        let grammar = load("S -> A B\nA -> a | EPSILON\nB -> b | EPSILON\n");
        let first = first_sets(&grammar);

        assert_eq!(
            first.of(grammar.lookup("S").unwrap()),
            &set(&grammar, &["a", "b", "EPSILON"])
        );
    }

    #[test]
    fn mutual_recursion_reaches_a_fixpoint() {
        // X and Y refer to each other; the worklist must still terminate
        // with both seeing each other's terminals
        let grammar = load("X -> Y x | a\nY -> X y | b\n");
        let first = first_sets(&grammar);

        assert_eq!(first.of(grammar.lookup("X").unwrap()), &set(&grammar, &["a", "b"]));
        assert_eq!(first.of(grammar.lookup("Y").unwrap()), &set(&grammar, &["a", "b"]));
    }

    #[test]
    fn chain_first_stops_at_non_nullable() {
        let grammar = load("S -> A b\nA -> a | EPSILON\n");
        let first = first_sets(&grammar);
        let a = grammar.lookup("A").unwrap();
        let b = grammar.lookup("b").unwrap();

        assert_eq!(first.of_chain(&[a, b]), set(&grammar, &["a", "b"]));
        assert_eq!(first.of_chain(&[b, a]), set(&grammar, &["b"]));
        assert_eq!(first.of_chain(&[a]), set(&grammar, &["a", "EPSILON"]));
        assert_eq!(first.of_chain(&[EPSILON]), set(&grammar, &["EPSILON"]));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let grammar = load("S -> a A | b\nA -> c A | EPSILON\n");
        assert_eq!(first_sets(&grammar), first_sets(&grammar));
    }
}
