/*
    This module is the symbol and production model: an append-only arena
    of symbols referenced by stable integer id, plus the rules built over
    them and the finished Grammar value
*/

use std::collections::HashMap;
use std::fmt::Display;

// Index into the symbol arena. Symbols are compared by id, never by name:
// the arena guarantees one id per spelling, so id equality is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

// The empty-string sentinel. Always present in the alphabet.
pub const EPSILON: SymbolId = SymbolId(0);

// The end-of-input sentinel. Lives in the arena but not in the alphabet;
// it appears only in FOLLOW sets and as the input-stream terminator.
pub const END: SymbolId = SymbolId(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

// A single production `lhs -> rhs`. An epsilon production is represented
// as a one-symbol right side equal to EPSILON, never as an empty vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub number: usize,
    pub lhs: SymbolId,
    pub rhs: Vec<SymbolId>,
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    symbols: Vec<Symbol>,
    names: HashMap<String, SymbolId>,
    alphabet: Vec<SymbolId>,
    rules: Vec<Rule>,
    start: SymbolId,
}

impl Grammar {
    // An empty grammar holding only the two sentinels. Only the loader
    // builds on top of this; everything downstream sees it read-only.
    pub(crate) fn empty() -> Self {
        let mut grammar = Grammar {
            symbols: Vec::new(),
            names: HashMap::new(),
            alphabet: Vec::new(),
            rules: Vec::new(),
            start: EPSILON,
        };

        let epsilon = grammar.intern("EPSILON", SymbolKind::Terminal);
        debug_assert_eq!(epsilon, EPSILON);

        // END is interned by hand so it stays out of the alphabet
        grammar.symbols.push(Symbol {
            name: "END".to_string(),
            kind: SymbolKind::Terminal,
        });
        grammar.names.insert("END".to_string(), END);

        return grammar;
    }

    // Returns the id for `name`, registering it with the next sequential
    // id if it has not been seen before. The kind of the first
    // registration sticks; later calls ignore their `kind` argument.
    pub(crate) fn intern(&mut self, name: &str, kind: SymbolKind) -> SymbolId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }

        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
        });
        self.names.insert(name.to_string(), id);
        self.alphabet.push(id);
        return id;
    }

    pub(crate) fn push_rule(&mut self, lhs: SymbolId, rhs: Vec<SymbolId>) {
        if self.rules.is_empty() {
            self.start = lhs;
        }
        self.rules.push(Rule {
            number: self.rules.len(),
            lhs,
            rhs,
        });
    }

    pub fn start_symbol(&self) -> SymbolId {
        self.start
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, number: usize) -> &Rule {
        &self.rules[number]
    }

    // Every symbol of the loaded grammar, in registration order.
    // Includes EPSILON, excludes END.
    pub fn alphabet(&self) -> &[SymbolId] {
        &self.alphabet
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.names.get(name).copied()
    }

    pub fn kind(&self, id: SymbolId) -> SymbolKind {
        self.symbols[id.0 as usize].kind
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbols[id.0 as usize].name
    }

    // Total arena size, sentinels included. Sizes the per-symbol tables
    // built by the FIRST and FOLLOW engines.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    // Renders a rule as `Lhs -> sym sym sym` for diagnostics
    pub fn display_rule(&self, number: usize) -> String {
        let rule = &self.rules[number];
        let mut text = format!("{} ->", self.name(rule.lhs));
        for &sym in &rule.rhs {
            text.push(' ');
            text.push_str(self.name(sym));
        }
        return text;
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_preregistered() {
        let grammar = Grammar::empty();

        assert_eq!(grammar.lookup("EPSILON"), Some(EPSILON));
        assert_eq!(grammar.lookup("END"), Some(END));
        assert_eq!(grammar.kind(EPSILON), SymbolKind::Terminal);
        assert_eq!(grammar.kind(END), SymbolKind::Terminal);

        // EPSILON belongs to the alphabet, END does not
        assert!(grammar.alphabet().contains(&EPSILON));
        assert!(!grammar.alphabet().contains(&END));
    }

    #[test]
    fn intern_assigns_sequential_ids_once() {
        let mut grammar = Grammar::empty();

        let s = grammar.intern("S", SymbolKind::Nonterminal);
        let a = grammar.intern("a", SymbolKind::Terminal);
        assert_eq!(s, SymbolId(2));
        assert_eq!(a, SymbolId(3));

        // Re-interning returns the original id and keeps the first kind
        assert_eq!(grammar.intern("S", SymbolKind::Terminal), s);
        assert_eq!(grammar.kind(s), SymbolKind::Nonterminal);
        assert_eq!(grammar.symbol_count(), 4);
    }

    #[test]
    fn first_rule_sets_start_symbol() {
        let mut grammar = Grammar::empty();
        let s = grammar.intern("S", SymbolKind::Nonterminal);
        let a = grammar.intern("a", SymbolKind::Terminal);

        grammar.push_rule(s, vec![a]);
        grammar.push_rule(s, vec![EPSILON]);

        assert_eq!(grammar.start_symbol(), s);
        assert_eq!(grammar.rules().len(), 2);
        assert_eq!(grammar.rule(1).number, 1);
        assert_eq!(grammar.display_rule(0), "S -> a");
    }
}
