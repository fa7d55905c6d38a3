/*
    leftmost: a grammar-driven LL(1) parser generator and runtime.

    The pipeline is a strict one-shot sequence: the loader turns a
    grammar description into an immutable Grammar, the set engines derive
    FIRST and FOLLOW from it, the table builder combines them into the
    predictive parsing table, and the engine drives that table against a
    token stream to produce a leftmost derivation
*/

pub mod engine;
pub mod error_handling;
pub mod grammar;
pub mod loader;
pub mod sets;
pub mod table;

pub use engine::{parse, Category, SyntaxError, Token};
pub use grammar::Grammar;
pub use table::{ConflictError, ParseTable};

use sets::{first_sets, follow_sets, FirstSets, FollowSets};

// A loaded grammar with its derived tables, ready to parse any number
// of token streams
pub struct PredictiveParser {
    grammar: Grammar,
    first: FirstSets,
    follow: FollowSets,
    table: ParseTable,
}

impl PredictiveParser {
    pub fn parse(&self, tokens: &[Token]) -> Result<Vec<usize>, SyntaxError> {
        engine::parse(&self.grammar, &self.table, tokens)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn first(&self) -> &FirstSets {
        &self.first
    }

    pub fn follow(&self) -> &FollowSets {
        &self.follow
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }
}

// Runs the generator half of the pipeline over a loaded grammar
pub fn build(grammar: Grammar) -> Result<PredictiveParser, ConflictError> {
    let first = first_sets(&grammar);
    let follow = follow_sets(&grammar, &first);
    let table = table::build(&grammar, &first, &follow)?;

    Ok(PredictiveParser {
        grammar,
        first,
        follow,
        table,
    })
}
