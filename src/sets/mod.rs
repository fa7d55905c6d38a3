/*
    This module computes the FIRST and FOLLOW sets of a grammar. Both
    engines are iterative fixpoints: contributions are folded in rule by
    rule until no set grows, so mutually recursive nonterminals need no
    cycle guard
*/

mod first;
mod follow;

pub use first::{first_sets, FirstSets, TerminalSet};
pub use follow::{follow_sets, FollowSets};
