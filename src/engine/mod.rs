/*
    This module is the table-driven parser: it resolves the token stream
    from the external lexer to grammar terminals, then runs the stack
    automaton against the parsing table, recording every rule it applies
*/

use std::fmt::Display;

use crate::grammar::{Grammar, SymbolId, SymbolKind, END, EPSILON};
use crate::table::ParseTable;

// Lexical category of a token, as classified by the external lexer.
// The first three fall back to the generic terminals `id`, `intConst`
// and `doubleConst` when the token's spelling matches no terminal;
// Literal tokens are matched by their exact spelling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Identifier,
    IntConstant,
    DoubleConstant,
    Literal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub category: Category,
}

impl Token {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Token {
            text: text.into(),
            category,
        }
    }
}

// The input is not derivable from the start symbol. `consumed` is the
// number of tokens matched before the parse got stuck.
#[derive(Debug, PartialEq)]
pub struct SyntaxError {
    pub consumed: usize,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error after token #{}", self.consumed)
    }
}

impl std::error::Error for SyntaxError {}

// Maps a token to a terminal: exact spelling first, then the category
// fallback. A token that resolves neither way is a lexer/grammar
// configuration fault, not a syntax error, so it panics.
fn resolve(grammar: &Grammar, token: &Token) -> SymbolId {
    if let Some(id) = grammar.lookup(&token.text) {
        if grammar.kind(id) == SymbolKind::Terminal {
            return id;
        }
    }

    let fallback = match token.category {
        Category::Identifier => "id",
        Category::IntConstant => "intConst",
        Category::DoubleConstant => "doubleConst",
        Category::Literal => {
            panic!("token `{}` matches no terminal and has no category fallback", token.text)
        }
    };
    match grammar.lookup(fallback) {
        Some(id) => id,
        None => panic!("grammar has no `{}` terminal for token `{}`", fallback, token.text),
    }
}

// Runs the predictive parse. On success the returned trace holds the
// numbers of the applied rules in application order, which is a leftmost
// derivation of the input (resolve them with `Grammar::rule`).
pub fn parse(
    grammar: &Grammar,
    table: &ParseTable,
    tokens: &[Token],
) -> Result<Vec<usize>, SyntaxError> {
    let mut input: Vec<SymbolId> = tokens.iter().map(|t| resolve(grammar, t)).collect();
    input.push(END);

    let mut stack = vec![END, grammar.start_symbol()];
    let mut trace = Vec::new();
    let mut consumed = 0;

    while let Some(&top) = stack.last() {
        let Some(&lookahead) = input.get(consumed) else {
            break;
        };

        if grammar.kind(top) == SymbolKind::Terminal {
            if top != lookahead {
                return Err(SyntaxError { consumed });
            }
            stack.pop();
            consumed += 1;
        } else {
            let Some(number) = table.get(top, lookahead) else {
                return Err(SyntaxError { consumed });
            };
            stack.pop();
            // push the right side reversed so it pops left-to-right;
            // EPSILON contributes nothing to the stack
            for &symbol in grammar.rule(number).rhs.iter().rev() {
                if symbol != EPSILON {
                    stack.push(symbol);
                }
            }
            trace.push(number);
        }
    }

    // both stacks bottom out on END, so a successful parse exhausts them
    // together; leftover input means the stack emptied too early
    if consumed < input.len() {
        return Err(SyntaxError { consumed });
    }
    return Ok(trace);
}
