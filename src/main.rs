use std::fs;
use std::process::exit;

use clap::Parser;
use itertools::Itertools;

use leftmost::grammar::SymbolKind;
use leftmost::sets::TerminalSet;
use leftmost::{loader, Category, PredictiveParser, Token};

mod cli;

fn main() {
    let args = cli::Cli::parse();

    let grammar = match loader::load_file(&args.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            exit(1);
        }
    };

    let parser = match leftmost::build(grammar) {
        Ok(parser) => parser,
        Err(conflict) => {
            eprintln!("{}", conflict);
            exit(1);
        }
    };

    if args.sets {
        print_sets(&parser);
    }
    if args.table {
        print_table(&parser);
    }

    if let Some(path) = args.tokens {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) => {
                eprintln!("Could not read {}: {}", path.display(), error);
                exit(1);
            }
        };
        let tokens = text.split_whitespace().map(classify_token).collect_vec();

        match parser.parse(&tokens) {
            Ok(trace) => {
                for number in trace {
                    println!("{}", parser.grammar().display_rule(number));
                }
            }
            Err(error) => {
                eprintln!("{}", error);
                exit(1);
            }
        }
    }
}

// A minimal stand-in for the external lexer: good enough to classify a
// whitespace-separated token file for the demo binary
fn classify_token(text: &str) -> Token {
    let category = if text.chars().all(|c| c.is_ascii_digit()) {
        Category::IntConstant
    } else if text.contains('.') && text.parse::<f64>().is_ok() {
        Category::DoubleConstant
    } else if text.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
        Category::Identifier
    } else {
        Category::Literal
    };
    Token::new(text, category)
}

fn print_sets(parser: &PredictiveParser) {
    let grammar = parser.grammar();
    let names = |set: &TerminalSet| set.iter().map(|&t| grammar.name(t)).join(", ");

    for &symbol in grammar.alphabet() {
        println!("FIRST({}) = {{{}}}", grammar.name(symbol), names(parser.first().of(symbol)));
    }
    for &symbol in grammar.alphabet() {
        if grammar.kind(symbol) == SymbolKind::Nonterminal {
            println!("FOLLOW({}) = {{{}}}", grammar.name(symbol), names(parser.follow().of(symbol)));
        }
    }
}

fn print_table(parser: &PredictiveParser) {
    let grammar = parser.grammar();
    for (nonterminal, lookahead, rule) in parser.table().iter().sorted() {
        println!(
            "M[{}, {}] = {}",
            grammar.name(nonterminal),
            grammar.name(lookahead),
            grammar.display_rule(rule)
        );
    }
}
