use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar description
    pub file: PathBuf,

    /// File of whitespace-separated tokens to parse against the grammar
    #[arg(short, long, value_name = "FILE")]
    pub tokens: Option<PathBuf>,

    /// Print the FIRST and FOLLOW sets
    #[arg(long)]
    pub sets: bool,

    /// Print the parsing table
    #[arg(long)]
    pub table: bool,
}
