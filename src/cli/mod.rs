//! CLI module for the multi-hop QA pipeline
//!
//! Provides subcommands for the two ways to run the system:
//! - `evaluate`: scored batch run over a dataset split
//! - `ask`: answer a single question from the command line

pub mod ask;
pub mod evaluate;

use clap::{Parser, Subcommand};

/// Multi-hop web QA - search-grounded question answering
#[derive(Parser)]
#[command(name = "pmp-multihop-qa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate the pipeline against a dataset split
    Evaluate(evaluate::EvaluateArgs),

    /// Answer a single question
    Ask(ask::AskArgs),
}
