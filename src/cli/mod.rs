//! Command-line interface
//!
//! - `serve`: HTTP API over the conversation service
//! - `ask`: answer one question from the terminal

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

/// Supervisor-routed RAG over a document corpus
#[derive(Debug, Parser)]
#[command(name = "rag-supervisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Send one message and print the reply
    Ask(ask::AskArgs),
}
