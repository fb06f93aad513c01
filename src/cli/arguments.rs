use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Units, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Arguments {
    #[clap(subcommand)]
    pub command: Command,
    /// The settings file to use
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// The language to ask and answer in, overrides the settings
    #[arg(short, long, global = true)]
    pub lang: Option<String>,
    /// The unit system for answers, overrides the settings
    #[arg(short, long, global = true, value_enum)]
    pub units: Option<Units>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a single question
    Ask(QueryCommand),
    /// Ask questions until you quit
    Interactive,
    /// Email yourself the source of the last answer
    Sources,
    /// Print the unprocessed full results of a query
    Raw(QueryCommand),
    /// Find a title and an image for a query
    Visual(QueryCommand),
}

#[derive(Debug, Args)]
pub struct QueryCommand {
    #[arg(required(true))]
    /// What to ask, quotes are optional
    pub words: Vec<String>,
}

impl QueryCommand {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}
