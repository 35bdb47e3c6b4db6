//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "nlmake",
    version,
    about = "Natural-language command shell for make targets",
    long_about = "Describe what you want in plain language and nlmake maps it onto \
your Makefile targets, asks when it is unsure, and delegates multi-step \
work to specialist agents.\n\n\
Examples:\n  \
nlmake run \"build the project\"\n  \
nlmake agent \"add a lint target and fix the warnings\"\n  \
nlmake tdd \"add a divide function to the calculator\"\n  \
nlmake                      # interactive session"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to an explicit config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore all config files and use built-in defaults
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Pre-approve specialist dispatch and TDD gates
    /// (suggested CLI corrections always ask)
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interpret a request and run the matching target
    Run {
        /// The natural-language request
        #[arg(required = true, value_name = "REQUEST", num_args = 1..)]
        request: Vec<String>,
    },

    /// Delegate a multi-step goal to specialist agents
    Agent {
        /// The goal to decompose
        #[arg(required = true, value_name = "GOAL", num_args = 1..)]
        goal: Vec<String>,
    },

    /// Drive a coding goal through the red/green/refactor cycle
    Tdd {
        /// The coding goal
        #[arg(required = true, value_name = "GOAL", num_args = 1..)]
        goal: Vec<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file locations being used
    Path,
}
