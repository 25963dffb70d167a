//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tunekit",
    about = "Chain compilers and profilers into one performance-tuning pipeline",
    after_help = "\
EXAMPLES:
    tunekit -m make                          Build only
    tunekit -m make -o make,target=all       Build a specific target
    tunekit -m make --export report.json     Write the run report as JSON"
)]
pub struct Args {
    /// Module to load; repeat for each module, in order
    #[arg(short, long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Module option as NAME,KEY=VALUE (e.g. make,target=all)
    #[arg(short, long = "option", value_name = "NAME,OPT")]
    pub options: Vec<String>,

    /// Export the run report as JSON
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
