use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "megaverse")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Reconcile a Crossmint megaverse map against its goal state", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Candidate id used in every API call
    #[arg(long, env = "CM_CANDIDATE_ID", global = true)]
    pub candidate_id: Option<String>,

    /// Base URL of the megaverse API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create every entity the goal map declares
    Build(BuildArgs),

    /// Delete every entity the goal map declares
    Reset(ResetArgs),

    /// Fetch and display the goal map
    Goal,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Only build this row (0-indexed)
    #[arg(short, long)]
    pub row: Option<usize>,
}

#[derive(Parser)]
pub struct ResetArgs {
    /// Only reset this row (0-indexed)
    #[arg(short, long)]
    pub row: Option<usize>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}
