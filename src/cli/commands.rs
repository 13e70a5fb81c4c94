use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::TaskId;

#[derive(Parser)]
#[command(name = "taskdeck", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - tasks from your task API, in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the task API (overrides config and TASKDECK_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Read config from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks
    List,
    /// Show one task
    Show(IdArgs),
    /// Create a task
    Add(AddArgs),
    /// Change a task's title and/or description
    Edit(EditArgs),
    /// Flip a task between open and completed
    Toggle(IdArgs),
    /// Delete a task (asks first)
    Rm(RmArgs),
    /// Check that the API is reachable
    Ping,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: TaskId,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: TaskId,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: TaskId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "taskdeck",
            "rm",
            "7",
            "--yes",
            "--api-url",
            "http://x/api",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        match cli.command {
            Some(Commands::Rm(args)) => {
                assert_eq!(args.id, TaskId::Number(7));
                assert!(args.yes);
            }
            _ => panic!("expected rm"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["taskdeck"]).unwrap();
        assert!(cli.command.is_none());
    }
}
