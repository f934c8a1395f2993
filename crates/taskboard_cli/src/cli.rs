//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_core::LogLevel;

/// Taskboard: projects and todos kept in a local store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the state database and logs [env: TASKBOARD_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error [env: TASKBOARD_LOG_LEVEL]
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all projects with their task counts
    Lists,

    /// Create a project
    AddList {
        name: String,
    },

    /// Delete a project and its tasks (the default project is kept)
    RmList {
        id: u64,
    },

    /// Add a task
    Add(AddArgs),

    /// Show tasks of a project with optional search, filter and sort
    Show(ShowArgs),

    /// Toggle task completion
    Toggle {
        task_id: u64,
        #[command(flatten)]
        target: ListTarget,
    },

    /// Delete a task
    Rm {
        task_id: u64,
        #[command(flatten)]
        target: ListTarget,
    },

    /// Edit task fields; omitted fields are left unchanged
    Edit(EditArgs),

    /// Print version information
    Version,
}

/// Project selection; defaults to the default project.
#[derive(Args, Debug, Default)]
pub struct ListTarget {
    /// Project id
    #[arg(long = "list")]
    pub list: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub title: String,

    #[command(flatten)]
    pub target: ListTarget,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,

    /// low|medium|high
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: ListTarget,

    /// Case-insensitive text matched against title and description
    #[arg(long, default_value = "")]
    pub search: String,

    /// completed|active|overdue
    #[arg(long)]
    pub status: Option<String>,

    /// low|medium|high
    #[arg(long)]
    pub priority: Option<String>,

    /// Comma-separated tags; a task needs any one of them
    #[arg(long, default_value = "")]
    pub tags: String,

    /// dueDate|priority|title|createdAt
    #[arg(long, default_value = "dueDate")]
    pub sort: String,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub task_id: u64,

    #[command(flatten)]
    pub target: ListTarget,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Due date as YYYY-MM-DD; an empty value clears it
    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    /// Comma-separated tags replacing the current set
    #[arg(long)]
    pub tags: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use taskboard_core::LogLevel;

    #[test]
    fn environment_is_left_to_config_resolution() {
        let command = Cli::command();
        for id in ["data_dir", "log_level"] {
            let arg = command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .unwrap();
            assert!(arg.get_env().is_none(), "{id} must not read the environment");
        }
    }

    #[test]
    fn log_level_flag_is_parsed_and_validated() {
        let cli = Cli::try_parse_from(["taskboard", "--log-level", "debug", "lists"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(matches!(cli.command, Command::Lists));

        assert!(Cli::try_parse_from(["taskboard", "--log-level", "loud", "lists"]).is_err());
    }
}
