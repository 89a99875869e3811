use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::task::{Filter, TaskId};

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] tickoff v", env!("CARGO_PKG_VERSION"), " - tasks with due dates"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: $TICKOFF_DIR or ~/.tickoff)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, sorted by due date
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Toggle a task between pending and completed
    #[command(visible_alias = "done")]
    Toggle(IdArgs),
    /// Change a task's text (prompts when TEXT is omitted)
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Delete every task
    Clear(ClearArgs),
    /// Print the effective configuration
    Config,
    /// View or clear the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FilterArg {
    All,
    Pending,
    Completed,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Pending => Filter::Pending,
            FilterArg::Completed => Filter::Completed,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, short, value_enum, default_value = "all")]
    pub filter: FilterArg,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    pub text: String,
    /// Due date: YYYY-MM-DD, today or tomorrow
    #[arg(long, short)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID (see `tk list`)
    pub id: TaskId,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID (see `tk list`)
    pub id: TaskId,
    /// New text
    pub text: Option<String>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show only the N most recent entries
    #[arg(long)]
    pub limit: Option<usize>,
    /// Delete the recovery log
    #[arg(long)]
    pub clear: bool,
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
    fn parses_add_with_date() {
        let cli = Cli::try_parse_from(["tk", "add", "Buy milk", "--date", "today"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.text, "Buy milk");
                assert_eq!(args.date.as_deref(), Some("today"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn done_is_an_alias_for_toggle() {
        let cli = Cli::try_parse_from(["tk", "done", "42"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Toggle(IdArgs { id: 42 }))));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tk", "list", "--filter", "pending", "--json", "-C", "/tmp/x"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(Filter::from(args.filter), Filter::Pending)
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tk"]).unwrap();
        assert!(cli.command.is_none());
    }
}
