use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::db::DEFAULT_FILE;

/// Simple, file-backed task tracker.
/// Storage defaults to ./tasks.csv or a path passed via --file.
#[derive(Parser)]
#[command(name = "tasktrack", version, about = "Task tracker with a terminal dashboard")]
pub struct Cli {
    /// Path to the CSV task file.
    #[arg(long, global = true, env = "TASKTRACK_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Write logs to this file.
    #[arg(long, global = true, env = "TASKTRACK_LOG")]
    pub log_file: Option<PathBuf>,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["tasktrack"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, PathBuf::from(DEFAULT_FILE));
    }

    #[test]
    fn test_add_arguments() {
        let cli = Cli::try_parse_from([
            "tasktrack", "--file", "x.csv", "add", "Pay bills", "--expiry", "2024-01-01",
            "--priority", "high",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("x.csv"));
        match cli.command {
            Some(Commands::Add { name, priority, expiry }) => {
                assert_eq!(name, "Pay bills");
                assert_eq!(priority, crate::fields::Priority::High);
                assert_eq!(expiry, "2024-01-01");
            }
            _ => panic!("expected add"),
        }
    }
}
