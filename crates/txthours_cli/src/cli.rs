use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI parser for the `txthours` binary.
#[derive(Debug, Parser)]
#[command(
    name = "txthours",
    version,
    about = "Summarize a txt-hours day log into hours per task per day"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "TXTHOURS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset
    #[arg(long, global = true, env = "TXTHOURS_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print hours per task per day with a totals row
    Summarize(SummarizeArgs),
    /// Validate a day log without printing the table
    Check(InputArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Day log file; `-` or omitted reads stdin
    pub path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format: table or json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summarize_defaults_to_table_and_stdin() {
        let cli = Cli::try_parse_from(["txthours", "summarize"]).unwrap();
        match cli.command {
            Commands::Summarize(args) => {
                assert_eq!(args.format, OutputFormat::Table);
                assert_eq!(args.input.path, None);
            }
            Commands::Check(_) => panic!("expected summarize"),
        }
    }

    #[test]
    fn summarize_accepts_json_and_path() {
        let cli =
            Cli::try_parse_from(["txthours", "summarize", "--format", "json", "day.txt"]).unwrap();
        match cli.command {
            Commands::Summarize(args) => {
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.input.path, Some(PathBuf::from("day.txt")));
            }
            Commands::Check(_) => panic!("expected summarize"),
        }
    }

    #[test]
    fn global_log_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "txthours",
            "check",
            "-",
            "--log-level",
            "debug",
            "--log-dir",
            "/tmp/txthours-logs",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/txthours-logs"));
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["txthours", "summarize", "--format", "csv"]).is_err());
    }
}
