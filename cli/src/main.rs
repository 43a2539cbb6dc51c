mod commands;
mod config;
mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{cmd_add, cmd_list, cmd_plot, cmd_reset};
use crate::config::Config;
use sugarlog_core::service::SugarService;

#[derive(Parser)]
#[command(
    name = "sugarlog",
    version,
    about = "A simple blood sugar tracker",
    long_about = "Record blood sugar readings by date and time, list them in order, and chart them.\n\
                  Run without a subcommand to open the interactive entry form."
)]
struct Cli {
    /// Database file (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive entry form (default)
    App,
    /// Add a reading, replacing any reading at the same date and time
    Add {
        /// Date (MM-DD-YYYY)
        date: String,
        /// Time (HH:MM, 24-hour)
        time: String,
        /// Blood sugar level in mg/dL
        #[arg(allow_hyphen_values = true)]
        level: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all readings, oldest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Chart all readings over time
    Plot {
        /// Print the chart data as JSON instead of drawing it
        #[arg(long)]
        json: bool,
    },
    /// Erase every stored reading
    Reset {
        /// Confirm the erase
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, None | Some(Commands::App | Commands::Plot { json: false })));

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Logs go to stderr, except while a full-screen view owns the terminal.
fn init_logging(fullscreen: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if fullscreen {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db)?;
    let svc = SugarService::new(&config.db_path)
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;

    match cli.command.unwrap_or(Commands::App) {
        Commands::App => shell::run(svc),
        Commands::Add {
            date,
            time,
            level,
            json,
        } => cmd_add(&svc, &date, &time, &level, json),
        Commands::List { json } => cmd_list(&svc, json),
        Commands::Plot { json } => cmd_plot(&svc, json),
        Commands::Reset { yes, json } => cmd_reset(&svc, yes, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_app() {
        let cli = Cli::try_parse_from(["sugarlog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.db.is_none());
    }

    #[test]
    fn test_cli_add_args() {
        let cli = Cli::try_parse_from([
            "sugarlog",
            "--db",
            "/tmp/x.db",
            "add",
            "03-01-2024",
            "08:00",
            "95",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        match cli.command {
            Some(Commands::Add {
                date, time, level, ..
            }) => {
                assert_eq!(date, "03-01-2024");
                assert_eq!(time, "08:00");
                assert_eq!(level, "95");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_cli_global_db_after_subcommand() {
        let cli = Cli::try_parse_from(["sugarlog", "list", "--db", "r.db", "--json"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("r.db")));
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }

    #[test]
    fn test_cli_add_requires_three_fields() {
        assert!(Cli::try_parse_from(["sugarlog", "add", "03-01-2024", "08:00"]).is_err());
    }
}
