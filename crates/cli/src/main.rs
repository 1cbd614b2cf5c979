//! Seqbench CLI
//!
//! Command-line interface for recording benchmark submissions and viewing
//! leaderboards, histories and exports.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use seqbench_application::DEFAULT_EXPORT_FILE;
use seqbench_cli::commands::{
    config, datasets, evaluate, export, history, leaderboard, submit, CommandContext,
};
use seqbench_cli::error::{exit_code, is_no_data};
use seqbench_cli::output::{colors, OutputFormat};
use seqbench_cli::{Overrides, Settings};
use seqbench_common::telemetry::init_tracing;

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "seqbench")]
#[command(author, version, about = "Benchmark submission ledger")]
#[command(long_about = "Record evaluated benchmark submissions and report on them.\n\n\
    Submissions are stored as JSON files under <root>/<dataset>/<fold>/<user>/.")]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the submission ledger (overrides config)
    #[arg(long, global = true, env = "SEQBENCH_ROOT")]
    root: Option<PathBuf>,

    /// Directory holding the dataset tables (overrides config)
    #[arg(long, global = true, env = "SEQBENCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, global = true, value_enum)]
    format: Option<CliOutputFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the leaderboard of a dataset fold
    #[command(alias = "lb")]
    Leaderboard {
        /// Dataset name
        #[arg(long)]
        dataset: String,

        /// Fold identifier
        #[arg(long)]
        fold: String,
    },

    /// Show a user's submission history
    History {
        /// Dataset name
        #[arg(long)]
        dataset: String,

        /// Fold identifier
        #[arg(long)]
        fold: String,

        /// User identifier
        #[arg(long)]
        user: String,
    },

    /// Export all submissions to CSV
    Export {
        /// Output CSV file
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },

    /// Evaluate a predictions file and record the submission
    Submit {
        /// Dataset name
        #[arg(long)]
        dataset: String,

        /// Fold identifier
        #[arg(long)]
        fold: String,

        /// User identifier
        #[arg(long)]
        user: String,

        /// CSV with a `labels` column (and optionally `id`)
        #[arg(short, long)]
        predictions: PathBuf,

        /// Submission name
        #[arg(short, long)]
        name: Option<String>,

        /// Submission description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Evaluate a predictions file without recording it
    Evaluate {
        /// Dataset name
        #[arg(long)]
        dataset: String,

        /// Fold identifier
        #[arg(long)]
        fold: String,

        /// CSV with a `labels` column (and optionally `id`)
        #[arg(short, long)]
        predictions: PathBuf,
    },

    /// Dataset commands
    Datasets {
        #[command(subcommand)]
        command: DatasetCommands,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum DatasetCommands {
    /// List the builtin datasets
    List,
    /// Describe one dataset
    Describe {
        /// Dataset id
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "seqbench", &mut std::io::stdout());
}

fn execute(ctx: &CommandContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Leaderboard { dataset, fold } => leaderboard::show(ctx, &dataset, &fold),
        Commands::History { dataset, fold, user } => history::show(ctx, &dataset, &fold, &user),
        Commands::Export { output } => export::run(ctx, &output).map(|_| ()),
        Commands::Submit {
            dataset,
            fold,
            user,
            predictions,
            name,
            description,
        } => submit::run(
            ctx,
            &submit::SubmitArgs {
                dataset: &dataset,
                fold: &fold,
                user: &user,
                predictions: &predictions,
                name: name.as_deref(),
                description: description.as_deref(),
            },
        ),
        Commands::Evaluate {
            dataset,
            fold,
            predictions,
        } => evaluate::run(ctx, &dataset, &fold, &predictions),
        Commands::Datasets { command } => match command {
            DatasetCommands::List => datasets::list(ctx),
            DatasetCommands::Describe { id } => datasets::describe(ctx, &id),
        },
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => config::show(ctx),
        },
        Commands::Completions { .. } => {
            // Handled before configuration is loaded
            Ok(())
        }
    }
}

fn report_error(err: &anyhow::Error, verbose: bool) {
    if is_no_data(err) {
        eprintln!("{}", colors::warning(&err.to_string()));
        return;
    }
    eprintln!("{} {:#}", colors::error("Error:"), err);
    if verbose {
        eprintln!("\nDetails:\n{:?}", err);
    }
}

fn main() {
    // Usage errors exit with status 2
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Handle completions command early (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return;
    }

    let overrides = Overrides {
        root: cli.root.clone(),
        data_dir: cli.data_dir.clone(),
        format: cli.format.map(Into::into),
        no_color: cli.no_color,
        verbose: cli.verbose,
    };
    let settings = match Settings::resolve(cli.config.as_deref(), overrides) {
        Ok(settings) => settings,
        Err(e) => {
            let err = anyhow::Error::new(e);
            report_error(&err, cli.verbose);
            std::process::exit(exit_code(&err));
        }
    };

    if !settings.colored {
        colored::control::set_override(false);
    }

    if let Err(e) = init_tracing(settings.config.telemetry.json_logging, settings.log_level()) {
        eprintln!("{} {:#}", colors::warning("Warning:"), e);
    }

    let ctx = CommandContext::new(settings);
    if let Err(e) = execute(&ctx, cli.command) {
        report_error(&e, cli.verbose);
        std::process::exit(exit_code(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_leaderboard() {
        let cli = Cli::try_parse_from([
            "seqbench",
            "--root",
            "/tmp/ledger",
            "leaderboard",
            "--dataset",
            "RNA/translation-efficiency-muscle",
            "--fold",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/ledger")));
        assert!(matches!(cli.command, Commands::Leaderboard { ref fold, .. } if fold == "0"));
    }

    #[test]
    fn test_export_default_output() {
        let cli = Cli::try_parse_from(["seqbench", "export"]).unwrap();
        match cli.command {
            Commands::Export { output } => assert_eq!(output, PathBuf::from("benchmark_export.csv")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_argument_is_usage_error() {
        let err = Cli::try_parse_from(["seqbench", "history", "--dataset", "d", "--fold", "0"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
