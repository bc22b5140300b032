//! CLI frontend for Limit Quiz: author multiple-choice limit questions and
//! play them in the terminal.

mod commands;
mod config;
mod logging;
mod present;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(
    name = "lq",
    about = "Limit Quiz: write and play multiple-choice questions about limits",
    version,
    propagate_version = true
)]
struct Cli {
    /// Question file (default: `store` from lq.toml, else questions.json)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Configuration file (default: ./lq.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a question to the bank
    Add(commands::add::AddArgs),

    /// List all questions
    List,

    /// Show one question in detail
    Show {
        /// Question number, as printed by `list`
        number: usize,

        /// Reveal the correct answer
        #[arg(short, long)]
        reveal: bool,
    },

    /// Delete a question
    Remove {
        /// Question number, as printed by `list`
        number: usize,
    },

    /// Play through every question on the command line
    Play,

    /// Render an expression and tabulate its approach to a point
    Preview {
        /// Expression in one variable, e.g. "sin(x)/x"
        expression: String,

        /// Limit point, e.g. 0, pi/2, inf
        #[arg(short, long, default_value = "0")]
        point: String,

        /// Approach side: none, left, right
        #[arg(long, default_value = "none")]
        side: String,
    },

    /// Launch the interactive terminal UI
    Tui {
        /// Seed for the mascot tips
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::load(cli.config.as_deref())?.with_store(cli.store);

    // The TUI owns the terminal, so its log goes to a file.
    if matches!(cli.command, Commands::Tui { .. }) {
        logging::init_file(&config.log_path(), cli.verbose)?;
    } else {
        logging::init_stderr(cli.verbose);
    }
    tracing::debug!(
        config = ?cli.config,
        store = %config.store.display(),
        "resolved configuration"
    );

    match cli.command {
        Commands::Add(args) => commands::add::run(&config, &args),
        Commands::List => commands::list::run(&config),
        Commands::Show { number, reveal } => commands::show::run(&config, number, reveal),
        Commands::Remove { number } => commands::remove::run(&config, number),
        Commands::Play => commands::play::run(&config),
        Commands::Preview {
            expression,
            point,
            side,
        } => commands::preview::run(&config, &expression, &point, &side),
        Commands::Tui { seed } => tui::run(&config.with_seed(seed)),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
