mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cihui_lib::import::ImportMode;
use cihui_lib::study::StudyMode;

#[derive(Parser)]
#[command(name = "cihui-cli", about = "Vocabulary drills with batch spaced repetition", version)]
struct Cli {
    /// Scheduler config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Import rows whose native text is already present
    #[arg(long, global = true)]
    keep_duplicates: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ModeArg {
    Flip,
    Choice,
    Typed,
}

impl From<ModeArg> for StudyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flip => StudyMode::FlipCard,
            ModeArg::Choice => StudyMode::MultipleChoice,
            ModeArg::Typed => StudyMode::TypedAnswer,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show statistics and categories for a word list
    Stats {
        /// CSV word list (translation, phonetic, native, category)
        words: PathBuf,
    },

    /// Drill a word list, reading one grade per line from stdin
    Drill {
        /// CSV word list (translation, phonetic, native, category)
        words: PathBuf,
        /// Seed shuffling and mode picks for a repeatable drill
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many batches
        #[arg(long, default_value = "1")]
        batches: usize,
        /// Study modes to pick from for each word
        #[arg(long = "mode", value_delimiter = ',', default_values = ["flip", "choice", "typed"])]
        modes: Vec<ModeArg>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mode = if cli.keep_duplicates {
        ImportMode::ImportAll
    } else {
        ImportMode::SkipExisting
    };

    match cli.command {
        Command::Stats { words } => {
            let app = app::App::new(&words, cli.config.as_deref(), mode)?;
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Drill {
            words,
            seed,
            batches,
            modes,
        } => {
            let modes: Vec<StudyMode> = modes.into_iter().map(StudyMode::from).collect();
            let mut app = app::App::new(&words, cli.config.as_deref(), mode)?;
            commands::drill::run(&mut app, seed, batches, &modes, &cli.format)?;
        }
    }

    Ok(())
}
