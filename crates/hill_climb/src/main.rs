//! Hill-climb CLI
//!
//! Plays greedy moves from a position and prints the trace.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chess_core::Engine;
use clap::{ArgAction, Parser, ValueEnum};
use greedy_engine::{GreedyEngine, PawnRules};
use hill_climb::{DriverConfig, run_game};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RulesArg {
    Legacy,
    Corrected,
}

impl From<RulesArg> for PawnRules {
    fn from(r: RulesArg) -> Self {
        match r {
            RulesArg::Legacy => PawnRules::Legacy,
            RulesArg::Corrected => PawnRules::Corrected,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "hill_climb",
    about = "Play one-ply greedy moves from a FEN position"
)]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Number of moves to play, both sides counted
    #[arg(long, short = 'n')]
    moves: Option<u32>,

    /// Pawn-structure rules for the evaluation
    #[arg(long, value_enum)]
    rules: Option<RulesArg>,

    /// Optional: write the game trace as JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn apply(&self, config: &mut DriverConfig) {
        if let Some(fen) = &self.fen {
            config.fen = fen.clone();
        }
        if let Some(moves) = self.moves {
            config.moves = moves;
        }
        if let Some(rules) = self.rules {
            config.eval.rules = rules.into();
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => DriverConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DriverConfig::default(),
    };
    args.apply(&mut config);

    let mut pos = config.start_position().context("setting up the start position")?;
    let mut engine = GreedyEngine::new(config.eval.clone());
    info!(
        engine = engine.name(),
        rules = ?config.eval.rules,
        moves = config.moves,
        "starting"
    );

    let stdout = io::stdout();
    let trace = run_game(&mut pos, &mut engine, config.moves, &mut stdout.lock())?;

    if let Some(path) = &args.json_out {
        trace
            .save_json(path)
            .with_context(|| format!("writing trace to {}", path.display()))?;
        info!(path = %path.display(), "trace written");
    }
    Ok(())
}
