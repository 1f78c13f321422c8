//! Headless simulator: plays seeded games with the greedy agent and reports
//! score and dealer statistics.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use block_blast::agent::{play_game, GameReport, Summary};
use block_blast::{GeneratorConfig, SearchMode};
use clap::Parser;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "autoplay")]
#[command(about = "Play block-blast games with a greedy agent and report statistics")]
struct Cli {
    /// Number of games, seeded `seed`, `seed + 1`, ...
    #[arg(long, default_value_t = 100)]
    games: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Placement cap per game.
    #[arg(long, default_value_t = 5_000)]
    max_moves: u32,
    /// Generator tuning as JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backtracking feasibility search instead of first fit.
    #[arg(long, default_value_t = false)]
    exhaustive: bool,
    /// Reject sets that leave an isolated empty cell.
    #[arg(long, default_value_t = false)]
    island_gate: bool,
    /// Print every game report as a JSON line.
    #[arg(long, default_value_t = false)]
    per_game: bool,
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config: GeneratorConfig = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };
    if cli.exhaustive {
        config.search_mode = SearchMode::Exhaustive;
    }
    if cli.island_gate {
        config.island_gate = true;
    }
    Ok(config)
}

#[cfg(feature = "rayon")]
fn run_games(seeds: Vec<u64>, config: &GeneratorConfig, max_moves: u32) -> Result<Vec<GameReport>> {
    seeds
        .into_par_iter()
        .map(|seed| play_game(seed, config, max_moves).with_context(|| format!("seed {seed}")))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn run_games(seeds: Vec<u64>, config: &GeneratorConfig, max_moves: u32) -> Result<Vec<GameReport>> {
    seeds
        .into_iter()
        .map(|seed| play_game(seed, config, max_moves).with_context(|| format!("seed {seed}")))
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let seeds: Vec<u64> = (cli.seed..cli.seed.saturating_add(cli.games)).collect();
    let reports = run_games(seeds, &config, cli.max_moves)?;

    if cli.per_game {
        for report in &reports {
            println!("{}", serde_json::to_string(report)?);
        }
    }

    let summary = Summary::from_reports(&reports);
    let capped = reports.iter().filter(|r| !r.finished).count();
    println!("games:          {}", summary.games);
    println!("mean score:     {:.1}", summary.mean_score);
    println!("max score:      {}", summary.max_score);
    println!("mean moves:     {:.1}", summary.mean_placements);
    println!("puzzle sets:    {}", summary.puzzle_sets);
    println!("perfect clears: {}", summary.perfect_clears);
    if capped > 0 {
        println!("hit move cap:   {capped}");
    }
    Ok(())
}
