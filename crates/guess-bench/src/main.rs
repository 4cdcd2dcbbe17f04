use std::path::PathBuf;

use clap::Parser;

use guess_bench::config::{ResolvedOutputs, SimConfig};
use guess_bench::logging::init_logging;
use guess_bench::runner::SimRunner;

/// Simulation harness for the guessing-game inference engine.
#[derive(Debug, Parser)]
#[command(
    name = "guess-bench",
    author,
    version,
    about = "Deterministic guessing-game simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for game generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the answerer's "don't know" probability.
    #[arg(long, value_name = "RATE")]
    dont_know_rate: Option<f64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(rate) = cli.dont_know_rate {
        config.answerer.dont_know_rate = rate;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;

    println!(
        "Loaded configuration '{run_id}' ({games} game{}, catalog {})",
        if games == 1 { "" } else { "s" },
        config.catalog.display()
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {}/{} solved in {:.2} ± {:.2} turns → {} rows at {}",
        summary.solved,
        summary.games_played,
        summary.mean_turns,
        summary.turns_std_dev,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Structured log: {}", guard.log_path.display());
    }

    Ok(())
}
