//! Simulation driver: plays whole games against a scripted answerer and
//! streams per-game JSONL rows plus a Markdown summary to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use guess_bot::{Answer, EngineParams, Session, Turn};
use guess_core::{Catalog, CatalogError, QuestionIndex, compile};
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimConfig};

/// Bounds the reject loop when the answerer's noise keeps the engine
/// guessing wrong items.
const MAX_REJECTS_PER_GAME: usize = 64;

/// Primary entry point for orchestrating simulation runs.
#[derive(Debug)]
pub struct SimRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    index: QuestionIndex,
    item_ids: Vec<String>,
    params: EngineParams,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub solved: usize,
    pub rows_written: usize,
    pub mean_turns: f64,
    pub turns_std_dev: f64,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_index: usize,
    game_seed: u64,
    target: &'a str,
    guessed: Option<&'a str>,
    solved: bool,
    turns: u32,
    rejects: usize,
    outcome: &'a str,
}

struct GameOutcome {
    target: String,
    guessed: Option<String>,
    solved: bool,
    turns: u32,
    rejects: usize,
    outcome: &'static str,
}

impl SimRunner {
    /// Build a runner from a validated configuration, compiling the catalog
    /// up front so every game shares one read-only index.
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let raw = fs::read_to_string(&config.catalog).map_err(|source| RunnerError::Catalog {
            path: config.catalog.clone(),
            source: CatalogError::Io(source),
        })?;
        let catalog = Catalog::from_json_str(&raw).map_err(|source| RunnerError::Catalog {
            path: config.catalog.clone(),
            source,
        })?;

        let item_ids = catalog
            .items()
            .iter()
            .map(|item| item.id.clone())
            .collect();
        let index = compile(&catalog);

        Ok(Self {
            config,
            outputs,
            index,
            item_ids,
            params: EngineParams::from_env(),
        })
    }

    /// Execute every configured game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut solved = 0usize;
        let mut turn_counts: Vec<f64> = Vec::with_capacity(self.config.games.count);

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let target = self.item_ids[rng.gen_range(0..self.item_ids.len())].clone();
            let outcome = self.play_game(game_seed, target);

            if outcome.solved {
                solved += 1;
            }
            turn_counts.push(f64::from(outcome.turns));

            event!(
                target: "guess_bench::runner",
                Level::INFO,
                game_index,
                game_seed,
                target = outcome.target.as_str(),
                outcome = outcome.outcome,
                turns = outcome.turns,
            );

            let row = GameLogRow {
                run_id: &self.config.run_id,
                game_index,
                game_seed,
                target: &outcome.target,
                guessed: outcome.guessed.as_deref(),
                solved: outcome.solved,
                turns: outcome.turns,
                rejects: outcome.rejects,
                outcome: outcome.outcome,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        writer.flush()?;

        let mean_turns = if turn_counts.is_empty() {
            0.0
        } else {
            turn_counts.iter().mean()
        };
        let turns_std_dev = if turn_counts.len() > 1 {
            turn_counts.iter().std_dev()
        } else {
            0.0
        };

        let summary = RunSummary {
            games_played: self.config.games.count,
            solved,
            rows_written,
            mean_turns,
            turns_std_dev,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        };
        self.write_markdown(&summary)?;

        Ok(summary)
    }

    /// Plays one game to completion with an answerer that knows the target.
    /// Answers are honest except for a configurable "don't know" rate.
    fn play_game(&self, game_seed: u64, target: String) -> GameOutcome {
        let mut session = Session::new(&self.index, self.params, game_seed);
        let mut answer_rng = StdRng::seed_from_u64(game_seed ^ 0x5eed_ba5e_u64);
        let mut rejects = 0usize;

        loop {
            match session.next_turn() {
                Turn::Ask { id, .. } => {
                    let answer = if self.config.answerer.dont_know_rate > 0.0
                        && answer_rng.gen_bool(self.config.answerer.dont_know_rate)
                    {
                        Answer::DontKnow
                    } else if self
                        .index
                        .entry(&target)
                        .is_some_and(|entry| entry.has_candidate(&id))
                    {
                        Answer::Yes
                    } else {
                        Answer::No
                    };
                    if session.answer(answer).is_err() {
                        return self.finish(target, None, rejects, &session, "stalled");
                    }
                }
                Turn::Guess { item_id, .. } => {
                    if item_id == target {
                        return self.finish(target, Some(item_id), rejects, &session, "solved");
                    }
                    rejects += 1;
                    if rejects >= MAX_REJECTS_PER_GAME || session.reject_guess().is_err() {
                        return self.finish(target, Some(item_id), rejects, &session, "exhausted");
                    }
                }
                Turn::Defeat => {
                    return self.finish(target, None, rejects, &session, "defeat");
                }
            }
        }
    }

    fn finish(
        &self,
        target: String,
        guessed: Option<String>,
        rejects: usize,
        session: &Session<'_>,
        outcome: &'static str,
    ) -> GameOutcome {
        GameOutcome {
            solved: outcome == "solved",
            turns: session.turns(),
            target,
            guessed,
            rejects,
            outcome,
        }
    }

    fn write_markdown(&self, summary: &RunSummary) -> Result<(), RunnerError> {
        let mut out = String::new();
        out.push_str(&format!("# Simulation run `{}`\n\n", self.config.run_id));
        out.push_str(&format!(
            "- Catalog: `{}` ({} items, {} distinct questions)\n",
            self.config.catalog.display(),
            self.item_ids.len(),
            self.index.distinct_question_count(),
        ));
        out.push_str(&format!(
            "- Games: {} (seed {})\n",
            summary.games_played,
            self.config.games.seed.unwrap_or(0)
        ));
        out.push_str(&format!(
            "- Don't-know rate: {:.2}\n\n",
            self.config.answerer.dont_know_rate
        ));
        out.push_str("| Metric | Value |\n|---|---|\n");
        out.push_str(&format!(
            "| Solved | {} / {} |\n",
            summary.solved, summary.games_played
        ));
        out.push_str(&format!("| Mean turns | {:.2} |\n", summary.mean_turns));
        out.push_str(&format!(
            "| Turns std dev | {:.2} |\n",
            summary.turns_std_dev
        ));
        fs::write(&self.outputs.summary_md, out)?;
        Ok(())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to load catalog at {path}: {source}")]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::{RunnerError, SimRunner};
    use crate::config::SimConfig;
    use std::fs;

    const CATALOG: &str = r#"{
        "version": "1.0.0",
        "items": [
            {"id": "pick", "name": "Block Picker", "tags": ["codeEditor"]},
            {"id": "dark", "name": "Dark Website", "tags": ["theme"]},
            {"id": "forum", "name": "Forum Toolkit", "tags": ["forums"], "settings": true}
        ]
    }"#;

    fn config_yaml(dir: &std::path::Path) -> String {
        format!(
            r#"
run_id: unit
catalog: {catalog}
games:
  count: 3
  seed: 7
outputs:
  jsonl: {dir}/{{run_id}}.jsonl
  summary_md: {dir}/{{run_id}}.md
"#,
            catalog = dir.join("catalog.json").display(),
            dir = dir.display(),
        )
    }

    #[test]
    fn missing_catalog_is_a_catalog_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let yaml_path = dir.path().join("sim.yaml");
        fs::write(&yaml_path, config_yaml(dir.path())).expect("write config");

        let mut config = SimConfig::from_path(&yaml_path).expect("parse config");
        config.validate().expect("valid config");
        let outputs = config.resolved_outputs();

        let err = SimRunner::new(config, outputs).expect_err("catalog file absent");
        assert!(matches!(err, RunnerError::Catalog { .. }));
    }

    #[test]
    fn honest_games_solve_and_log_one_row_each() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("catalog.json"), CATALOG).expect("write catalog");
        let yaml_path = dir.path().join("sim.yaml");
        fs::write(&yaml_path, config_yaml(dir.path())).expect("write config");

        let mut config = SimConfig::from_path(&yaml_path).expect("parse config");
        config.validate().expect("valid config");
        let outputs = config.resolved_outputs();

        let runner = SimRunner::new(config, outputs).expect("runner builds");
        let summary = runner.run().expect("run succeeds");

        assert_eq!(summary.games_played, 3);
        assert_eq!(summary.rows_written, 3);
        assert!(summary.mean_turns > 0.0);

        let rows = fs::read_to_string(&summary.jsonl_path).expect("jsonl exists");
        assert_eq!(rows.lines().count(), 3);
        assert!(summary.summary_path.exists());
    }
}
