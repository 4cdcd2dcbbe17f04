use std::fs;
use std::path::Path;

use guess_bench::config::SimConfig;
use guess_bench::runner::SimRunner;
use sha2::{Digest, Sha256};
use tempfile::tempdir;

const CATALOG: &str = r#"{
    "version": "1.34.0",
    "items": [
        {"id": "block-picker", "name": "Block Picker", "tags": ["codeEditor"], "credits": [{"name": "ada"}]},
        {"id": "mute-button", "name": "Mute Button", "tags": ["projectPlayer"], "versionAdded": "1.33.2"},
        {"id": "forum-toolkit", "name": "Forum Toolkit", "tags": ["forums"], "settings": true},
        {"id": "dark-www", "name": "Dark Website", "tags": ["theme"], "settings": true, "presets": true},
        {"id": "confetti", "name": "Confetti", "tags": ["easterEgg"], "secret": true}
    ]
}"#;

fn load_config(catalog: &Path, output_dir: &Path) -> SimConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
catalog: "{catalog}"
games:
  count: 4
  seed: 4242
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
answerer:
  dont_know_rate: 0.1
logging:
  enable_structured: false
"#,
        catalog = catalog.display(),
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display()
    );

    let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_once(catalog: &Path, output_dir: &Path) -> String {
    let config = load_config(catalog, output_dir);
    let outputs = config.resolved_outputs();
    let runner = SimRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("simulation completes");

    assert_eq!(summary.games_played, 4);
    assert_eq!(summary.rows_written, 4);
    assert!(summary.summary_path.exists(), "summary markdown missing");

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let mut hasher = Sha256::new();
    hasher.update(jsonl.as_bytes());
    hex::encode(hasher.finalize())
}

#[test]
fn simulation_smoke_test_produces_stable_jsonl_hash() {
    let dir = tempdir().expect("temp dir");
    let catalog_path = dir.path().join("catalog.json");
    fs::write(&catalog_path, CATALOG).expect("catalog written");

    let first_dir = dir.path().join("first");
    let second_dir = dir.path().join("second");

    let first = run_once(&catalog_path, &first_dir);
    let second = run_once(&catalog_path, &second_dir);

    assert_eq!(
        first, second,
        "same seed must replay the exact same JSONL output"
    );
}
