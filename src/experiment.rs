//! Loading of experiment directories: `config.yaml` and `result.csv`.

use crate::record::{normalize_rows, RunRecord};
use crate::{Error, Result};
use csv::ReaderBuilder;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Experiment configuration as written by the MAPF harness. The agent-count
/// range is inclusive on both ends.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExperimentConfig {
    pub maps: Vec<String>,
    pub num_min_agents: usize,
    pub num_max_agents: usize,
    pub num_interval_agents: usize,
}

impl ExperimentConfig {
    /// Materializes the configured agent counts, e.g. min 10, max 30,
    /// interval 10 gives `[10, 20, 30]`.
    pub fn agent_counts(&self) -> Vec<usize> {
        (self.num_min_agents..=self.num_max_agents)
            .step_by(self.num_interval_agents)
            .collect()
    }
}

/// One loaded experiment directory: its configuration and the normalized
/// result records, in file order.
#[derive(Clone, Debug)]
pub struct Experiment {
    pub config: ExperimentConfig,
    pub records: Vec<RunRecord>,
}

impl Experiment {
    pub fn load(dir: &Path) -> Result<Experiment> {
        let config = read_config(&dir.join("config.yaml"))?;
        let records = read_results(&dir.join("result.csv"))?;
        info!(
            "Loaded {} records for {} maps from {}",
            records.len(),
            config.maps.len(),
            dir.display()
        );
        Ok(Experiment { config, records })
    }
}

fn read_config(path: &Path) -> Result<ExperimentConfig> {
    let content = fs::read_to_string(path)?;
    let config: ExperimentConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Reads the results table. The header row is handled explicitly rather than
/// via serde so that records carry whatever field names the harness wrote.
fn read_results(path: &Path) -> Result<Vec<RunRecord>> {
    let content = fs::read_to_string(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push(row.iter().map(|cell| cell.to_owned()).collect());
    }
    if rows.is_empty() {
        return Err(Error::EmptyTable {
            path: path.display().to_string(),
        });
    }
    let header = rows.remove(0);
    Ok(normalize_rows(&header, &rows))
}
