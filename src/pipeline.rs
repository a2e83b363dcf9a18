//! End-to-end report runs: load, aggregate, render every metric x map chart.

use crate::aggregate::{group_by_map, sorted_by_agents, GroupedResults, MatchPolicy};
use crate::chart::{self, agent_bands, congestion_bands, metric_values};
use crate::experiment::{Experiment, ExperimentConfig};
use crate::{Error, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Metric field names and the axis labels they are rendered with.
pub const METRICS: [(&str, &str); 5] = [
    ("soc", "Sum of Costs"),
    ("sum_of_loss", "Sum of Loss"),
    ("makespan", "Makespan"),
    ("comp_time", "Computation Time (ms)"),
    ("search_iteration", "Search Iterations"),
];

/// Configuration of a baseline vs no-following comparison run, built once at
/// startup and handed to [run_comparison].
#[derive(Clone, Debug)]
pub struct ComparisonJob {
    pub baseline_dir: PathBuf,
    pub variant_dir: PathBuf,
    pub figure_dir: PathBuf,
    pub match_policy: MatchPolicy,
}

/// Configuration of a single-run congestion report, see [run_congestion].
#[derive(Clone, Debug)]
pub struct CongestionJob {
    pub run_dir: PathBuf,
    pub figure_dir: PathBuf,
    pub match_policy: MatchPolicy,
}

/// Every grouped agent count should come from the configured range; stray
/// counts point at a results file that does not belong to this experiment.
fn warn_unexpected_counts(grouped: &GroupedResults, config: &ExperimentConfig) {
    let expected: Vec<i64> = config.agent_counts().iter().map(|&n| n as i64).collect();
    for (map_name, group) in grouped {
        for key in group.keys() {
            if !expected.contains(&key.num_agents) {
                warn!(
                    "Map {map_name}: agent count {} is outside the configured range",
                    key.num_agents
                );
            }
        }
    }
}

fn chart_path(figure_dir: &Path, metric: &str, map_name: &str) -> Result<PathBuf> {
    let metric_dir = figure_dir.join(metric);
    fs::create_dir_all(&metric_dir)?;
    Ok(metric_dir.join(format!("{map_name}.png")))
}

/// Renders one overlaid bar chart per metric and map from two experiment
/// directories. The two experiments must have been run over the same map
/// list; anything else means the directories are not comparable.
pub fn run_comparison(job: &ComparisonJob) -> Result<()> {
    let baseline = Experiment::load(&job.baseline_dir)?;
    let variant = Experiment::load(&job.variant_dir)?;
    if baseline.config.maps != variant.config.maps {
        return Err(Error::ConfigMismatch {
            left: baseline.config.maps.clone(),
            right: variant.config.maps.clone(),
        });
    }
    let maps = &baseline.config.maps;
    let grouped_baseline = group_by_map(&baseline.records, maps, job.match_policy)?;
    let grouped_variant = group_by_map(&variant.records, maps, job.match_policy)?;
    warn_unexpected_counts(&grouped_baseline, &baseline.config);
    warn_unexpected_counts(&grouped_variant, &variant.config);

    for (metric, label) in METRICS {
        info!("Generating {metric} charts");
        for (map_name, baseline_group) in &grouped_baseline {
            let baseline_sorted = sorted_by_agents(baseline_group);
            let variant_sorted = sorted_by_agents(&grouped_variant[map_name]);

            let baseline_vals = metric_values(&baseline_sorted, metric)?;
            let variant_vals = metric_values(&variant_sorted, metric)?;
            let counts: Vec<i64> = variant_sorted.iter().map(|(k, _)| k.num_agents).collect();
            let bands = agent_bands(&counts);

            let path = chart_path(&job.figure_dir, metric, map_name)?;
            chart::render_comparison(
                &path,
                map_name,
                label,
                &variant_vals,
                &baseline_vals,
                &bands,
            )?;
        }
    }
    Ok(())
}

/// Renders one bar chart per metric and map from a single experiment
/// directory, with bands labeled by the congestion percentage. The open
/// vertex count is taken from the first record of each map in sorted order
/// and must be present in the results table.
pub fn run_congestion(job: &CongestionJob) -> Result<()> {
    let experiment = Experiment::load(&job.run_dir)?;
    let grouped = group_by_map(&experiment.records, &experiment.config.maps, job.match_policy)?;
    warn_unexpected_counts(&grouped, &experiment.config);

    for (metric, label) in METRICS {
        info!("Generating {metric} charts");
        for (map_name, group) in &grouped {
            let sorted = sorted_by_agents(group);
            let values = metric_values(&sorted, metric)?;
            let counts: Vec<i64> = sorted.iter().map(|(k, _)| k.num_agents).collect();
            let bands = match sorted.first() {
                Some((_, record)) => {
                    let num_open_vertices = record.int("num_open_vertices")?;
                    congestion_bands(&counts, num_open_vertices)
                }
                None => Vec::new(),
            };

            let path = chart_path(&job.figure_dir, metric, map_name)?;
            chart::render_single(&path, map_name, label, &values, &bands)?;
        }
    }
    Ok(())
}
