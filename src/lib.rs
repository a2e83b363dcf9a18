//! # mapf_plot
//!
//! Aggregates results from a multi-agent pathfinding (MAPF) experiment
//! harness and renders per-map bar charts (PNG) for performance metrics such
//! as sum of costs, makespan, computation time and search iterations. An
//! experiment directory holds a `config.yaml` (map list and agent-count
//! range) and a `result.csv` (one row per solver run); see [Experiment].
//! Records are grouped per map by `(scenario, agent count)` key and drawn as
//! edge-to-edge bars with shaded background bands per agent-count group.
//!
//! Two front-ends build on the same pipeline: `follow_comparison` overlays a
//! baseline run with a no-following variant, while `congestion_report` labels
//! the bands of a single run with the derived congestion percentage.
pub mod aggregate;
pub mod chart;
pub mod experiment;
pub mod pipeline;
pub mod record;

pub use aggregate::{group_by_map, sorted_by_agents, GroupKey, GroupedResults, MatchPolicy};
pub use experiment::{Experiment, ExperimentConfig};
pub use pipeline::{run_comparison, run_congestion, ComparisonJob, CongestionJob};
pub use record::{normalize_rows, RunRecord, Value};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("results table {path} has no header row")]
    EmptyTable { path: String },

    #[error("record has no field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` holds `{value}`, which is not the expected type")]
    FieldType { field: String, value: String },

    #[error("experiment map lists differ: {left:?} vs {right:?}")]
    ConfigMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    #[error("render error: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Render(e.to_string())
    }
}
