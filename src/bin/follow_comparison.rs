//! Compares a baseline run against a no-following variant run: one overlaid
//! bar chart per metric and map, written under the figure directory.

use mapf_plot::{run_comparison, ComparisonJob, MatchPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [baseline_dir, variant_dir, figure_dir] = args.as_slice() else {
        eprintln!("Usage: follow_comparison <baseline_dir> <variant_dir> <figure_dir>");
        return ExitCode::FAILURE;
    };
    let job = ComparisonJob {
        baseline_dir: PathBuf::from(baseline_dir),
        variant_dir: PathBuf::from(variant_dir),
        figure_dir: PathBuf::from(figure_dir),
        match_policy: MatchPolicy::Substring,
    };
    if let Err(e) = run_comparison(&job) {
        eprintln!("follow_comparison: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
