//! Renders per-map bar charts for a single run, with background bands
//! labeled by the congestion percentage (agents over open vertices).

use mapf_plot::{run_congestion, CongestionJob, MatchPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [run_dir, figure_dir] = args.as_slice() else {
        eprintln!("Usage: congestion_report <run_dir> <figure_dir>");
        return ExitCode::FAILURE;
    };
    let job = CongestionJob {
        run_dir: PathBuf::from(run_dir),
        figure_dir: PathBuf::from(figure_dir),
        match_policy: MatchPolicy::Substring,
    };
    if let Err(e) = run_congestion(&job) {
        eprintln!("congestion_report: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
