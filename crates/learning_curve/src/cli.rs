use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use crate::error::CurveError;
use crate::gui;
use crate::parser;
use crate::series::MetricSeries;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Plot utility and wins from a training log", long_about = None)]
pub struct Cli {
    /// Path to logfile containing eval outputs
    #[arg(default_value = "training.log")]
    pub logfile: PathBuf,

    /// Number of evaluation games per cycle (if provided, plots win rate = avg(num_wins)/eval_games)
    #[arg(short, long, allow_negative_numbers = true)]
    pub eval_games: Option<i64>,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Positive `--eval-games`, if any. Zero and negative values count as absent.
    pub fn eval_games(&self) -> Option<u64> {
        match self.eval_games {
            Some(games) if games > 0 => Some(games as u64),
            Some(games) => {
                warn!("Ignoring --eval-games {} (not positive); plotting raw wins.", games);
                None
            }
            None => None,
        }
    }
}

/// Existence check, parse, and the "zero samples" check.
pub fn load_series(path: &Path) -> Result<MetricSeries, CurveError> {
    if !path.exists() {
        return Err(CurveError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let report = parser::parse_with_report(path);
    if report.malformed > 0 {
        warn!(
            "Skipped {} malformed metric line(s) in {}",
            report.malformed,
            path.display()
        );
    }
    if let Some(e) = &report.read_error {
        warn!("Reading {} stopped early: {}", path.display(), e);
    }

    if report.series.is_empty() {
        return Err(CurveError::EmptyResult {
            path: path.to_path_buf(),
            read_error: report.read_error.map(|e| e.to_string()),
        });
    }

    info!(
        "Parsed {} samples from {} ({} lines read)",
        report.accepted(),
        path.display(),
        report.lines_read
    );
    if let Some((first, last)) = report.series.cycle_range() {
        info!("Cycles {} to {}", first, last);
    }
    Ok(report.series)
}

pub fn run(cli: Cli) -> Result<()> {
    info!("Logfile: {}", cli.logfile.display());

    let series = load_series(&cli.logfile)?;
    let eval_games = cli.eval_games();
    match eval_games {
        Some(games) => info!("Plotting win rate over {} eval games per cycle", games),
        None => info!("Plotting raw avg wins"),
    }

    gui::render(&series, eval_games)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["learning_curve"]).unwrap();
        assert_eq!(cli.logfile, PathBuf::from("training.log"));
        assert_eq!(cli.eval_games, None);
        assert_eq!(cli.eval_games(), None);
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn test_eval_games_flags() {
        let cli = Cli::try_parse_from(["learning_curve", "run.log", "-e", "20"]).unwrap();
        assert_eq!(cli.logfile, PathBuf::from("run.log"));
        assert_eq!(cli.eval_games(), Some(20));

        let cli = Cli::try_parse_from(["learning_curve", "--eval-games", "0"]).unwrap();
        assert_eq!(cli.eval_games(), None);

        let cli = Cli::try_parse_from(["learning_curve", "-e", "-4"]).unwrap();
        assert_eq!(cli.eval_games, Some(-4));
        assert_eq!(cli.eval_games(), None);
    }

    #[test]
    fn test_eval_games_must_be_integer() {
        assert!(Cli::try_parse_from(["learning_curve", "-e", "2.5"]).is_err());
    }
}
