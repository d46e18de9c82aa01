//! Learning-curve viewer for training logs.
//!
//! Reads `after cycle=... avg(utility)=... avg(num_wins)=...` lines and shows
//! utility and wins per cycle on a dual-axis chart.

pub mod cli;
pub mod error;
pub mod gui;
pub mod logging;
pub mod parser;
pub mod series;

pub use cli::{load_series, Cli};
pub use error::CurveError;
pub use gui::chart::ChartModel;
pub use gui::render;
pub use parser::{parse, parse_with_report, LineOutcome, ParseReport};
pub use series::{MetricSample, MetricSeries, WinSeries};
