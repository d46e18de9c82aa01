//! Log Parser - extracts per-cycle metrics from a training log
//!
//! Parsing is best-effort: lines without the three markers are noise, lines with
//! the markers but a bad remainder are skipped, and an unreadable file yields an
//! empty series. [`ParseReport`] keeps the counts so callers can tell a
//! noise-only log apart from a read failure.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::series::{MetricSample, MetricSeries};

pub const CYCLE_MARKER: &str = "after cycle=";
pub const UTILITY_MARKER: &str = "avg(utility)=";
pub const WINS_MARKER: &str = "avg(num_wins)=";

const MARKERS: [&str; 3] = [CYCLE_MARKER, UTILITY_MARKER, WINS_MARKER];

/// Result of looking at a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Sample(MetricSample),
    /// All markers present but the remainder is not three numbers.
    Malformed,
    NotMetric,
}

/// Everything a scan produced.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub series: MetricSeries,
    pub lines_read: usize,
    pub malformed: usize,
    /// Open or decode failure. Samples read before it are kept.
    pub read_error: Option<io::Error>,
}

impl ParseReport {
    pub fn accepted(&self) -> usize {
        self.series.len()
    }
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Classify one line and extract its sample, if any.
pub fn parse_line(line: &str) -> LineOutcome {
    let line = line.trim();
    if !MARKERS.iter().all(|marker| line.contains(marker)) {
        return LineOutcome::NotMetric;
    }

    let mut values = line.to_string();
    for marker in MARKERS {
        values = values.replace(marker, "");
    }
    let collapsed = whitespace().replace_all(values.trim(), " ");
    let tokens: Vec<&str> = collapsed.trim().split(' ').collect();

    let [cycle, utility, wins] = tokens.as_slice() else {
        return LineOutcome::Malformed;
    };
    match (parse_number(cycle), parse_number(utility), parse_number(wins)) {
        (Some(cycle), Some(utility), Some(wins)) => {
            LineOutcome::Sample(MetricSample::new(cycle, utility, wins))
        }
        _ => LineOutcome::Malformed,
    }
}

/// Float token, also accepting single `_` digit separators (`1_000`).
fn parse_number(token: &str) -> Option<f64> {
    if !token.contains('_') {
        return token.parse().ok();
    }

    let bytes = token.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !separators_ok {
        return None;
    }
    token.replace('_', "").parse().ok()
}

/// Scan any line source. Stops at the first read error and keeps what it has.
pub fn parse_reader<R: BufRead>(reader: R) -> ParseReport {
    let mut samples = Vec::new();
    let mut report = ParseReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                debug!("Stopped reading at line {}: {}", idx + 1, e);
                report.read_error = Some(e);
                break;
            }
        };
        report.lines_read += 1;

        match parse_line(&line) {
            LineOutcome::Sample(sample) => samples.push(sample),
            LineOutcome::Malformed => {
                debug!("Skipping malformed metric line {}: {:?}", idx + 1, line.trim());
                report.malformed += 1;
            }
            LineOutcome::NotMetric => {}
        }
    }

    report.series = MetricSeries::new(samples);
    report
}

/// Scan a log file. Never fails: an unopenable file is reported as `read_error`.
pub fn parse_with_report(path: impl AsRef<Path>) -> ParseReport {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => parse_reader(BufReader::new(file)),
        Err(e) => {
            debug!("Cannot open {}: {}", path.display(), e);
            ParseReport {
                read_error: Some(e),
                ..Default::default()
            }
        }
    }
}

pub fn parse(path: impl AsRef<Path>) -> MetricSeries {
    parse_with_report(path).series
}
