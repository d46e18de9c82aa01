//! Metric Series - parsed training metrics and the derived win series

/// One metric line: `after cycle=<c> avg(utility)=<u> avg(num_wins)=<w>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub cycle: f64,
    pub avg_utility: f64,
    pub avg_wins: f64,
}

impl MetricSample {
    pub fn new(cycle: f64, avg_utility: f64, avg_wins: f64) -> Self {
        Self {
            cycle,
            avg_utility,
            avg_wins,
        }
    }
}

/// Samples in file-encounter order. Duplicate or out-of-order cycles are kept as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    samples: Vec<MetricSample>,
}

impl MetricSeries {
    pub fn new(samples: Vec<MetricSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricSample> {
        self.samples.iter()
    }

    pub fn cycles(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.cycle).collect()
    }

    pub fn utilities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.avg_utility).collect()
    }

    pub fn wins(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.avg_wins).collect()
    }

    /// Smallest and largest finite cycle, if any.
    pub fn cycle_range(&self) -> Option<(f64, f64)> {
        finite_range(self.samples.iter().map(|s| s.cycle))
    }
}

impl From<Vec<MetricSample>> for MetricSeries {
    fn from(samples: Vec<MetricSample>) -> Self {
        Self::new(samples)
    }
}

pub const WIN_RATE_LABEL: &str = "avg win rate";
pub const RAW_WINS_LABEL: &str = "avg wins";

/// Win values plotted on the secondary axis.
#[derive(Debug, Clone, PartialEq)]
pub struct WinSeries {
    pub label: &'static str,
    pub values: Vec<f64>,
}

impl WinSeries {
    /// `avg_wins / eval_games` when `eval_games` is positive, raw `avg_wins` otherwise.
    pub fn derive(series: &MetricSeries, eval_games: Option<u64>) -> Self {
        match eval_games.filter(|&games| games > 0) {
            Some(games) => {
                let denom = games as f64;
                Self {
                    label: WIN_RATE_LABEL,
                    values: series.iter().map(|s| s.avg_wins / denom).collect(),
                }
            }
            None => Self {
                label: RAW_WINS_LABEL,
                values: series.wins(),
            },
        }
    }
}

/// Min/max over the finite values; `None` when there are none.
pub fn finite_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> MetricSeries {
        vec![
            MetricSample::new(1.0, 0.10, 3.0),
            MetricSample::new(2.0, 0.25, 5.0),
            MetricSample::new(2.0, 0.20, 4.0),
        ]
        .into()
    }

    #[test]
    fn test_columns_keep_file_order() {
        let series = sample_series();
        assert_eq!(series.cycles(), vec![1.0, 2.0, 2.0]);
        assert_eq!(series.utilities(), vec![0.10, 0.25, 0.20]);
        assert_eq!(series.wins(), vec![3.0, 5.0, 4.0]);
    }

    #[test]
    fn test_win_rate_divides_by_eval_games() {
        let series = sample_series();
        let wins = WinSeries::derive(&series, Some(10));
        assert_eq!(wins.label, "avg win rate");
        assert_eq!(wins.values, vec![3.0 / 10.0, 5.0 / 10.0, 4.0 / 10.0]);
    }

    #[test]
    fn test_raw_wins_without_eval_games() {
        let series = sample_series();
        for eval_games in [None, Some(0)] {
            let wins = WinSeries::derive(&series, eval_games);
            assert_eq!(wins.label, "avg wins");
            assert_eq!(wins.values, series.wins());
        }
    }

    #[test]
    fn test_finite_range_skips_nan_and_inf() {
        let range = finite_range([f64::NAN, 2.0, f64::INFINITY, -1.5, 0.0]);
        assert_eq!(range, Some((-1.5, 2.0)));
        assert_eq!(finite_range([f64::NAN]), None);
        assert_eq!(finite_range(Vec::new()), None);
    }
}
