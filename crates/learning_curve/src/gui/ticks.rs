//! Axis helpers: grid positions for the visible view and the twin-axis value mapping

use egui_plot::{log_grid_spacer, GridInput};

/// Smallest half-width used when a range collapses to a single value.
const SINGULAR_PAD: f64 = 0.5;

/// Same minimum mark spacing egui_plot feeds its own spacer.
const MIN_MARK_SPACING_POINTS: f64 = 8.0;

/// Only marks at least this far apart on screen become grid lines.
const GRID_SPACING_POINTS: f64 = 40.0;

/// Auto-fit adds a small margin on each side; anything wider was zoomed out.
pub const AUTO_FIT_SLACK: f64 = 1.25;

/// Widen a degenerate `lo == hi` range so it can be scaled.
pub fn expand_singular(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() > f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        (lo.min(hi), lo.max(hi))
    } else {
        let pad = (lo.abs() * 0.05).max(SINGULAR_PAD);
        (lo - pad, hi + pad)
    }
}

/// Grid line positions inside `bounds`, using the decimal spacer that also places
/// egui_plot's tick labels. `value_per_point` is the axis scale of the current view.
pub fn grid_marks(bounds: (f64, f64), value_per_point: f64) -> Vec<f64> {
    let (lo, hi) = bounds;
    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return Vec::new();
    }
    if !value_per_point.is_finite() || value_per_point <= 0.0 {
        return Vec::new();
    }

    let spacer = log_grid_spacer(10);
    let input = GridInput {
        bounds,
        base_step_size: value_per_point * MIN_MARK_SPACING_POINTS,
    };

    let mut marks: Vec<f64> = spacer(input)
        .into_iter()
        .filter(|mark| mark.step_size / value_per_point >= GRID_SPACING_POINTS)
        .map(|mark| mark.value)
        .filter(|&value| value >= lo && value <= hi)
        .collect();
    marks.sort_by(|a, b| a.total_cmp(b));
    marks.dedup_by(|a, b| (*a - *b).abs() <= value_per_point);
    marks
}

/// Range to place grid lines in along one axis.
///
/// While the view is just the auto-fit of the data (it contains the data and is at
/// most [`AUTO_FIT_SLACK`] times wider), lines are kept inside the data extent so
/// they never widen the fit. Zoomed or panned views use the whole view.
pub fn grid_window(view: (f64, f64), data: Option<(f64, f64)>) -> (f64, f64) {
    let Some((data_lo, data_hi)) = data else {
        return view;
    };
    let (data_lo, data_hi) = expand_singular(data_lo, data_hi);
    let contains_data = view.0 <= data_lo && view.1 >= data_hi;
    let fits_data = (view.1 - view.0) <= (data_hi - data_lo) * AUTO_FIT_SLACK;
    if contains_data && fits_data {
        (data_lo, data_hi)
    } else {
        view
    }
}

/// Linear map from the secondary axis' value range onto the primary axis' range,
/// so both series fill the same plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    src: (f64, f64),
    dst: (f64, f64),
}

impl AxisMapping {
    pub fn new(src: (f64, f64), dst: (f64, f64)) -> Self {
        Self {
            src: expand_singular(src.0, src.1),
            dst: expand_singular(dst.0, dst.1),
        }
    }

    pub fn identity() -> Self {
        Self {
            src: (0.0, 1.0),
            dst: (0.0, 1.0),
        }
    }

    fn scale(&self) -> f64 {
        (self.dst.1 - self.dst.0) / (self.src.1 - self.src.0)
    }

    /// Secondary value → primary plot coordinate.
    pub fn forward(&self, value: f64) -> f64 {
        self.dst.0 + (value - self.src.0) * self.scale()
    }

    /// Primary plot coordinate → secondary value.
    pub fn inverse(&self, plotted: f64) -> f64 {
        self.src.0 + (plotted - self.dst.0) / self.scale()
    }
}
