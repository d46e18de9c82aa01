//! Learning Curve Chart - utility and wins on twin Y axes using egui_plot

use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText};
use egui_plot::{
    AxisHints, Corner, GridMark, HLine, HPlacement, Legend, Line, LineStyle, Plot, PlotPoint,
    PlotPoints, PlotUi, VLine,
};

use crate::gui::ticks::{grid_marks, grid_window, AxisMapping};
use crate::series::{finite_range, MetricSeries, WinSeries};

pub const CHART_TITLE: &str = "Learning Curve: Utility and Wins";
pub const UTILITY_LABEL: &str = "avg utility";
pub const CYCLE_LABEL: &str = "cycle";

/// matplotlib's `tab:blue`
pub const UTILITY_COLOR: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
/// The win series and its axis are drawn fully transparent.
pub const WIN_COLOR: Color32 = Color32::TRANSPARENT;
/// Gray at 40% opacity.
pub const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(51, 51, 51, 102);

/// Everything needed to draw the chart, computed up front.
#[derive(Debug, Clone)]
pub struct ChartModel {
    /// (cycle, avg utility)
    pub utility_points: Vec<[f64; 2]>,
    /// (cycle, win value mapped onto the utility axis)
    pub win_points: Vec<[f64; 2]>,
    /// Unmapped win values, parallel to `win_points`.
    pub win_values: Vec<f64>,
    pub win_label: &'static str,
    pub win_mapping: AxisMapping,
    /// Finite cycle range
    pub x_extent: Option<(f64, f64)>,
    /// Finite utility range; mapped win points share it.
    pub y_extent: Option<(f64, f64)>,
}

impl ChartModel {
    pub fn build(series: &MetricSeries, eval_games: Option<u64>) -> Self {
        let cycles = series.cycles();
        let utilities = series.utilities();
        let wins = WinSeries::derive(series, eval_games);

        let utility_range = finite_range(utilities.iter().copied());
        let win_mapping = match (finite_range(wins.values.iter().copied()), utility_range) {
            (Some(src), Some(dst)) => AxisMapping::new(src, dst),
            (Some(src), None) => AxisMapping::new(src, (0.0, 1.0)),
            _ => AxisMapping::identity(),
        };

        let utility_points = cycles
            .iter()
            .zip(&utilities)
            .map(|(&x, &y)| [x, y])
            .collect();
        let win_points = cycles
            .iter()
            .zip(&wins.values)
            .map(|(&x, &w)| [x, win_mapping.forward(w)])
            .collect();

        let x_extent = finite_range(cycles.iter().copied());

        Self {
            utility_points,
            win_points,
            win_values: wins.values,
            win_label: wins.label,
            win_mapping,
            x_extent,
            y_extent: utility_range,
        }
    }

    /// Hover text; win values are read back through the inverse axis mapping.
    pub fn hover_text(&self, name: &str, x: f64, y: f64) -> String {
        if name == self.win_label {
            format!(
                "{}\n{} = {}\n{} = {:.4}",
                name,
                CYCLE_LABEL,
                x,
                self.win_label,
                self.win_mapping.inverse(y)
            )
        } else if name == UTILITY_LABEL {
            format!("{}\n{} = {}\n{} = {:.4}", name, CYCLE_LABEL, x, UTILITY_LABEL, y)
        } else {
            format!("{} = {}\n{} = {:.4}", CYCLE_LABEL, x, UTILITY_LABEL, y)
        }
    }

    /// Grid line positions for the view `plot_ui` is currently showing.
    pub fn view_grid(&self, plot_ui: &PlotUi) -> (Vec<f64>, Vec<f64>) {
        let bounds = plot_ui.plot_bounds();
        let [x0, y0] = bounds.min();
        let [x1, y1] = bounds.max();
        let p0 = plot_ui.screen_from_plot(PlotPoint::new(x0, y0));
        let p1 = plot_ui.screen_from_plot(PlotPoint::new(x1, y1));
        let width_points = f64::from((p1.x - p0.x).abs());
        let height_points = f64::from((p1.y - p0.y).abs());

        let xs = grid_marks(
            grid_window((x0, x1), self.x_extent),
            (x1 - x0) / width_points,
        );
        let ys = grid_marks(
            grid_window((y0, y1), self.y_extent),
            (y1 - y0) / height_points,
        );
        (xs, ys)
    }

    /// Render the chart
    pub fn ui(&self, ui: &mut egui::Ui) {
        let utility_line = Line::new(self.utility_points.iter().copied().collect::<PlotPoints>())
            .color(UTILITY_COLOR)
            .name(UTILITY_LABEL);
        let win_line = Line::new(self.win_points.iter().copied().collect::<PlotPoints>())
            .color(WIN_COLOR)
            .name(self.win_label);

        let utility_axis =
            AxisHints::new_y().label(RichText::new(UTILITY_LABEL).color(UTILITY_COLOR));
        // Tick labels for the win axis are suppressed along with its color.
        let win_axis = AxisHints::new_y()
            .label(RichText::new(self.win_label).color(WIN_COLOR))
            .placement(HPlacement::Right)
            .formatter(|_mark: GridMark, _digits: usize, _range: &RangeInclusive<f64>| {
                String::new()
            });

        let hover_model = self.clone();

        Plot::new("learning_curve_plot")
            .legend(Legend::default().position(Corner::LeftTop))
            .show_grid(false)
            .x_axis_label(CYCLE_LABEL)
            .custom_y_axes(vec![utility_axis, win_axis])
            .label_formatter(move |name, value| hover_model.hover_text(name, value.x, value.y))
            .show(ui, |plot_ui| {
                let (grid_x, grid_y) = self.view_grid(plot_ui);
                for x in grid_x {
                    plot_ui.vline(
                        VLine::new(x)
                            .color(GRID_COLOR)
                            .style(LineStyle::dashed_loose()),
                    );
                }
                for y in grid_y {
                    plot_ui.hline(
                        HLine::new(y)
                            .color(GRID_COLOR)
                            .style(LineStyle::dashed_loose()),
                    );
                }
                plot_ui.line(utility_line);
                plot_ui.line(win_line);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::MetricSample;

    fn series() -> MetricSeries {
        vec![
            MetricSample::new(0.0, 0.1, 2.0),
            MetricSample::new(10.0, 0.3, 6.0),
            MetricSample::new(20.0, 0.5, 10.0),
        ]
        .into()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_model_points_share_cycles() {
        let model = ChartModel::build(&series(), None);
        assert_eq!(model.utility_points, vec![[0.0, 0.1], [10.0, 0.3], [20.0, 0.5]]);
        assert_eq!(model.win_label, "avg wins");
        assert_eq!(model.win_values, vec![2.0, 6.0, 10.0]);
        let xs: Vec<f64> = model.win_points.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_win_series_fills_utility_extent() {
        let model = ChartModel::build(&series(), Some(20));
        assert_eq!(model.win_label, "avg win rate");
        assert_eq!(model.win_values, vec![0.1, 0.3, 0.5]);

        let plotted: Vec<f64> = model.win_points.iter().map(|p| p[1]).collect();
        assert!(approx(plotted[0], 0.1));
        assert!(approx(plotted[2], 0.5));
        for (point, value) in model.win_points.iter().zip(&model.win_values) {
            assert!(approx(model.win_mapping.inverse(point[1]), *value));
        }
    }

    #[test]
    fn test_extents_track_data() {
        let model = ChartModel::build(&series(), None);
        assert_eq!(model.x_extent, Some((0.0, 20.0)));
        assert_eq!(model.y_extent, Some((0.1, 0.5)));
    }

    #[test]
    fn test_hover_text_reads_back_win_values() {
        let model = ChartModel::build(&series(), None);
        let plotted = model.win_points[1][1];
        let text = model.hover_text("avg wins", 10.0, plotted);
        assert!(text.contains("cycle = 10"));
        assert!(text.contains("avg wins = 6.0000"), "{}", text);

        let text = model.hover_text(UTILITY_LABEL, 20.0, 0.5);
        assert!(text.contains("avg utility = 0.5000"));

        let text = model.hover_text(UTILITY_LABEL, 2.5, 0.2);
        assert!(text.contains("cycle = 2.5"), "{}", text);
    }

    #[test]
    fn test_single_sample_is_drawable() {
        let one: MetricSeries = vec![MetricSample::new(3.0, 0.42, 7.0)].into();
        let model = ChartModel::build(&one, None);
        assert_eq!(model.win_points.len(), 1);
        assert!(model.win_points[0][1].is_finite());
        assert_eq!(model.x_extent, Some((3.0, 3.0)));
    }
}
