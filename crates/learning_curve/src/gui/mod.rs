pub mod chart;
pub mod ticks;

use anyhow::Result;
use eframe::egui;
use tracing::info;

use crate::error::CurveError;
use crate::gui::chart::{ChartModel, CHART_TITLE};
use crate::series::MetricSeries;

/// Roughly a 10x5 inch figure.
const WINDOW_SIZE: [f32; 2] = [1000.0, 500.0];

pub struct LearningCurveApp {
    chart: ChartModel,
}

impl LearningCurveApp {
    pub fn new(chart: ChartModel) -> Self {
        Self { chart }
    }
}

impl eframe::App for LearningCurveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(CHART_TITLE);
            });
            self.chart.ui(ui);
        });
    }
}

/// Open the chart window and block until it is closed.
///
/// The caller is expected to have rejected empty input already; an empty series
/// is still refused here before any window is created.
pub fn render(series: &MetricSeries, eval_games: Option<u64>) -> Result<()> {
    if series.is_empty() {
        return Err(CurveError::EmptySeries.into());
    }

    let chart = ChartModel::build(series, eval_games);
    info!(
        "[GUI] Plotting {} samples ({})",
        chart.utility_points.len(),
        chart.win_label
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(CHART_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        CHART_TITLE,
        options,
        Box::new(move |_cc| Box::new(LearningCurveApp::new(chart))),
    )
    .map_err(|e| anyhow::anyhow!("Chart window failed: {}", e))?;

    info!("[GUI] Chart window closed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rejects_empty_series() {
        let err = render(&MetricSeries::default(), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CurveError>(),
            Some(CurveError::EmptySeries)
        ));
    }
}
