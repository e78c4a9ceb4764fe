use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, PlotPoints, Points};

use crate::chart::{ChartSpec, FiveNumberSummary, HistogramBin};
use crate::state::AppState;

const FILL: Color32 = Color32::from_rgb(100, 150, 255);

// ---------------------------------------------------------------------------
// Chart view (central panel)
// ---------------------------------------------------------------------------

/// Render the last generated chart in the central panel.
pub fn chart_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to plot data  (File → Open…)");
        });
        return;
    }

    let Some(chart) = &state.chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Pick fields and press Generate Plot.");
        });
        return;
    };

    match chart {
        ChartSpec::Histogram { field, bins } => histogram_view(ui, field, bins),
        ChartSpec::Scatter {
            x_field,
            y_field,
            points,
        } => scatter_view(ui, x_field, y_field, points),
        ChartSpec::BoxPlot {
            field,
            summary,
            outliers,
        } => box_plot_view(ui, field, summary, outliers),
        ChartSpec::InvalidSelection => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Invalid Selection");
            });
        }
    }
}

fn histogram_view(ui: &mut Ui, field: &str, bins: &[HistogramBin]) {
    ui.heading(format!("Histogram: {field}"));

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(FILL)
        })
        .collect();

    // Per-kind plot ids so zoom/pan memory doesn't leak between chart types.
    Plot::new("histogram_chart")
        .x_axis_label(field)
        .y_axis_label("Frequency")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn scatter_view(ui: &mut Ui, x_field: &str, y_field: &str, points: &[[f64; 2]]) {
    ui.heading(format!("Scatter Plot: {x_field} vs {y_field}"));

    let plot_points: PlotPoints = points.iter().copied().collect();

    Plot::new("scatter_chart")
        .x_axis_label(x_field)
        .y_axis_label(y_field)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(plot_points).radius(2.5).color(FILL));
        });
}

fn box_plot_view(ui: &mut Ui, field: &str, summary: &FiveNumberSummary, outliers: &[f64]) {
    ui.heading(format!("Box Plot: {field}"));

    let spread = BoxSpread::new(
        summary.whisker_low,
        summary.q1,
        summary.median,
        summary.q3,
        summary.whisker_high,
    );
    let elem = BoxElem::new(0.0, spread)
        .name(field)
        .box_width(0.5)
        .fill(FILL);

    // Outliers drawn as loose points on the same axis as the box.
    let fliers: PlotPoints = outliers.iter().map(|&v| [v, 0.0]).collect();

    Plot::new("box_plot_chart")
        .x_axis_label(field)
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal());
            plot_ui.points(Points::new(fliers).radius(2.5).color(Color32::GRAY));
        });
}
