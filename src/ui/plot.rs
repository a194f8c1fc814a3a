use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points, Polygon,
};

use crate::color::SampleColors;
use crate::state::AppState;
use crate::views::{BarView, HistogramView, ViolinView};

const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
const VIOLIN_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

/// Half-width of the violin outline at its widest point.
const VIOLIN_HALF_WIDTH: f64 = 0.4;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Bar chart across the full width, histogram and violin side by side below.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let views = match &state.views {
        Some(views) => views,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Select a dataset and a sample set to view read counts");
            });
            return;
        }
    };

    let row_height = (ui.available_height() / 2.0 - 30.0).max(120.0);

    bar_plot(ui, &views.bar, &state.sample_colors, row_height);
    ui.separator();
    ui.columns(2, |cols: &mut [Ui]| {
        histogram_plot(&mut cols[0], &views.histogram, row_height);
        violin_plot(&mut cols[1], &views.violin, row_height);
    });
}

/// One bar per sample, ascending by reads, labelled on the x axis.
fn bar_plot(ui: &mut Ui, view: &BarView, colors: &SampleColors, height: f32) {
    ui.strong(&view.title);

    let bars: Vec<Bar> = view
        .bars
        .iter()
        .enumerate()
        .map(|(i, rc)| {
            Bar::new(i as f64, rc.reads as f64)
                .name(&rc.sample)
                .width(0.8)
                .fill(colors.color_for(&rc.sample))
        })
        .collect();
    let labels: Vec<String> = view.samples().map(str::to_owned).collect();

    Plot::new("reads_bar")
        .height(height)
        .x_axis_label("Sample")
        .y_axis_label("Reads")
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value;
            if pos < 0.0 || (pos - pos.round()).abs() > 1e-6 {
                return String::new();
            }
            labels.get(pos.round() as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Reads"));
        });
}

/// Reads binned into equal-width bins.
fn histogram_plot(ui: &mut Ui, view: &HistogramView, height: f32) {
    ui.strong(&view.title);

    let bars: Vec<Bar> = view
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(HISTOGRAM_COLOR)
        })
        .collect();

    Plot::new("reads_histogram")
        .height(height)
        .x_axis_label("Reads")
        .y_axis_label("count")
        .legend(Legend::default())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            let name = format!("Reads (n = {})", view.observations());
            plot_ui.bar_chart(BarChart::new(bars).name(name));
        });
}

/// Density outline mirrored around x = 0, box overlay and every sample
/// drawn on the centre line.
fn violin_plot(ui: &mut Ui, view: &ViolinView, height: f32) {
    ui.strong(&view.title);

    let peak = view.peak_density();
    let outline: Vec<[f64; 2]> = if peak > 0.0 {
        let right = view
            .density
            .iter()
            .map(|&[y, d]| [d / peak * VIOLIN_HALF_WIDTH, y]);
        let left = view
            .density
            .iter()
            .rev()
            .map(|&[y, d]| [-d / peak * VIOLIN_HALF_WIDTH, y]);
        right.chain(left).collect()
    } else {
        Vec::new()
    };

    Plot::new("reads_violin")
        .height(height)
        .y_axis_label("Reads")
        .show_axes([false, true])
        .legend(Legend::default())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            if !outline.is_empty() {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .name("Reads")
                        .fill_color(VIOLIN_COLOR.gamma_multiply(0.3))
                        .stroke(Stroke::new(1.5, VIOLIN_COLOR)),
                );
            }
            if let Some(s) = view.stats {
                let elem = BoxElem::new(
                    0.0,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .box_width(0.15)
                .whisker_width(0.0)
                .fill(VIOLIN_COLOR.gamma_multiply(0.5))
                .stroke(Stroke::new(1.0, VIOLIN_COLOR));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name("box"));
            }
            let points: PlotPoints = view.points.iter().map(|&r| [0.0, r]).collect();
            plot_ui.points(
                Points::new(points)
                    .radius(3.0)
                    .color(VIOLIN_COLOR)
                    .name("samples"),
            );
        });
}
