use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::model::YearEntry;
use crate::data::query::line_series;
use crate::state::AppState;

const LINE_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v}")).unwrap_or_else(|| "n/a".to_string())
}

// ---------------------------------------------------------------------------
// Indicator evolution for one country
// ---------------------------------------------------------------------------

/// Line chart of the selected indicator over the offered years.
pub fn line_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let series = line_series(dataset, state.country, state.indicator, &state.years);
    let entries: Vec<(i32, YearEntry)> = series
        .iter()
        .filter_map(|&(y, _)| dataset.entry(state.country, y).map(|e| (y, *e)))
        .collect();
    let country = state.country;

    Plot::new("line_chart")
        .height(height)
        .x_axis_label("Year")
        .y_axis_label(state.indicator.label())
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .label_formatter(move |_name, point| {
            let year = point.x.round() as i32;
            match entries.iter().find(|(y, _)| *y == year) {
                Some((_, e)) => format!(
                    "{country} - {year}\nGDP/capita: {}\nLife exp.: {}\nPop: {}",
                    fmt_opt(e.gdp),
                    fmt_opt(e.life),
                    fmt_opt(e.pop)
                ),
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            if series.is_empty() {
                return;
            }
            let points: Vec<[f64; 2]> = series
                .iter()
                .map(|&(y, v)| [y as f64, v])
                .collect();

            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(state.indicator.label())
                    .color(LINE_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(4.0)
                    .color(Color32::ORANGE),
            );
        });
}
