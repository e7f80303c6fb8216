use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{gradient_color, text_on};
use crate::data::model::Indicator;
use crate::data::query::{column_samples, table_rows};
use crate::scale::Scale;
use crate::state::AppState;

/// One coloured cell: text plus optional background.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub background: Option<Color32>,
}

/// Build the table body for `year`: one row per country with an entry, each
/// value cell coloured red→green against its own column's min/max.
pub fn build_rows(state: &AppState, year: i32) -> Vec<(String, [Cell; 3])> {
    let Some(dataset) = &state.dataset else {
        return Vec::new();
    };
    let rows = table_rows(dataset, year);
    let scales = Indicator::ALL.map(|ind| Scale::from_samples(column_samples(&rows, ind)));

    rows.iter()
        .map(|(country, entry)| {
            let cells = Indicator::ALL.map(|ind| {
                let idx = ind as usize;
                match (entry.get(ind), scales[idx].as_ref()) {
                    (Some(v), Some(scale)) => Cell {
                        text: v.to_string(),
                        background: Some(gradient_color(scale, v)),
                    },
                    _ => Cell {
                        text: "n/a".to_string(),
                        background: None,
                    },
                }
            });
            (country.code().to_string(), cells)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Colour-coded table for the selected year
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(year) = state.year else {
        return;
    };
    let rows = build_rows(state, year);
    if rows.is_empty() {
        ui.label(format!("No data for {year}."));
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::remainder().at_least(100.0), 3)
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Country");
            });
            for ind in Indicator::ALL {
                header.col(|ui| {
                    ui.strong(ind.label());
                });
            }
        })
        .body(|mut body| {
            for (code, cells) in &rows {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(code);
                    });
                    for cell in cells {
                        row.col(|ui| match cell.background {
                            Some(bg) => {
                                ui.painter().rect_filled(ui.max_rect(), 0.0_f32, bg);
                                ui.label(RichText::new(&cell.text).color(text_on(bg)));
                            }
                            None => {
                                ui.weak(&cell.text);
                            }
                        });
                    }
                });
            }
        });
}
