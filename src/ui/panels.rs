use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{Country, Indicator};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the indicator / country / year selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    ui.strong("Indicator");
    egui::ComboBox::from_id_salt("indicator_select")
        .selected_text(state.indicator.label())
        .show_ui(ui, |ui: &mut Ui| {
            for ind in Indicator::ALL {
                ui.selectable_value(&mut state.indicator, ind, ind.label());
            }
        });
    ui.add_space(8.0);

    ui.strong("Country");
    egui::ComboBox::from_id_salt("country_select")
        .selected_text(state.country.code())
        .show_ui(ui, |ui: &mut Ui| {
            for country in Country::all() {
                ui.selectable_value(&mut state.country, country, country.code());
            }
        });
    ui.add_space(8.0);

    ui.strong("Year");
    let year_text = state
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "–".to_string());
    ui.add_enabled_ui(!state.years.is_empty(), |ui: &mut Ui| {
        egui::ComboBox::from_id_salt("year_select")
            .selected_text(year_text)
            .show_ui(ui, |ui: &mut Ui| {
                for &y in &state.years {
                    ui.selectable_value(&mut state.year, Some(y), y.to_string());
                }
            });
    });

    ui.add_space(12.0);
    ui.separator();
    if let Some(ds) = &state.dataset {
        ui.label(format!(
            "{} countries · {} country-years",
            ds.countries().count(),
            ds.len()
        ));
        if ds.rejected() > 0 {
            ui.weak(format!("{} rows skipped", ds.rejected()));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, frame: &mut eframe::Frame) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let path = state.config.data_path.clone();
                load_into(state, &path);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button(state.theme.toggle_label()).clicked() {
            match frame.storage_mut() {
                Some(storage) => state.toggle_theme_persisted(storage),
                None => state.toggle_theme(),
            }
            ui.ctx().set_visuals(state.theme.visuals());
        }

        ui.separator();

        let now = ui.input(|i| i.time);
        let playing = state.animation.is_playing();
        if ui
            .add_enabled(!playing && !state.years.is_empty(), egui::Button::new("▶ Play"))
            .clicked()
        {
            state.play(now);
        }
        if ui
            .add_enabled(playing, egui::Button::new("⏸ Pause"))
            .clicked()
        {
            state.pause();
        }

        ui.separator();

        if let (Some(first), Some(last)) = (state.years.first(), state.years.last()) {
            ui.label(format!("Years {first}–{last}"));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open indicator data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.config.data_path = path.clone();
        load_into(state, &path);
    }
}

/// Load `path` into the state, surfacing a failure as the status message.
pub fn load_into(state: &mut AppState, path: &std::path::Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.set_load_error(&e);
        }
    }
}
