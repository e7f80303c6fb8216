use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::{bubble, panels, plot, table};

const CHART_HEIGHT: f32 = 380.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Restore the saved theme and load the configured dataset.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let theme = Theme::load(cc.storage);
        cc.egui_ctx.set_visuals(theme.visuals());

        let mut state = AppState::new(config, theme);
        let path = state.config.data_path.clone();
        panels::load_into(&mut state, &path);

        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // ---- Animation step ----
        let now = ctx.input(|i| i.time);
        self.state.tick(now);
        if let Some(wait) = self
            .state
            .animation
            .remaining(now, self.state.config.animation_interval)
        {
            ctx.request_repaint_after(wait);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, frame);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selection_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state.theme.store(storage);
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(
                state
                    .status_message
                    .as_deref()
                    .unwrap_or("Open a dataset to begin  (File → Open…)"),
            );
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!(
                "{} – {}",
                state.indicator.label(),
                state.country.code()
            ));
            plot::line_chart(ui, state, CHART_HEIGHT);
            ui.separator();

            ui.heading("GDP vs. life expectancy (bubble size: population)");
            bubble::bubble_chart(ui, state, CHART_HEIGHT);
            ui.separator();

            match state.year {
                Some(year) => ui.heading(format!("Indicators by country, {year}")),
                None => ui.heading("Indicators by country"),
            };
            table::data_table(ui, state);
        });
}
