use std::time::Duration;

use crate::config::DashboardConfig;
use crate::data::model::{Country, Indicator};
use crate::data::IndexedDataset;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Year animation
// ---------------------------------------------------------------------------

/// Cyclic stepping through the year list on a fixed interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    /// Index of the year emitted on the next step.
    cursor: usize,
    /// Time (seconds) of the last step; `None` while paused.
    last_step: Option<f64>,
}

impl Animation {
    pub fn is_playing(&self) -> bool {
        self.last_step.is_some()
    }

    /// Begin playing from `current` (or the first year if it is not listed).
    /// Does nothing when already playing.
    pub fn start(&mut self, years: &[i32], current: Option<i32>, now: f64) {
        if self.is_playing() {
            return;
        }
        self.cursor = current
            .and_then(|y| years.iter().position(|&v| v == y))
            .unwrap_or(0);
        self.last_step = Some(now);
    }

    pub fn stop(&mut self) {
        self.last_step = None;
    }

    /// Advance when `interval` has elapsed since the last step. Returns the
    /// year to show, wrapping back to the first year after the last one.
    pub fn tick(&mut self, years: &[i32], now: f64, interval: Duration) -> Option<i32> {
        let last = self.last_step?;
        if years.is_empty() || now - last < interval.as_secs_f64() {
            return None;
        }
        let idx = self.cursor % years.len();
        self.cursor = (idx + 1) % years.len();
        self.last_step = Some(now);
        Some(years[idx])
    }

    /// Seconds until the next step is due, for repaint scheduling.
    pub fn remaining(&self, now: f64, interval: Duration) -> Option<Duration> {
        let last = self.last_step?;
        let left = (last + interval.as_secs_f64() - now).max(0.0);
        Some(Duration::from_secs_f64(left))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<IndexedDataset>,

    /// Years offered in the selector, ascending.
    pub years: Vec<i32>,

    pub indicator: Indicator,
    pub country: Country,
    pub year: Option<i32>,

    pub theme: Theme,
    pub animation: Animation,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, theme: Theme) -> Self {
        Self {
            config,
            dataset: None,
            years: Vec::new(),
            indicator: Indicator::Gdp,
            country: Country::default(),
            year: None,
            theme,
            animation: Animation::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and select its most recent year.
    pub fn set_dataset(&mut self, dataset: IndexedDataset) {
        self.animation.stop();
        self.years = dataset.recent_years(self.config.year_window);
        self.year = self.years.last().copied();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Record a failed load. The previous dataset, if any, is discarded.
    pub fn set_load_error(&mut self, err: &anyhow::Error) {
        self.animation.stop();
        self.dataset = None;
        self.years.clear();
        self.year = None;
        self.status_message = Some(format!("Could not load data: {err:#}"));
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Toggle and write the new theme to `storage` straight away.
    pub fn toggle_theme_persisted(&mut self, storage: &mut dyn eframe::Storage) {
        self.toggle_theme();
        self.theme.store(storage);
        storage.flush();
    }

    pub fn play(&mut self, now: f64) {
        self.animation.start(&self.years, self.year, now);
    }

    pub fn pause(&mut self) {
        self.animation.stop();
    }

    /// Step the animation; returns true when the year changed.
    pub fn tick(&mut self, now: f64) -> bool {
        match self
            .animation
            .tick(&self.years, now, self.config.animation_interval)
        {
            Some(year) => {
                let changed = self.year != Some(year);
                self.year = Some(year);
                changed
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data::model::{RawRecord, YearField};
    use crate::theme::THEME_KEY;

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
        flushes: usize,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn theme_toggle_is_written_immediately() {
        let mut st = state(None);
        let mut storage = MemoryStorage::default();

        st.toggle_theme_persisted(&mut storage);
        assert_eq!(st.theme, Theme::Dark);
        assert_eq!(storage.values.get(THEME_KEY).map(String::as_str), Some("dark"));
        assert_eq!(storage.flushes, 1);

        st.toggle_theme_persisted(&mut storage);
        assert_eq!(storage.values.get(THEME_KEY).map(String::as_str), Some("light"));
    }

    fn dataset(years: std::ops::Range<i64>) -> IndexedDataset {
        IndexedDataset::index(years.map(|y| RawRecord {
            tara: Some("RO".into()),
            an: Some(YearField::Int(y)),
            indicator: Some("PIB".into()),
            valoare: Some(1.0),
        }))
    }

    fn state(window: Option<usize>) -> AppState {
        let config = DashboardConfig {
            year_window: window,
            ..DashboardConfig::default()
        };
        AppState::new(config, Theme::Light)
    }

    #[test]
    fn set_dataset_selects_latest_year() {
        let mut st = state(None);
        st.set_dataset(dataset(2000..2024));
        assert_eq!(st.years.len(), 24);
        assert_eq!(st.year, Some(2023));
        assert_eq!(st.country.code(), "RO");
    }

    #[test]
    fn year_window_limits_selector() {
        let mut st = state(Some(15));
        st.set_dataset(dataset(2000..2024));
        assert_eq!(st.years.first(), Some(&2009));
        assert_eq!(st.years.len(), 15);
    }

    #[test]
    fn load_error_clears_dataset() {
        let mut st = state(None);
        st.set_dataset(dataset(2000..2002));
        st.set_load_error(&anyhow::anyhow!("file not found"));
        assert!(st.dataset.is_none());
        assert!(st.year.is_none());
        assert!(st.status_message.unwrap().contains("file not found"));
    }

    #[test]
    fn animation_cycles_through_years() {
        let years = [2019, 2020, 2021];
        let step = Duration::from_secs(1);
        let mut anim = Animation::default();
        anim.start(&years, Some(2020), 0.0);

        assert_eq!(anim.tick(&years, 0.5, step), None);
        assert_eq!(anim.tick(&years, 1.0, step), Some(2020));
        assert_eq!(anim.tick(&years, 2.0, step), Some(2021));
        assert_eq!(anim.tick(&years, 3.0, step), Some(2019));
        assert_eq!(anim.tick(&years, 4.0, step), Some(2020));
    }

    #[test]
    fn animation_starts_at_first_year_when_current_unknown() {
        let years = [2019, 2020];
        let mut anim = Animation::default();
        anim.start(&years, Some(1990), 0.0);
        assert_eq!(anim.tick(&years, 1.0, Duration::from_secs(1)), Some(2019));
    }

    #[test]
    fn start_while_playing_is_a_no_op() {
        let years = [2019, 2020, 2021];
        let step = Duration::from_secs(1);
        let mut anim = Animation::default();
        anim.start(&years, Some(2019), 0.0);
        anim.start(&years, Some(2021), 0.5);
        assert_eq!(anim.tick(&years, 1.0, step), Some(2019));
    }

    #[test]
    fn paused_animation_never_ticks() {
        let years = [2019, 2020];
        let mut anim = Animation::default();
        assert_eq!(anim.tick(&years, 10.0, Duration::from_secs(1)), None);
        anim.start(&years, None, 0.0);
        anim.stop();
        assert!(!anim.is_playing());
        assert_eq!(anim.tick(&years, 10.0, Duration::from_secs(1)), None);
    }

    #[test]
    fn state_tick_updates_year() {
        let mut st = state(None);
        st.set_dataset(dataset(2019..2022));
        st.play(0.0);
        assert!(!st.tick(1.0));
        assert_eq!(st.year, Some(2021));
        assert!(st.tick(2.0));
        assert_eq!(st.year, Some(2019));
    }
}
