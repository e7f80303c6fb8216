use eframe::egui::{self, Color32};

/// Storage key under which the theme string is persisted.
pub const THEME_KEY: &str = "theme";

/// Light / dark appearance, persisted across runs as `"light"` / `"dark"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Read the saved theme; unknown or missing values fall back to light.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|s| s.get_string(THEME_KEY))
            .and_then(|s| Theme::parse(&s))
            .unwrap_or_default()
    }

    pub fn store(self, storage: &mut dyn eframe::Storage) {
        storage.set_string(THEME_KEY, self.as_str().to_string());
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }

    /// Foreground colour for labels painted directly on a canvas.
    pub fn text_color(self) -> Color32 {
        match self {
            Theme::Light => Color32::BLACK,
            Theme::Dark => Color32::WHITE,
        }
    }

    /// Button caption offering the other theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark",
            Theme::Dark => "☀ Light",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct MemoryStorage(HashMap<String, String>);

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn parse_round_trips() {
        for t in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(t.as_str()), Some(t));
        }
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn defaults_to_light() {
        assert_eq!(Theme::load(None), Theme::Light);
        let mut storage = MemoryStorage::default();
        storage.0.insert(THEME_KEY.to_string(), "purple".to_string());
        assert_eq!(Theme::load(Some(&storage as &dyn eframe::Storage)), Theme::Light);
    }

    #[test]
    fn persists_through_storage() {
        let mut storage = MemoryStorage::default();
        Theme::Dark.store(&mut storage);
        assert_eq!(storage.0.get(THEME_KEY).map(String::as_str), Some("dark"));
        assert_eq!(Theme::load(Some(&storage as &dyn eframe::Storage)), Theme::Dark);
    }
}
