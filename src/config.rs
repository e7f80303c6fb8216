use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the dataset path.
pub const ENV_DATA: &str = "EURODASH_DATA";
/// Keep only the most recent N years (unset: keep all).
pub const ENV_YEAR_WINDOW: &str = "EURODASH_YEAR_WINDOW";
/// Bubble animation step in milliseconds.
pub const ENV_ANIMATION_MS: &str = "EURODASH_ANIMATION_MS";

/// Startup configuration for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// When set, only the most recent `n` years are offered.
    pub year_window: Option<usize>,
    /// Delay between animation steps.
    pub animation_interval: Duration,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("media/eurostat.json"),
            year_window: None,
            animation_interval: Duration::from_millis(1000),
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `EURODASH_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    /// Unparsable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(ENV_YEAR_WINDOW) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.year_window = Some(n),
                _ => log::warn!("Ignoring {ENV_YEAR_WINDOW}={raw:?}: expected a positive integer"),
            }
        }

        if let Some(raw) = lookup(ENV_ANIMATION_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.animation_interval = Duration::from_millis(ms),
                _ => log::warn!("Ignoring {ENV_ANIMATION_MS}={raw:?}: expected milliseconds > 0"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.year_window, None);
        assert_eq!(cfg.animation_interval, Duration::from_secs(1));
    }

    #[test]
    fn reads_overrides() {
        let cfg = DashboardConfig::from_lookup(lookup(&[
            (ENV_DATA, "/tmp/rows.csv"),
            (ENV_YEAR_WINDOW, "15"),
            (ENV_ANIMATION_MS, "250"),
        ]));
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/rows.csv"));
        assert_eq!(cfg.year_window, Some(15));
        assert_eq!(cfg.animation_interval, Duration::from_millis(250));
    }

    #[test]
    fn ignores_bad_values() {
        let cfg = DashboardConfig::from_lookup(lookup(&[
            (ENV_YEAR_WINDOW, "fifteen"),
            (ENV_ANIMATION_MS, "0"),
        ]));
        assert_eq!(cfg.year_window, None);
        assert_eq!(cfg.animation_interval, Duration::from_millis(1000));
    }
}
