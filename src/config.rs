use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::classify::ClassifierMode;
use crate::data::stats::DEFAULT_TOP_CATEGORIES;
use crate::data::view::DEFAULT_CHART_WINDOW;

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "GURU_METRICS_CONFIG";

// ---------------------------------------------------------------------------
// Application settings
// ---------------------------------------------------------------------------

/// Tunables for the analysis. Every field may be omitted from the file.
///
/// ```json
/// { "chart_window": 100, "top_categories": 5, "classifier": "full_scan" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Number of leading rows plotted in the trend and comparison charts.
    pub chart_window: usize,
    /// Number of categories kept in the distribution chart.
    pub top_categories: usize,
    pub classifier: ClassifierMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chart_window: DEFAULT_CHART_WINDOW,
            top_categories: DEFAULT_TOP_CATEGORIES,
            classifier: ClassifierMode::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Settings from the file named by [`CONFIG_ENV`], or defaults when the
    /// variable is unset. A bad file is logged and ignored.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_fields_take_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "top_categories": 3 }"#).unwrap();
        assert_eq!(config.top_categories, 3);
        assert_eq!(config.chart_window, DEFAULT_CHART_WINDOW);
        assert_eq!(config.classifier, ClassifierMode::FirstRow);
    }

    #[test]
    fn reads_classifier_mode_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "classifier": "full_scan", "chart_window": 50 }}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.classifier, ClassifierMode::FullScan);
        assert_eq!(config.chart_window, 50);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = serde_json::from_str::<AppConfig>(r#"{ "window": 10 }"#);
        assert!(err.is_err());
    }
}
