use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::RangeBounds;
use crate::data::normalize::ColumnMap;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "SISMO_CONFIG";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Source column names.
    pub columns: ColumnMap,
    /// Magnitude range shown on the map before the user touches the slider.
    pub initial_bounds: RangeBounds,
    /// Slider increment.
    pub slider_step: f64,
    /// Catalog opened at startup, if any.
    pub data_file: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            initial_bounds: RangeBounds::default(),
            slider_step: 0.6,
            data_file: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from `$SISMO_CONFIG` (defaults when unset), with an optional
    /// catalog path from the command line taking precedence.
    pub fn from_env(cli_data_file: Option<PathBuf>) -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path))?,
            None => Self::default(),
        };
        if cli_data_file.is_some() {
            config.data_file = cli_data_file;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "slider_step": 0.5, "columns": {{ "magnitude": "Mag" }} }}"#
        )
        .unwrap();

        let config = ViewerConfig::from_path(file.path()).unwrap();
        assert_eq!(config.slider_step, 0.5);
        assert_eq!(config.columns.magnitude, "Mag");
        assert_eq!(config.columns.timestamp, "Fecha");
        assert_eq!(config.initial_bounds, RangeBounds::new(3.0, 4.0));
        assert_eq!(config.data_file, None);
    }

    #[test]
    fn bad_json_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();
        assert!(ViewerConfig::from_path(file.path()).is_err());
    }

    #[test]
    fn defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.slider_step, 0.6);
        assert_eq!(config.columns.status, "Estatus");
        assert_eq!(config.columns.time, None);
    }
}
