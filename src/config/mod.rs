use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::geometry::ProjectionKind;
use crate::layers::GraticuleConfig;

/// Default view settings used when neither the CLI nor a config file
/// provides a value.
pub mod defaults {
    pub const LAT: f64 = 0.0;
    pub const LON: f64 = 0.0;
    pub const ZOOM: f64 = 2.0;
    pub const HEADING: f64 = 0.0;
    pub const WIDTH: f64 = 800.0;
    pub const HEIGHT: f64 = 600.0;
}

fn default_zoom() -> f64 {
    defaults::ZOOM
}
fn default_heading() -> f64 {
    defaults::HEADING
}
fn default_width() -> f64 {
    defaults::WIDTH
}
fn default_height() -> f64 {
    defaults::HEIGHT
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub projection: ProjectionKind,
    /// Overrides the projection's default CRS identifier
    #[serde(default)]
    pub crs_id: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_heading")]
    pub heading: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub graticule: GraticuleConfig,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the first config file found in the search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => {
                    warn!("Ignoring config file {}: {:#}", path.display(), e);
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("graticule.toml"));
    paths.push(PathBuf::from(".graticule.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("graticule").join("config.toml"));
        paths.push(config_dir.join("graticule.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".graticule.toml"));
        paths.push(home.join(".config").join("graticule").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.projection, ProjectionKind::WebMercator);
        assert_eq!(config.zoom, defaults::ZOOM);
        assert_eq!(config.width, defaults::WIDTH);
        assert_eq!(config.height, defaults::HEIGHT);
        assert_eq!(config.graticule, GraticuleConfig::default());
        assert!(config.lat.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            projection = "gnomonic"
            crs_id = "AUTO2:97001"
            lat = 51.5
            lon = -0.12
            zoom = 9.5
            heading = 45.0
            width = 1024
            height = 768
            output = "grid.json"

            [graticule]
            min_line_distance = 200.0
            show_labels = false
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.projection, ProjectionKind::Gnomonic);
        assert_eq!(config.crs_id.as_deref(), Some("AUTO2:97001"));
        assert_eq!(config.lat, Some(51.5));
        assert_eq!(config.lon, Some(-0.12));
        assert_eq!(config.zoom, 9.5);
        assert_eq!(config.heading, 45.0);
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.output, Some(PathBuf::from("grid.json")));
        assert_eq!(config.graticule.min_line_distance, 200.0);
        assert!(!config.graticule.show_labels);
    }

    #[test]
    fn test_partial_graticule_table() {
        let config: FileConfig = toml::from_str("[graticule]\nshow_labels = false\n").unwrap();
        assert_eq!(config.graticule.min_line_distance, 150.0);
        assert!(!config.graticule.show_labels);
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graticule.toml");
        fs::write(&path, "projection = \"orthographic\"\nzoom = 4.0\n").unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert_eq!(config.projection, ProjectionKind::Orthographic);
        assert_eq!(config.zoom, 4.0);
    }

    #[test]
    fn test_from_path_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "zoom = \"high\"\n").unwrap();

        let err = FileConfig::from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }
}
