use std::path::{Path, PathBuf};

use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::GeoCoord;

pub const API_URL_VAR: &str = "RANCHER_API_URL";
pub const API_TOKEN_VAR: &str = "RANCHER_API_TOKEN";

const SETTINGS_FILE: &str = "settings.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Read from `settings.ron` in the config directory, with the API values
/// overridable from the environment.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    /// Asset path of the map background.
    pub map_image: String,
    pub center: GeoCoord,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            request_timeout_ms: 1000,
            map_image: "map.png".to_string(),
            center: GeoCoord::default(),
            zoom: 2.0,
            min_zoom: 0.0,
            max_zoom: 6.0,
        }
    }
}

impl Settings {
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "slime-rancher-assistant")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings: Self = ron::from_str(&text)?;
        Ok(settings.with_valid_zoom())
    }

    /// Replaces a zoom range that can't be clamped to with the default one.
    fn with_valid_zoom(mut self) -> Self {
        let valid = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom <= self.max_zoom;
        if !valid {
            let default = Self::default();
            warn!(
                "Invalid zoom range {}..{}, using {}..{}",
                self.min_zoom, self.max_zoom, default.min_zoom, default.max_zoom
            );
            self.min_zoom = default.min_zoom;
            self.max_zoom = default.max_zoom;
        }
        if !self.zoom.is_finite() {
            self.zoom = Self::default().zoom;
        }
        self
    }

    /// Never fails. A missing file means defaults, a broken one is reported
    /// and then ignored.
    pub fn load() -> Self {
        let from_file = match Self::config_dir().map(|dir| dir.join(SETTINGS_FILE)) {
            Some(path) if path.is_file() => match Self::read(&path) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    warn!("Ignoring {}: {err}", path.display());
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        from_file.with_env(|key| std::env::var(key).ok())
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());
        if let Some(url) = non_empty(API_URL_VAR) {
            self.api_url = Some(url);
        }
        if let Some(token) = non_empty(API_TOKEN_VAR) {
            self.api_token = Some(token);
        }
        self
    }

    /// Never panics, even if the bounds were set by hand to something
    /// inverted.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }
}
