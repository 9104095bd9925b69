// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Files are YAML or JSON, picked by extension.

use crate::io::serialization;
use crate::models::geo::GeoPoint;
use crate::util::transform::{MAX_SCALE, MIN_SCALE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "trailmark.yaml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub recording: RecordingConfig,
    pub location: LocationConfig,
    pub view: ViewConfig,
    pub icons: IconConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 800.0,
        }
    }
}

/// When a fix is added to the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Minimum distance from the last recorded point, in metres.
    pub min_record_distance_m: f64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            min_record_distance_m: 10.0,
        }
    }
}

/// Location provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Whether the user has granted location access.
    pub permission_granted: bool,
    /// Minimum time between delivered fixes, in milliseconds.
    pub min_interval_ms: u64,
    /// Minimum displacement between delivered fixes, in metres.
    pub min_distance_m: f64,
    /// How often the provider produces a raw fix, in milliseconds.
    pub tick_ms: u64,
    /// Track to replay instead of the simulated walk.
    pub track_file: Option<PathBuf>,
    /// Start of the simulated walk.
    pub origin: GeoPoint,
    /// Walking speed of the simulated walk, in metres per second.
    pub walking_speed_mps: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            permission_granted: true,
            min_interval_ms: 2000,
            min_distance_m: 5.0,
            tick_ms: 1000,
            track_file: None,
            origin: GeoPoint::new(60.1699, 24.9384),
            walking_speed_mps: 1.4,
        }
    }
}

/// Canvas behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Per-axis tap distance for hitting a marker, in render pixels.
    pub hit_threshold_px: f32,
    /// Size of the live position icon relative to its natural size.
    pub current_marker_scale: f32,
    pub line_width: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            hit_threshold_px: 50.0,
            current_marker_scale: 0.5,
            line_width: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Directory holding `camping.png`, `mushrooms.png`, `berries.png`
    /// and `user_marker.png`.
    pub dir: Option<PathBuf>,
}

impl ViewConfig {
    /// Zoom limits usable as a clamp range.
    ///
    /// Non-finite or non-positive limits fall back to the defaults and
    /// inverted limits are swapped.
    pub fn normalized(mut self) -> Self {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.min_scale) {
            log::warn!("Invalid view.min_scale {}, using {}", self.min_scale, MIN_SCALE);
            self.min_scale = MIN_SCALE;
        }
        if !valid(self.max_scale) {
            log::warn!("Invalid view.max_scale {}, using {}", self.max_scale, MAX_SCALE);
            self.max_scale = MAX_SCALE;
        }
        if self.min_scale > self.max_scale {
            log::warn!(
                "view.min_scale {} exceeds view.max_scale {}, swapping",
                self.min_scale,
                self.max_scale
            );
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        self
    }
}

/// Load configuration from a YAML or JSON file.
pub fn load(path: &Path) -> Result<AppConfig> {
    let mut config: AppConfig = serialization::import(path)?;
    config.view = config.view.normalized();
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the configuration for this run.
///
/// An explicit path must load; otherwise `trailmark.yaml` is used when
/// present. Anything unreadable falls back to defaults.
pub fn resolve(explicit: Option<&Path>) -> AppConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                return AppConfig::default();
            }
            default_path
        }
    };

    match load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config {}: {}", path.display(), e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::serialization::{parse, Format};

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.recording.min_record_distance_m, 10.0);
        assert_eq!(config.location.min_interval_ms, 2000);
        assert_eq!(config.location.min_distance_m, 5.0);
        assert_eq!(config.view.min_scale, 0.1);
        assert_eq!(config.view.max_scale, 5.0);
        assert_eq!(config.view.hit_threshold_px, 50.0);
        assert!(config.location.permission_granted);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml =
            "recording:\n  min_record_distance_m: 25.0\nlocation:\n  permission_granted: false\n";
        let config: AppConfig = parse(yaml, Format::Yaml).unwrap();

        assert_eq!(config.recording.min_record_distance_m, 25.0);
        assert!(!config.location.permission_granted);
        assert_eq!(config.location.min_interval_ms, 2000);
        assert_eq!(config.view, ViewConfig::default());
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"view": {"hit_threshold_px": 30.0}, "icons": {"dir": "assets/icons"}}"#;
        let config: AppConfig = parse(json, Format::Json).unwrap();

        assert_eq!(config.view.hit_threshold_px, 30.0);
        assert_eq!(config.view.max_scale, 5.0);
        assert_eq!(config.icons.dir, Some(PathBuf::from("assets/icons")));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = AppConfig::default();
        config.location.track_file = Some(PathBuf::from("walk.yaml"));
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: AppConfig = parse(&yaml, Format::Yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_inverted_scale_limits_are_swapped() {
        let path = std::env::temp_dir().join("trailmark-inverted-scale.yaml");
        std::fs::write(&path, "view:\n  min_scale: 4.0\n  max_scale: 2.0\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.view.min_scale, 2.0);
        assert_eq!(config.view.max_scale, 4.0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_nan_scale_limits_fall_back() {
        let yaml = "view:\n  min_scale: .nan\n  max_scale: -3.0\n";
        let config: AppConfig = parse(yaml, Format::Yaml).unwrap();

        let view = config.view.normalized();
        assert_eq!(view.min_scale, MIN_SCALE);
        assert_eq!(view.max_scale, MAX_SCALE);
    }

    #[test]
    fn test_valid_scale_limits_untouched() {
        let view = ViewConfig {
            min_scale: 0.5,
            max_scale: 3.0,
            ..ViewConfig::default()
        };
        assert_eq!(view.clone().normalized(), view);
    }

    #[test]
    fn test_broken_explicit_config_falls_back() {
        let path = std::env::temp_dir().join("trailmark-broken-config.yaml");
        std::fs::write(&path, "view: [not, a, map]").unwrap();

        assert_eq!(resolve(Some(&path)), AppConfig::default());

        let _ = std::fs::remove_file(&path);
    }
}
