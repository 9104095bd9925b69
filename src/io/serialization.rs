// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! YAML/JSON document loading.
//!
//! This module reads configuration and track files, choosing the format
//! from the file extension.

use crate::models::geo::GeoPoint;
use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Parse a document from a string.
pub fn parse<T: DeserializeOwned>(text: &str, format: Format) -> Result<T> {
    let data = match format {
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    };
    Ok(data)
}

/// Read and parse a YAML or JSON document.
pub fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse(&text, format)
}

/// Import a recorded track: a list of `{latitude, longitude}` entries.
pub fn import_track(path: &Path) -> Result<Vec<GeoPoint>> {
    let points: Vec<GeoPoint> = import(path)?;
    if points.is_empty() {
        bail!("Track {} contains no points", path.display());
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(&PathBuf::from("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(&PathBuf::from("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(&PathBuf::from("a.json")).unwrap(), Format::Json);
        assert!(Format::from_path(&PathBuf::from("a.gpx")).is_err());
        assert!(Format::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn test_parse_track_yaml() {
        let yaml = "- latitude: 59.93\n  longitude: 30.31\n- latitude: 59.94\n  longitude: 30.32\n";
        let points: Vec<GeoPoint> = parse(yaml, Format::Yaml).unwrap();
        assert_eq!(
            points,
            vec![GeoPoint::new(59.93, 30.31), GeoPoint::new(59.94, 30.32)]
        );
    }

    #[test]
    fn test_import_track_json_file() {
        let path = std::env::temp_dir().join("trailmark-track-test.json");
        std::fs::write(&path, r#"[{"latitude": 1.5, "longitude": -2.25}]"#).unwrap();

        let points = import_track(&path).unwrap();
        assert_eq!(points, vec![GeoPoint::new(1.5, -2.25)]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_track_is_error() {
        let path = std::env::temp_dir().join("trailmark-empty-track.json");
        std::fs::write(&path, "[]").unwrap();

        assert!(import_track(&path).is_err());

        let _ = std::fs::remove_file(&path);
    }
}
