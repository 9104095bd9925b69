// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geographic data structures.
//!
//! This module defines the core data structures for representing
//! GPS fixes and the category markers the user drops along a route.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point from latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Point reached by moving `north_m` metres north and `east_m` metres east.
    ///
    /// Uses a local flat-earth approximation, which is fine for the few
    /// metres a walker covers between fixes.
    pub fn offset_by_meters(&self, north_m: f64, east_m: f64) -> Self {
        let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
        let d_lon = (east_m / (EARTH_RADIUS_M * self.latitude.to_radians().cos())).to_degrees();
        Self::new(self.latitude + d_lat, self.longitude + d_lon)
    }
}

/// Category of a user-placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    Camping,
    Mushrooms,
    Berries,
}

impl MarkerCategory {
    /// Every category, in picker order.
    pub const ALL: [MarkerCategory; 3] = [
        MarkerCategory::Mushrooms,
        MarkerCategory::Berries,
        MarkerCategory::Camping,
    ];

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerCategory::Camping => "Camping",
            MarkerCategory::Mushrooms => "Mushrooms",
            MarkerCategory::Berries => "Berries",
        }
    }

    /// File stem of the icon asset for this category.
    pub fn asset_stem(&self) -> &'static str {
        match self {
            MarkerCategory::Camping => "camping",
            MarkerCategory::Mushrooms => "mushrooms",
            MarkerCategory::Berries => "berries",
        }
    }
}

/// A point of interest dropped by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: GeoPoint,
    pub category: MarkerCategory,
}

impl Marker {
    /// Create a new marker of the given category.
    pub fn new(position: GeoPoint, category: MarkerCategory) -> Self {
        Self { position, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = GeoPoint::new(55.75, 37.62);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        // One degree of arc on the mean sphere
        assert!((a.distance_to(&b) - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn test_offset_by_meters_matches_distance() {
        let origin = GeoPoint::new(60.0, 30.0);
        let north = origin.offset_by_meters(12.0, 0.0);
        let east = origin.offset_by_meters(0.0, 8.0);

        assert!((origin.distance_to(&north) - 12.0).abs() < 0.01);
        assert!((origin.distance_to(&east) - 8.0).abs() < 0.01);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&MarkerCategory::Mushrooms).unwrap();
        assert_eq!(json, "\"mushrooms\"");
    }
}
