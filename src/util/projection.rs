// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geographic to canvas projection.
//!
//! This module maintains the bounding box of everything recorded on the
//! current route and maps latitude/longitude into canvas pixels relative
//! to that box. North is up: larger latitudes map to smaller pixel y.

use crate::models::geo::GeoPoint;

/// Minimal lat/lon rectangle containing all recorded points and markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Create an empty box with sentinel bounds.
    pub fn new() -> Self {
        Self {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        }
    }

    /// True until the first point has been added.
    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    /// Grow the box so that it contains `point`.
    pub fn extend(&mut self, point: &GeoPoint) {
        self.min_lat = self.min_lat.min(point.latitude);
        self.max_lat = self.max_lat.max(point.latitude);
        self.min_lon = self.min_lon.min(point.longitude);
        self.max_lon = self.max_lon.max(point.longitude);
    }

    /// Reset to the empty sentinel state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Project a longitude onto the x axis of a canvas `width` pixels wide.
///
/// A zero-width span (single point, or a perfectly vertical path) lands
/// on the horizontal centre.
pub fn project_x(longitude: f64, min_lon: f64, max_lon: f64, width: f32) -> f32 {
    let span = max_lon - min_lon;
    if !span.is_finite() || span <= 0.0 {
        return width / 2.0;
    }
    ((longitude - min_lon) / span * width as f64) as f32
}

/// Project a latitude onto the y axis of a canvas `height` pixels tall.
///
/// A zero-height span lands on the vertical centre.
pub fn project_y(latitude: f64, min_lat: f64, max_lat: f64, height: f32) -> f32 {
    let span = max_lat - min_lat;
    if !span.is_finite() || span <= 0.0 {
        return height / 2.0;
    }
    ((max_lat - latitude) / span * height as f64) as f32
}

/// Projects points against a bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteProjector {
    bounds: BoundingBox,
}

impl RouteProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn extend(&mut self, point: &GeoPoint) {
        self.bounds.extend(point);
    }

    pub fn reset(&mut self) {
        self.bounds.reset();
    }

    /// Map `point` into a canvas of the given size.
    pub fn project(&self, point: &GeoPoint, size: egui::Vec2) -> egui::Pos2 {
        let b = &self.bounds;
        let x = project_x(point.longitude, b.min_lon, b.max_lon, size.x);
        let y = project_y(point.latitude, b.min_lat, b.max_lat, size.y);
        log::trace!(
            "Projected ({:.6}, {:.6}) to ({:.1}, {:.1})",
            point.latitude,
            point.longitude,
            x,
            y
        );
        egui::pos2(x, y)
    }
}
