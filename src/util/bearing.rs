// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Compass bearing toward a target.
//!
//! The bearing is the signed angle between the walker's last movement
//! vector and the vector from the current fix to the target, measured in
//! raw (longitude, latitude) degrees. Positive values turn the arrow
//! clockwise on screen.

use crate::models::geo::GeoPoint;

/// Relative bearing in degrees, or `None` when either vector has zero length.
pub fn relative_bearing(
    previous: &GeoPoint,
    current: &GeoPoint,
    target: &GeoPoint,
) -> Option<f32> {
    let dx1 = current.longitude - previous.longitude;
    let dy1 = current.latitude - previous.latitude;

    let dx2 = target.longitude - current.longitude;
    let dy2 = target.latitude - current.latitude;

    if (dx1 == 0.0 && dy1 == 0.0) || (dx2 == 0.0 && dy2 == 0.0) {
        return None;
    }

    let cross = dx1 * dy2 - dy1 * dx2;
    let dot = dx1 * dx2 + dy1 * dy2;
    Some(-cross.atan2(dot).to_degrees() as f32)
}
