// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Route recording state.
//!
//! This module tracks whether a route is being recorded, where the user
//! is, which marker they are heading for and the compass bearing toward
//! it. Recorded points and markers themselves live on the canvas.

use crate::models::geo::{GeoPoint, MarkerCategory};
use crate::ui::canvas::{CanvasHost, RouteCanvas};
use crate::util::bearing::relative_bearing;

/// Live state of the route session.
#[derive(Debug, Clone, Default)]
pub struct RouteState {
    /// Whether fixes are recorded and the canvas is drawn
    pub active: bool,
    pub current_location: Option<GeoPoint>,
    pub target_location: Option<GeoPoint>,
    pub last_recorded_point: Option<GeoPoint>,
    /// Fix the compass last measured movement from
    previous_fix: Option<GeoPoint>,
    /// Compass rotation in degrees, clockwise positive
    bearing_deg: f32,
    /// Messages waiting to be shown to the user
    notices: Vec<String>,
}

impl RouteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearing_deg(&self) -> f32 {
        self.bearing_deg
    }

    /// Begin a fresh route.
    ///
    /// Clears the canvas and drops a camping marker at the current
    /// location, if known, which also becomes the target.
    pub fn start(&mut self, canvas: &mut RouteCanvas) {
        canvas.clear();
        self.last_recorded_point = None;
        self.active = true;
        log::info!("Route started");

        if let Some(current) = self.current_location {
            canvas.add_marker(current, MarkerCategory::Camping);
            self.select_target(current);
        }
    }

    /// Stop recording. The canvas keeps its contents but is no longer drawn.
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            log::info!("Route stopped");
        }
    }

    /// Handle a fix from the location provider.
    ///
    /// Returns true when the fix was recorded as a route point.
    pub fn on_location(
        &mut self,
        fix: GeoPoint,
        canvas: &mut RouteCanvas,
        min_record_distance_m: f64,
    ) -> bool {
        if !self.active {
            return false;
        }

        self.current_location = Some(fix);

        let recorded = match self.last_recorded_point {
            None => true,
            Some(last) => last.distance_to(&fix) >= min_record_distance_m,
        };
        if recorded {
            canvas.add_route_point(fix);
            self.last_recorded_point = Some(fix);
        }

        if self.target_location.is_some() {
            self.update_compass();
        }

        canvas.invalidate();
        recorded
    }

    /// Drop a marker at the current location.
    ///
    /// Returns false when there is no fix yet.
    pub fn add_marker_here(&mut self, category: MarkerCategory, canvas: &mut RouteCanvas) -> bool {
        match self.current_location {
            Some(current) => {
                canvas.add_marker(current, category);
                true
            }
            None => {
                log::warn!("No location fix yet, {} marker not placed", category.label());
                false
            }
        }
    }

    /// Recompute the bearing from the last movement toward the target.
    ///
    /// A stationary user (or one standing on the target) keeps the
    /// previous bearing.
    fn update_compass(&mut self) {
        if let (Some(previous), Some(current), Some(target)) =
            (self.previous_fix, self.current_location, self.target_location)
        {
            if let Some(bearing) = relative_bearing(&previous, &current, &target) {
                self.bearing_deg = bearing;
            }
        }
        self.previous_fix = self.current_location;
    }

    /// Drain messages for the user.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }
}

impl CanvasHost for RouteState {
    fn is_route_active(&self) -> bool {
        self.active
    }

    fn select_target(&mut self, point: GeoPoint) {
        self.target_location = Some(point);
        if self.active {
            self.update_compass();
        }
        log::info!(
            "Target set: ({:.6}, {:.6})",
            point.latitude,
            point.longitude
        );
        self.push_notice(format!(
            "Target set: latitude {:.6}, longitude {:.6}",
            point.latitude, point.longitude
        ));
    }
}
