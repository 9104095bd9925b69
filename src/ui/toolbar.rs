// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with route controls.
//!
//! This module provides the button row for starting and stopping a
//! route, placing markers and adjusting the view.

/// Button pressed in the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    StartRoute,
    StopRoute,
    OpenMarkerPicker,
    CenterOnMe,
    ZoomIn,
    ZoomOut,
    ResetView,
}

/// Route summary shown beside the buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStatus {
    pub active: bool,
    pub has_fix: bool,
    pub points: usize,
    pub markers: usize,
    pub zoom: f32,
}

impl RouteStatus {
    /// One-line description of the recording state.
    pub fn summary(&self) -> String {
        match (self.active, self.has_fix) {
            (false, _) => "Not recording".to_string(),
            (true, false) => "Recording, waiting for GPS fix".to_string(),
            (true, true) => format!(
                "Recording: {} points, {} markers, zoom {:.1}x",
                self.points, self.markers, self.zoom
            ),
        }
    }
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, status: &RouteStatus) -> ToolbarAction {
    let active = status.active;
    let has_fix = status.has_fix;
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // Start always begins a fresh route
        if ui.button("▶ Start").clicked() {
            action = ToolbarAction::StartRoute;
        }

        if ui.add_enabled(active, egui::Button::new("■ Stop")).clicked() {
            action = ToolbarAction::StopRoute;
        }

        ui.separator();

        if ui.button("📍 Marker").clicked() {
            action = ToolbarAction::OpenMarkerPicker;
        }

        if ui
            .add_enabled(active && has_fix, egui::Button::new("◎ Center"))
            .clicked()
        {
            action = ToolbarAction::CenterOnMe;
        }

        ui.separator();

        if ui.button("+").clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui.button("−").clicked() {
            action = ToolbarAction::ZoomOut;
        }
        if ui.button("Reset").clicked() {
            action = ToolbarAction::ResetView;
        }

        ui.separator();

        ui.label(egui::RichText::new(status.summary()).italics().weak());
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_reports_counts_while_recording() {
        let status = RouteStatus {
            active: true,
            has_fix: true,
            points: 12,
            markers: 3,
            zoom: 1.5,
        };
        assert_eq!(status.summary(), "Recording: 12 points, 3 markers, zoom 1.5x");
    }

    #[test]
    fn test_summary_when_idle() {
        let status = RouteStatus {
            active: false,
            has_fix: true,
            points: 0,
            markers: 0,
            zoom: 1.0,
        };
        assert_eq!(status.summary(), "Not recording");
    }
}
