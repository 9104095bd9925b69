// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Compass arrow pointing toward the target marker.

/// Triangle of the arrow: tip, then the two rear corners.
///
/// At zero bearing the tip points straight up; positive bearings turn it
/// clockwise.
pub fn arrow_points(center: egui::Pos2, radius: f32, bearing_deg: f32) -> [egui::Pos2; 3] {
    let rot = egui::emath::Rot2::from_angle(bearing_deg.to_radians());
    [
        center + rot * egui::vec2(0.0, -radius),
        center + rot * egui::vec2(-radius * 0.45, radius * 0.6),
        center + rot * egui::vec2(radius * 0.45, radius * 0.6),
    ]
}

/// Draw the compass dial into `rect`.
pub fn paint(painter: &egui::Painter, rect: egui::Rect, bearing_deg: f32, has_target: bool) {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0 - 2.0;

    painter.circle_filled(center, radius, egui::Color32::from_white_alpha(220));
    painter.circle_stroke(center, radius, egui::Stroke::new(2.0, egui::Color32::DARK_GRAY));

    let color = if has_target {
        egui::Color32::from_rgb(211, 47, 47)
    } else {
        egui::Color32::GRAY
    };
    let points = arrow_points(center, radius * 0.8, bearing_deg);
    painter.add(egui::Shape::convex_polygon(
        points.to_vec(),
        color,
        egui::Stroke::new(1.0, egui::Color32::BLACK),
    ));
}

/// Show the compass as a floating overlay in the top-right corner.
pub fn show(ctx: &egui::Context, bearing_deg: f32, has_target: bool) {
    egui::Area::new(egui::Id::new("compass"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 60.0))
        .interactable(false)
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(72.0, 72.0), egui::Sense::hover());
            paint(ui.painter(), rect, bearing_deg, has_target);
        });
}
