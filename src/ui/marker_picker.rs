// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker category picker.
//!
//! A small window listing the marker categories. Picking one places a
//! marker at the current location.

use crate::models::geo::MarkerCategory;
use crate::ui::icons::{IconKey, IconResolver};

/// Result of the picker this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Picked(MarkerCategory),
    Cancelled,
}

/// Display the picker while `open` is set.
pub fn show(ctx: &egui::Context, open: &mut bool, icons: &dyn IconResolver) -> PickerAction {
    if !*open {
        return PickerAction::None;
    }

    let mut action = PickerAction::None;
    egui::Window::new("Select Marker")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for category in MarkerCategory::ALL {
                    let clicked = match icons.resolve(IconKey::Marker(category)) {
                        Some(icon) => ui
                            .add(egui::Button::image_and_text(
                                egui::Image::new((icon.texture, egui::vec2(32.0, 32.0))),
                                category.label(),
                            ))
                            .clicked(),
                        None => ui.button(category.label()).clicked(),
                    };
                    if clicked {
                        action = PickerAction::Picked(category);
                    }
                }
            });
            ui.separator();
            if ui.button("Cancel").clicked() {
                action = PickerAction::Cancelled;
            }
        });

    // Any choice dismisses the sheet
    if action != PickerAction::None {
        *open = false;
    }
    action
}
