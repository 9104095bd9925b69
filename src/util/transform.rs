// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pan/zoom view transform for the route canvas.
//!
//! Render space is the projected canvas (0..width, 0..height). The view
//! maps it to the screen as `translate + focus + p * scale`, relative to
//! the canvas origin.

/// Default lower zoom limit.
pub const MIN_SCALE: f32 = 0.1;
/// Default upper zoom limit.
pub const MAX_SCALE: f32 = 5.0;

/// Current pan/zoom state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub focus_x: f32,
    pub focus_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            focus_x: 0.0,
            focus_y: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Total offset applied before scaling.
    pub fn offset(&self) -> egui::Vec2 {
        egui::vec2(self.translate_x + self.focus_x, self.translate_y + self.focus_y)
    }

    /// Apply a pinch step, keeping the scale within `[min, max]`.
    pub fn pinch(&mut self, delta: f32, min: f32, max: f32) {
        self.scale = (self.scale * delta).clamp(min, max);
    }

    /// Apply a scroll gesture.
    ///
    /// `distance` is the previous pointer position minus the current one,
    /// so dragging the content right gives a negative x distance.
    pub fn scroll(&mut self, distance: egui::Vec2) {
        self.translate_x -= distance.x / self.scale;
        self.translate_y -= distance.y / self.scale;
    }

    /// Map a render-space point to a position relative to the canvas origin.
    pub fn to_screen(&self, render_pos: egui::Pos2) -> egui::Pos2 {
        egui::Pos2::ZERO + self.offset() + render_pos.to_vec2() * self.scale
    }

    /// Inverse of [`Self::to_screen`].
    pub fn to_render(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        ((screen_pos.to_vec2() - self.offset()) / self.scale).to_pos2()
    }

    /// Move the focus so that `render_pos` shows up at `screen_target`.
    pub fn focus_on(&mut self, render_pos: egui::Pos2, screen_target: egui::Pos2) {
        self.focus_x = screen_target.x - self.translate_x - render_pos.x * self.scale;
        self.focus_y = screen_target.y - self.translate_y - render_pos.y * self.scale;
    }
}
