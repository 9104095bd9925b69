// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Route canvas: the recorded path, markers and live position.
//!
//! The canvas owns the recorded points and markers, the bounding box they
//! span and the pan/zoom transform. Each frame it builds a [`RenderFrame`]
//! in render space (projected canvas pixels) which [`show`] then paints
//! through the transform. Pointer input comes back out as
//! [`CanvasAction`]s for the app to apply.

use crate::io::config::ViewConfig;
use crate::models::geo::{GeoPoint, Marker, MarkerCategory};
use crate::ui::icons::{IconKey, IconResolver, DEFAULT_ICON_SIZE};
use crate::util::projection::{BoundingBox, RouteProjector};
use crate::util::transform::ViewTransform;

/// What the canvas needs from whoever hosts it.
pub trait CanvasHost {
    /// Whether a route is currently being recorded.
    fn is_route_active(&self) -> bool;

    /// Called when the user taps a marker.
    fn select_target(&mut self, point: GeoPoint);
}

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    /// Pointer went down at a position relative to the canvas origin.
    Tap(egui::Pos2),
    /// Scroll distance (previous minus current pointer position).
    Scroll(egui::Vec2),
    /// Multiplicative zoom step.
    Pinch(f32),
}

/// A single icon to draw, centred on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconDraw {
    pub key: IconKey,
    pub center: egui::Pos2,
    /// Fraction of the icon's natural size.
    pub scale: f32,
}

/// Everything needed to paint one frame, in render space.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub transform: ViewTransform,
    pub polyline: Vec<egui::Pos2>,
    pub icons: Vec<IconDraw>,
}

/// Recorded route plus view state.
pub struct RouteCanvas {
    route_points: Vec<GeoPoint>,
    markers: Vec<Marker>,
    projector: RouteProjector,
    transform: ViewTransform,
    view: ViewConfig,
    needs_redraw: bool,
}

impl RouteCanvas {
    pub fn new(view: ViewConfig) -> Self {
        Self {
            route_points: Vec::new(),
            markers: Vec::new(),
            projector: RouteProjector::new(),
            transform: ViewTransform::identity(),
            view: view.normalized(),
            needs_redraw: false,
        }
    }

    pub fn route_points(&self) -> &[GeoPoint] {
        &self.route_points
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[cfg(test)]
    pub fn bounds(&self) -> &BoundingBox {
        self.projector.bounds()
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Append a recorded point to the path.
    pub fn add_route_point(&mut self, point: GeoPoint) {
        self.route_points.push(point);
        self.projector.extend(&point);
        log::debug!(
            "Recorded point ({:.6}, {:.6}), total points: {}",
            point.latitude,
            point.longitude,
            self.route_points.len()
        );
        self.invalidate();
    }

    /// Drop a marker of the given category.
    pub fn add_marker(&mut self, point: GeoPoint, category: MarkerCategory) {
        self.markers.push(Marker::new(point, category));
        self.projector.extend(&point);
        log::info!(
            "Added {} marker at ({:.6}, {:.6}), total markers: {}",
            category.label(),
            point.latitude,
            point.longitude,
            self.markers.len()
        );
        self.invalidate();
    }

    /// Forget the route, markers, bounds and view.
    pub fn clear(&mut self) {
        self.route_points.clear();
        self.markers.clear();
        self.projector.reset();
        self.transform.reset();
        self.invalidate();
    }

    /// Request a repaint on the next frame.
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    /// Return and reset the pending repaint flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn pinch(&mut self, delta: f32) {
        self.transform.pinch(delta, self.view.min_scale, self.view.max_scale);
        self.invalidate();
    }

    pub fn scroll(&mut self, distance: egui::Vec2) {
        self.transform.scroll(distance);
        self.invalidate();
    }

    /// Back to the identity view, keeping the route.
    pub fn reset_view(&mut self) {
        self.transform.reset();
        self.invalidate();
    }

    /// Shift the view so that `point` sits at the centre of the canvas.
    pub fn center_on(&mut self, point: &GeoPoint, size: egui::Vec2) {
        if self.projector.bounds().is_empty() {
            return;
        }
        let render_pos = self.projector.project(point, size);
        self.transform.focus_on(render_pos, (size / 2.0).to_pos2());
        self.invalidate();
    }

    /// Hit-test a tap against the markers.
    ///
    /// `pos` is relative to the canvas origin. The first marker within the
    /// hit threshold on both axes becomes the host's target. Returns the
    /// selected marker position, if any.
    pub fn tap(
        &mut self,
        pos: egui::Pos2,
        size: egui::Vec2,
        host: &mut dyn CanvasHost,
    ) -> Option<GeoPoint> {
        if !host.is_route_active() {
            return None;
        }

        let render_pos = self.transform.to_render(pos);
        let threshold = self.view.hit_threshold_px;
        let hit = self.markers.iter().find(|marker| {
            let marker_pos = self.projector.project(&marker.position, size);
            (render_pos.x - marker_pos.x).abs() < threshold
                && (render_pos.y - marker_pos.y).abs() < threshold
        })?;

        let target = hit.position;
        host.select_target(target);
        self.invalidate();
        Some(target)
    }

    /// Build the display list for a canvas of the given size.
    ///
    /// Returns `None` while no route is active. Every point is projected
    /// against the current bounds, so earlier segments shift as the box
    /// grows.
    pub fn render(
        &self,
        size: egui::Vec2,
        current_location: Option<&GeoPoint>,
        active: bool,
    ) -> Option<RenderFrame> {
        if !active {
            return None;
        }

        let polyline = if self.route_points.len() > 1 {
            self.route_points
                .iter()
                .map(|p| self.projector.project(p, size))
                .collect()
        } else {
            Vec::new()
        };

        let mut icons: Vec<IconDraw> = self
            .markers
            .iter()
            .map(|marker| IconDraw {
                key: IconKey::Marker(marker.category),
                center: self.projector.project(&marker.position, size),
                scale: 1.0,
            })
            .collect();

        // Nothing to project against before the first recorded fix
        if let Some(current) = current_location.filter(|_| !self.projector.bounds().is_empty()) {
            icons.push(IconDraw {
                key: IconKey::CurrentPosition,
                center: self.projector.project(current, size),
                scale: self.view.current_marker_scale,
            });
        }

        Some(RenderFrame {
            transform: self.transform,
            polyline,
            icons,
        })
    }
}

/// Display the route canvas and collect pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    canvas: &RouteCanvas,
    current_location: Option<&GeoPoint>,
    active: bool,
    icons: &dyn IconResolver,
) -> (egui::Rect, Vec<CanvasAction>) {
    let mut actions = Vec::new();
    let available_size = ui.available_size();
    let (response, painter) = ui.allocate_painter(available_size, egui::Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(235));

    match canvas.render(rect.size(), current_location, active) {
        Some(frame) => paint_frame(&painter, rect, &frame, canvas.view.line_width, icons),
        None => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Press Start to record a route",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(130),
            );
        }
    }

    // Pointer down on the canvas is a tap candidate, even if a drag follows
    let pressed_at = ui.input(|i| {
        if i.pointer.primary_pressed() {
            i.pointer.interact_pos()
        } else {
            None
        }
    });
    if let Some(pos) = pressed_at.filter(|p| response.hovered() && rect.contains(*p)) {
        actions.push(CanvasAction::Tap((pos - rect.min).to_pos2()));
    }

    if response.dragged() {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            actions.push(CanvasAction::Scroll(-delta));
        }
    }

    if response.hovered() {
        let zoom = ui.input(|i| i.zoom_delta());
        if zoom != 1.0 {
            actions.push(CanvasAction::Pinch(zoom));
        }
    }

    (rect, actions)
}

/// Paint a render frame into `rect`.
fn paint_frame(
    painter: &egui::Painter,
    rect: egui::Rect,
    frame: &RenderFrame,
    line_width: f32,
    icons: &dyn IconResolver,
) {
    let transform = &frame.transform;
    let to_screen = |p: egui::Pos2| rect.min + transform.to_screen(p).to_vec2();

    if frame.polyline.len() > 1 {
        let points: Vec<egui::Pos2> = frame.polyline.iter().map(|p| to_screen(*p)).collect();
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(line_width * transform.scale, egui::Color32::RED),
        ));
    }

    for draw in &frame.icons {
        let center = to_screen(draw.center);
        let resolved = icons.resolve(draw.key);
        let natural = resolved
            .as_ref()
            .map(|icon| icon.size)
            .unwrap_or(egui::vec2(DEFAULT_ICON_SIZE, DEFAULT_ICON_SIZE));
        let icon_size = natural * draw.scale * transform.scale;
        let icon_rect = egui::Rect::from_center_size(center, icon_size);

        match resolved {
            Some(icon) => {
                painter.image(
                    icon.texture,
                    icon_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => draw_glyph(painter, draw.key, icon_rect),
        }
    }
}

/// Fallback drawing when no icon asset is available.
fn draw_glyph(painter: &egui::Painter, key: IconKey, icon_rect: egui::Rect) {
    let radius = icon_rect.width().min(icon_rect.height()) / 2.0;
    painter.circle_filled(icon_rect.center(), radius, key.fallback_color());
    painter.circle_stroke(
        icon_rect.center(),
        radius,
        egui::Stroke::new(1.0, egui::Color32::BLACK),
    );
    if let Some(glyph) = key.glyph() {
        painter.text(
            icon_rect.center(),
            egui::Align2::CENTER_CENTER,
            glyph,
            egui::FontId::proportional(radius.max(1.0)),
            egui::Color32::WHITE,
        );
    }
}
