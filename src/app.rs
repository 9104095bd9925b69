// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the route state and canvas to the location provider,
//! the toolbar, the marker picker and the compass overlay.

use crate::io::config::AppConfig;
use crate::io::location::{self, ConfigPermission, LocationSource, PermissionGate};
use crate::models::geo::{GeoPoint, MarkerCategory};
use crate::models::route::RouteState;
use crate::ui::canvas::{self, CanvasAction, RouteCanvas};
use crate::ui::compass;
use crate::ui::icons::IconAtlas;
use crate::ui::marker_picker::{self, PickerAction};
use crate::ui::toolbar::{self, RouteStatus, ToolbarAction};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// How long a notice stays on screen.
const NOTICE_DURATION: Duration = Duration::from_millis(2500);

/// How often the location channel is drained while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Zoom step of the toolbar buttons.
const ZOOM_STEP: f32 = 1.25;

/// A transient message for the user.
struct Notice {
    text: String,
    shown_at: Instant,
}

/// Main application state.
pub struct TrailmarkApp {
    config: AppConfig,

    /// Active flag, current/target location and compass
    state: RouteState,

    /// Recorded points, markers and view transform
    canvas: RouteCanvas,

    permission: Box<dyn PermissionGate>,

    /// Provider not yet started
    source: Option<Box<dyn LocationSource>>,

    /// Receiver for fixes from the running provider
    location_rx: Option<Receiver<GeoPoint>>,

    /// Loaded on the first frame, once a context exists
    icons: Option<IconAtlas>,

    picker_open: bool,

    notice: Option<Notice>,

    /// Canvas size from the last frame
    canvas_size: egui::Vec2,
}

impl TrailmarkApp {
    /// Create the application with the configured provider and permission.
    pub fn new(config: AppConfig) -> Self {
        let permission = Box::new(ConfigPermission(config.location.permission_granted));
        let source = location::from_config(&config.location);
        Self::with_parts(config, permission, source)
    }

    /// Create the application with explicit collaborators.
    pub fn with_parts(
        config: AppConfig,
        permission: Box<dyn PermissionGate>,
        source: Box<dyn LocationSource>,
    ) -> Self {
        let canvas = RouteCanvas::new(config.view.clone());
        Self {
            config,
            state: RouteState::new(),
            canvas,
            permission,
            source: Some(source),
            location_rx: None,
            icons: None,
            picker_open: false,
            notice: None,
            canvas_size: egui::Vec2::ZERO,
        }
    }

    /// Begin a new route and make sure fixes are flowing.
    fn start_route(&mut self) {
        self.state.start(&mut self.canvas);
        self.start_tracking();
    }

    /// Subscribe to location updates, checking permission first.
    fn start_tracking(&mut self) {
        if !self.permission.is_granted() {
            log::warn!("Location permission not granted");
            self.state.push_notice("Permission denied");
            return;
        }
        if self.location_rx.is_some() {
            return;
        }

        let source = match self.source.take() {
            Some(source) => source,
            None => location::from_config(&self.config.location),
        };
        self.location_rx = Some(source.start());
        log::info!("Requested location updates");
    }

    /// Drain every fix the provider has sent since the last frame.
    fn poll_location(&mut self) {
        let Some(ref receiver) = self.location_rx else {
            return;
        };

        let mut disconnected = false;
        loop {
            match receiver.try_recv() {
                Ok(fix) => {
                    self.state.on_location(
                        fix,
                        &mut self.canvas,
                        self.config.recording.min_record_distance_m,
                    );
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected {
            log::info!("Location provider finished");
            self.location_rx = None;
        }
    }

    fn add_marker(&mut self, category: MarkerCategory) {
        if !self.state.add_marker_here(category, &mut self.canvas) {
            self.state.push_notice("No location fix yet");
        }
    }

    /// Summary shown next to the toolbar buttons.
    fn route_status(&self) -> RouteStatus {
        RouteStatus {
            active: self.state.active,
            has_fix: self.state.current_location.is_some(),
            points: self.canvas.route_points().len(),
            markers: self.canvas.markers().len(),
            zoom: self.canvas.transform().scale,
        }
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::StartRoute => self.start_route(),
            ToolbarAction::StopRoute => self.state.stop(),
            ToolbarAction::OpenMarkerPicker => self.picker_open = true,
            ToolbarAction::CenterOnMe => {
                if let Some(current) = self.state.current_location {
                    self.canvas.center_on(&current, self.canvas_size);
                }
            }
            ToolbarAction::ZoomIn => self.canvas.pinch(ZOOM_STEP),
            ToolbarAction::ZoomOut => self.canvas.pinch(1.0 / ZOOM_STEP),
            ToolbarAction::ResetView => self.canvas.reset_view(),
            ToolbarAction::None => {}
        }
    }

    fn handle_canvas(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::Tap(pos) => {
                self.canvas.tap(pos, self.canvas_size, &mut self.state);
            }
            CanvasAction::Scroll(distance) => self.canvas.scroll(distance),
            CanvasAction::Pinch(delta) => self.canvas.pinch(delta),
        }
    }

    /// Move the newest pending notice on screen.
    fn refresh_notice(&mut self) {
        if let Some(text) = self.state.take_notices().pop() {
            self.notice = Some(Notice {
                text,
                shown_at: Instant::now(),
            });
        }
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= NOTICE_DURATION)
        {
            self.notice = None;
        }
    }
}

impl eframe::App for TrailmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let icons = self
            .icons
            .take()
            .unwrap_or_else(|| IconAtlas::load(ctx, self.config.icons.dir.as_deref()));

        self.poll_location();

        // Toolbar
        let status = self.route_status();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &status))
            .inner;
        self.handle_toolbar(toolbar_action);

        // Marker picker
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.picker_open = false;
        }
        if let PickerAction::Picked(category) =
            marker_picker::show(ctx, &mut self.picker_open, &icons)
        {
            self.add_marker(category);
        }

        // Notices (bottom)
        self.refresh_notice();
        if let Some(ref notice) = self.notice {
            egui::TopBottomPanel::bottom("notice").show(ctx, |ui| {
                ui.label(egui::RichText::new(&notice.text).color(egui::Color32::from_gray(220)));
            });
            ctx.request_repaint_after(NOTICE_DURATION.saturating_sub(notice.shown_at.elapsed()));
        }

        // Route canvas (center)
        let (rect, canvas_actions) = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                canvas::show(
                    ui,
                    &self.canvas,
                    self.state.current_location.as_ref(),
                    self.state.active,
                    &icons,
                )
            })
            .inner;
        self.canvas_size = rect.size();
        for action in canvas_actions {
            self.handle_canvas(action);
        }

        if self.state.active {
            compass::show(
                ctx,
                self.state.bearing_deg(),
                self.state.target_location.is_some(),
            );
        }

        if self.canvas.take_redraw() {
            ctx.request_repaint();
        }
        if self.location_rx.is_some() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        self.icons = Some(icons);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    /// Provider that hands over a fixed list of fixes immediately.
    struct FixedSource(Vec<GeoPoint>);

    impl LocationSource for FixedSource {
        fn start(self: Box<Self>) -> Receiver<GeoPoint> {
            let (sender, receiver) = channel();
            for fix in self.0 {
                sender.send(fix).unwrap();
            }
            receiver
        }
    }

    fn origin() -> GeoPoint {
        GeoPoint::new(60.0, 25.0)
    }

    fn app_with(fixes: Vec<GeoPoint>, granted: bool) -> TrailmarkApp {
        TrailmarkApp::with_parts(
            AppConfig::default(),
            Box::new(ConfigPermission(granted)),
            Box::new(FixedSource(fixes)),
        )
    }

    #[test]
    fn test_permission_denied_shows_notice() {
        let mut app = app_with(vec![origin()], false);
        app.handle_toolbar(ToolbarAction::StartRoute);

        assert!(app.state.active);
        assert!(app.location_rx.is_none());
        assert!(app.source.is_some());
        app.refresh_notice();
        assert_eq!(app.notice.as_ref().map(|n| n.text.as_str()), Some("Permission denied"));
    }

    #[test]
    fn test_fixes_8m_apart_record_one_point() {
        let mut app = app_with(vec![origin(), origin().offset_by_meters(8.0, 0.0)], true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.poll_location();

        assert_eq!(app.canvas.route_points().len(), 1);
    }

    #[test]
    fn test_fixes_12m_apart_record_two_points() {
        let mut app = app_with(vec![origin(), origin().offset_by_meters(12.0, 0.0)], true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.poll_location();

        assert_eq!(app.canvas.route_points().len(), 2);
    }

    #[test]
    fn test_finished_provider_is_dropped() {
        let mut app = app_with(vec![origin()], true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.poll_location();

        assert!(app.location_rx.is_none());
        assert_eq!(app.state.current_location, Some(origin()));
    }

    #[test]
    fn test_marker_without_fix_shows_notice() {
        let mut app = app_with(Vec::new(), true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.add_marker(MarkerCategory::Mushrooms);

        assert!(app.canvas.markers().is_empty());
        app.refresh_notice();
        assert_eq!(app.notice.as_ref().map(|n| n.text.as_str()), Some("No location fix yet"));
    }

    #[test]
    fn test_restart_drops_camp_and_targets_it() {
        let mut app = app_with(vec![origin()], true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.poll_location();
        app.add_marker(MarkerCategory::Berries);

        app.handle_toolbar(ToolbarAction::StartRoute);

        assert_eq!(app.canvas.markers().len(), 1);
        assert_eq!(app.canvas.markers()[0].category, MarkerCategory::Camping);
        assert_eq!(app.state.target_location, Some(origin()));
    }

    #[test]
    fn test_tap_on_marker_sets_target() {
        let mut app = app_with(
            vec![GeoPoint::new(10.0, 10.0), GeoPoint::new(20.0, 20.0)],
            true,
        );
        app.canvas_size = egui::vec2(100.0, 100.0);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.poll_location();
        app.add_marker(MarkerCategory::Berries);

        // Marker sits at the current fix (20, 20), projected top-right
        app.handle_canvas(CanvasAction::Tap(egui::pos2(80.0, 30.0)));
        assert_eq!(app.state.target_location, Some(GeoPoint::new(20.0, 20.0)));
    }

    #[test]
    fn test_zoom_buttons_respect_limits() {
        let mut app = app_with(Vec::new(), true);
        for _ in 0..50 {
            app.handle_toolbar(ToolbarAction::ZoomIn);
        }
        assert_eq!(app.canvas.transform().scale, 5.0);

        app.handle_toolbar(ToolbarAction::ResetView);
        assert_eq!(app.canvas.transform().scale, 1.0);
    }

    #[test]
    fn test_status_counts_route_and_markers() {
        let mut app = app_with(vec![origin(), origin().offset_by_meters(12.0, 0.0)], true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.poll_location();
        app.add_marker(MarkerCategory::Camping);
        app.handle_toolbar(ToolbarAction::ZoomIn);

        let status = app.route_status();
        assert!(status.active && status.has_fix);
        assert_eq!(status.points, 2);
        assert_eq!(status.markers, 1);
        assert_eq!(status.zoom, ZOOM_STEP);
    }

    #[test]
    fn test_stop_then_fixes_are_ignored() {
        let mut app = app_with(vec![origin()], true);
        app.handle_toolbar(ToolbarAction::StartRoute);
        app.handle_toolbar(ToolbarAction::StopRoute);
        app.poll_location();

        assert!(!app.state.active);
        assert!(app.canvas.route_points().is_empty());
    }
}
