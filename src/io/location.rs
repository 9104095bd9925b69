// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Location providers.
//!
//! A [`LocationSource`] runs on a background thread and pushes fixes over
//! a channel that the UI thread drains once per frame. Providers thin
//! their output through a [`LocationFilter`] the way a platform location
//! service honours its minimum interval and displacement.

use crate::io::config::LocationConfig;
use crate::models::geo::GeoPoint;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// Produces location fixes.
pub trait LocationSource: Send {
    /// Start producing fixes. The worker stops once the receiver is dropped.
    fn start(self: Box<Self>) -> Receiver<GeoPoint>;
}

/// Whether the app may subscribe to location updates.
pub trait PermissionGate {
    fn is_granted(&self) -> bool;
}

/// Permission taken from the configuration.
pub struct ConfigPermission(pub bool);

impl PermissionGate for ConfigPermission {
    fn is_granted(&self) -> bool {
        self.0
    }
}

/// Drops fixes that arrive too soon or too close to the last delivered one.
#[derive(Debug, Clone)]
pub struct LocationFilter {
    min_interval: Duration,
    min_distance_m: f64,
    last: Option<(Instant, GeoPoint)>,
}

impl LocationFilter {
    pub fn new(min_interval: Duration, min_distance_m: f64) -> Self {
        Self {
            min_interval,
            min_distance_m,
            last: None,
        }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_interval_ms),
            config.min_distance_m,
        )
    }

    /// Returns true when `fix` should be delivered, and remembers it.
    pub fn accept(&mut self, fix: GeoPoint, now: Instant) -> bool {
        if let Some((at, point)) = self.last {
            if now.duration_since(at) < self.min_interval {
                return false;
            }
            if point.distance_to(&fix) < self.min_distance_m {
                return false;
            }
        }
        self.last = Some((now, fix));
        true
    }
}

/// Replays a recorded track, one raw fix per tick.
pub struct ReplaySource {
    points: Vec<GeoPoint>,
    tick: Duration,
    filter: LocationFilter,
}

impl ReplaySource {
    pub fn new(points: Vec<GeoPoint>, tick: Duration, filter: LocationFilter) -> Self {
        Self {
            points,
            tick,
            filter,
        }
    }
}

impl LocationSource for ReplaySource {
    fn start(self: Box<Self>) -> Receiver<GeoPoint> {
        let (sender, receiver) = channel();
        let ReplaySource {
            points,
            tick,
            mut filter,
        } = *self;

        std::thread::spawn(move || {
            log::info!("Replaying track of {} points", points.len());
            for point in points {
                std::thread::sleep(tick);
                if filter.accept(point, Instant::now()) && sender.send(point).is_err() {
                    return;
                }
            }
            log::info!("Track replay finished");
        });

        receiver
    }
}

/// A deterministic meandering walk from a fixed origin.
pub struct SimulatedWalk {
    position: GeoPoint,
    step_m: f64,
    step: u64,
    tick: Duration,
    filter: LocationFilter,
}

impl SimulatedWalk {
    pub fn new(origin: GeoPoint, speed_mps: f64, tick: Duration, filter: LocationFilter) -> Self {
        Self {
            position: origin,
            step_m: speed_mps * tick.as_secs_f64(),
            step: 0,
            tick,
            filter,
        }
    }

    /// Advance one tick and return the new raw position.
    pub fn next_position(&mut self) -> GeoPoint {
        // Heading swings slowly left and right around north-east
        let heading = (45.0 + 60.0 * (self.step as f64 / 15.0).sin()).to_radians();
        self.step += 1;
        self.position = self
            .position
            .offset_by_meters(self.step_m * heading.cos(), self.step_m * heading.sin());
        self.position
    }
}

impl LocationSource for SimulatedWalk {
    fn start(mut self: Box<Self>) -> Receiver<GeoPoint> {
        let (sender, receiver) = channel();

        std::thread::spawn(move || {
            log::info!("Starting simulated walk");
            let first = self.position;
            if self.filter.accept(first, Instant::now()) && sender.send(first).is_err() {
                return;
            }
            loop {
                std::thread::sleep(self.tick);
                let fix = self.next_position();
                if self.filter.accept(fix, Instant::now()) && sender.send(fix).is_err() {
                    log::debug!("Location receiver dropped, stopping simulated walk");
                    return;
                }
            }
        });

        receiver
    }
}

/// Build the provider described by the configuration.
///
/// A track file that fails to load falls back to the simulated walk.
pub fn from_config(config: &LocationConfig) -> Box<dyn LocationSource> {
    let tick = Duration::from_millis(config.tick_ms.max(1));
    let filter = LocationFilter::from_config(config);

    if let Some(ref path) = config.track_file {
        match crate::io::serialization::import_track(path) {
            Ok(points) => return Box::new(ReplaySource::new(points, tick, filter)),
            Err(e) => log::error!("Failed to import track {}: {}", path.display(), e),
        }
    }

    Box::new(SimulatedWalk::new(
        config.origin,
        config.walking_speed_mps,
        tick,
        filter,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_first_fix_always_passes() {
        let mut filter = LocationFilter::new(Duration::from_secs(2), 5.0);
        assert!(filter.accept(GeoPoint::new(60.0, 25.0), Instant::now()));
    }

    #[test]
    fn test_filter_drops_too_soon() {
        let mut filter = LocationFilter::new(Duration::from_secs(2), 5.0);
        let origin = GeoPoint::new(60.0, 25.0);
        let t0 = Instant::now();

        assert!(filter.accept(origin, t0));
        let far = origin.offset_by_meters(50.0, 0.0);
        assert!(!filter.accept(far, t0 + Duration::from_millis(1500)));
        assert!(filter.accept(far, t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_filter_drops_too_close() {
        let mut filter = LocationFilter::new(Duration::from_secs(2), 5.0);
        let origin = GeoPoint::new(60.0, 25.0);
        let t0 = Instant::now();

        assert!(filter.accept(origin, t0));
        let near = origin.offset_by_meters(3.0, 0.0);
        assert!(!filter.accept(near, t0 + Duration::from_secs(10)));
        let far = origin.offset_by_meters(6.0, 0.0);
        assert!(filter.accept(far, t0 + Duration::from_secs(11)));
    }

    #[test]
    fn test_simulated_walk_moves_at_speed() {
        let origin = GeoPoint::new(60.0, 25.0);
        let mut walk = SimulatedWalk::new(
            origin,
            1.5,
            Duration::from_secs(2),
            LocationFilter::new(Duration::ZERO, 0.0),
        );

        let mut previous = origin;
        for _ in 0..20 {
            let next = walk.next_position();
            assert!((previous.distance_to(&next) - 3.0).abs() < 0.01);
            previous = next;
        }
    }

    #[test]
    fn test_replay_delivers_points_in_order() {
        let points = vec![
            GeoPoint::new(60.0, 25.0),
            GeoPoint::new(60.001, 25.0),
            GeoPoint::new(60.002, 25.0),
        ];
        let source = Box::new(ReplaySource::new(
            points.clone(),
            Duration::from_millis(1),
            LocationFilter::new(Duration::ZERO, 0.0),
        ));

        let received: Vec<GeoPoint> = source.start().iter().collect();
        assert_eq!(received, points);
    }

    #[test]
    fn test_missing_track_falls_back_to_walk() {
        let config = LocationConfig {
            track_file: Some(std::env::temp_dir().join("trailmark-no-such-track.yaml")),
            tick_ms: 1,
            min_interval_ms: 0,
            min_distance_m: 0.0,
            ..LocationConfig::default()
        };

        let receiver = from_config(&config).start();
        let first = receiver.recv().unwrap();
        assert_eq!(first, config.origin);
    }

    #[test]
    fn test_config_permission() {
        assert!(ConfigPermission(true).is_granted());
        assert!(!ConfigPermission(false).is_granted());
    }
}
