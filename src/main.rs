// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Trailmark - walking route recorder
//!
//! A cross-platform desktop application that records a walking route from
//! GPS fixes, draws it on a pan/zoom canvas with category markers and
//! points a compass at the chosen target marker.

mod app;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::TrailmarkApp;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optional config path as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = io::config::resolve(config_path.as_deref());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([320.0, 480.0])
            .with_title("Trailmark"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Trailmark",
        options,
        Box::new(|_cc| Ok(Box::new(TrailmarkApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
