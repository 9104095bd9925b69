// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Trailmark application.

pub mod canvas;
pub mod compass;
pub mod icons;
pub mod marker_picker;
pub mod toolbar;
