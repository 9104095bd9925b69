// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: configuration, track files, icon images and location providers.

pub mod config;
pub mod location;
pub mod media;
pub mod serialization;
