// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: positions, markers and route state.

pub mod geo;
pub mod route;
