// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Projection, view transform and bearing math.

pub mod bearing;
pub mod projection;
pub mod transform;
