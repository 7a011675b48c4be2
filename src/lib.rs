// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ferrite-8 Fantasy Console Emulator
//!
//! This library provides the console emulation layer: the command dispatch
//! boundary game logic talks to, the indexed-color rasterizer, the tilemap
//! and flag query engine, the palette/camera model, the deterministic
//! generator, and the 30 Hz frame pacer. Window, audio, and game-logic
//! concerns plug in through the [`runtime::Frontend`], [`audio::AudioSink`],
//! and [`runtime::GameModule`] traits.

pub mod audio;
pub mod camera;
pub mod console;
pub mod gfx;
pub mod input;
pub mod palette;
pub mod rng;
pub mod runtime;
pub mod state;
pub mod tilemap;

pub use audio::{AudioSink, NullAudio};
pub use camera::Camera;
pub use console::{Command, CommandResult, Console};
// Re-export commonly used types
pub use gfx::{Canvas, LOGICAL_SIZE, Rect, Surface};
pub use input::{Buttons, InputState};
pub use palette::{BASE_PALETTE, Palette, Rgb, base_rgb};
pub use rng::Rng;
pub use runtime::{Frontend, GameModule, Runtime, TICK_RATE_HZ};
pub use state::CORE_STATE_BYTES;
pub use tilemap::{MAP_SIZE, Tilemap};
