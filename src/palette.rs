// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Base color table and the remappable active palette.

/// Number of palette slots.
pub const PALETTE_SLOTS: usize = 16;

/// One entry of the base color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// The immutable 16-color table every active slot is remapped from.
pub const BASE_PALETTE: [Rgb; PALETTE_SLOTS] = [
    rgb(0x00, 0x00, 0x00), // black
    rgb(0x1d, 0x2b, 0x53), // dark blue
    rgb(0x7e, 0x25, 0x53), // dark purple
    rgb(0x00, 0x87, 0x51), // dark green
    rgb(0xab, 0x52, 0x36), // brown
    rgb(0x5f, 0x57, 0x4f), // dark gray
    rgb(0xc2, 0xc3, 0xc7), // light gray
    rgb(0xff, 0xf1, 0xe8), // white
    rgb(0xff, 0x00, 0x4d), // red
    rgb(0xff, 0xa3, 0x00), // orange
    rgb(0xff, 0xec, 0x27), // yellow
    rgb(0x00, 0xe4, 0x36), // green
    rgb(0x29, 0xad, 0xff), // blue
    rgb(0x83, 0x76, 0x9c), // lavender
    rgb(0xff, 0x77, 0xa8), // pink
    rgb(0xff, 0xcc, 0xaa), // peach
];

/// RGB triple a base-palette index presents as on screen.
pub fn base_rgb(index: u8) -> Rgb {
    BASE_PALETTE[(index as usize) % PALETTE_SLOTS]
}

/// Active palette.
///
/// Each slot holds an index into [`BASE_PALETTE`], never an arbitrary color
/// and never another slot. Because remaps always read from the base table,
/// chained remaps do not compose transitively: `remap(0, 1)` followed by
/// `remap(1, 2)` leaves slot 0 pointing at base color 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    map: [u8; PALETTE_SLOTS],
}

impl Palette {
    pub fn new() -> Self {
        let mut map = [0u8; PALETTE_SLOTS];
        for (slot, entry) in map.iter_mut().enumerate() {
            *entry = slot as u8;
        }
        Self { map }
    }

    /// Point `slot` at base color `base`. Out-of-range arguments are ignored.
    pub fn remap(&mut self, slot: i32, base: i32) {
        if (0..PALETTE_SLOTS as i32).contains(&slot) && (0..PALETTE_SLOTS as i32).contains(&base) {
            self.map[slot as usize] = base as u8;
        }
    }

    /// Restore the identity mapping.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Resolve a drawn color index to the base-palette index it lands on.
    pub fn resolve(&self, color: i32) -> u8 {
        self.map[color.rem_euclid(PALETTE_SLOTS as i32) as usize]
    }

    /// RGB the given slot currently presents as.
    pub fn rgb(&self, color: i32) -> Rgb {
        BASE_PALETTE[self.resolve(color) as usize]
    }

    pub(crate) fn map_bytes(&self) -> [u8; PALETTE_SLOTS] {
        self.map
    }

    pub(crate) fn set_map_bytes(&mut self, bytes: [u8; PALETTE_SLOTS]) {
        self.map = bytes;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
