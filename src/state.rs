// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Save-state serialization of the console-side deterministic state.
//!
//! The blob layout is explicit little-endian rather than a memory copy of the
//! live structs, so it does not depend on padding or field order:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0  | 4  | rng lo |
//! | 4  | 4  | rng hi |
//! | 8  | 4  | camera x (two's complement) |
//! | 12 | 4  | camera y |
//! | 16 | 1  | shake enabled |
//! | 17 | 16 | palette remap table |
//!
//! There is no header and no validation; loading a foreign buffer is caller
//! error. The layout is stable for a given build, which is all round-trip
//! correctness needs.

use crate::console::Console;

/// Console-side bytes in a save blob; the game module's state follows.
pub const CORE_STATE_BYTES: usize = 33;

fn put_u32(buf: &mut [u8], off: usize, v: u32) {
    buf[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

fn get_u32(buf: &[u8], off: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&buf[off..off + 4]);
    u32::from_le_bytes(word)
}

impl Console {
    /// Fixed size of the console-side portion of a save blob.
    pub fn state_size(&self) -> usize {
        CORE_STATE_BYTES
    }

    /// Write the deterministic console state into `buf[..CORE_STATE_BYTES]`.
    pub fn save_state(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= CORE_STATE_BYTES);
        let (lo, hi) = self.rng.words();
        put_u32(buf, 0, lo);
        put_u32(buf, 4, hi);
        put_u32(buf, 8, self.camera.x as u32);
        put_u32(buf, 12, self.camera.y as u32);
        buf[16] = u8::from(self.camera.shake_enabled);
        buf[17..17 + 16].copy_from_slice(&self.palette.map_bytes());
    }

    /// Overwrite the console state from a previously saved blob.
    pub fn load_state(&mut self, buf: &[u8]) {
        debug_assert!(buf.len() >= CORE_STATE_BYTES);
        self.rng.set_words(get_u32(buf, 0), get_u32(buf, 4));
        self.camera.x = get_u32(buf, 8) as i32;
        self.camera.y = get_u32(buf, 12) as i32;
        self.camera.shake_enabled = buf[16] != 0;
        let mut map = [0u8; 16];
        map.copy_from_slice(&buf[17..17 + 16]);
        self.palette.set_map_bytes(map);
    }
}
