// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command dispatch boundary between the game logic and the console.
//!
//! Everything the game logic module may do crosses [`Console::invoke`] as one
//! [`Command`]. The camera offset is subtracted here, uniformly, before any
//! coordinate reaches the rasterizer or the tilemap engine; those layers
//! never see raw coordinates.

use crate::audio::{AudioSink, MUSIC_SLOTS, NullAudio, SFX_SLOTS};
use crate::camera::Camera;
use crate::gfx::{Canvas, Surface};
use crate::input::InputState;
use crate::palette::Palette;
use crate::rng::Rng;
use crate::tilemap::Tilemap;

/// One request crossing the game-logic/console boundary.
///
/// The set is closed; [`Console::invoke`] matches it exhaustively, so adding
/// a variant is a compile-visible change everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// Start track `track / 10` with a fade-in, or stop with a fade-out when
    /// `track == -1`. The channel mask is accepted but unused: backends keep
    /// sfx and music channels separate.
    Music {
        track: i32,
        fade_ms: i32,
        channel_mask: i32,
    },
    /// Draw one 8x8 sprite tile. `cols`/`rows` must both be 1; a negative
    /// sprite id suppresses the draw.
    Spr {
        sprite: i32,
        x: i32,
        y: i32,
        cols: i32,
        rows: i32,
        flip_x: bool,
        flip_y: bool,
    },
    /// Query game button `index` (0..=5) in this tick's snapshot.
    Btn { index: i32 },
    /// Fire sound effect `id` once.
    Sfx { id: i32 },
    /// Remap palette slot `slot` to base color `base`.
    Pal { slot: i32, base: i32 },
    /// Restore the identity palette.
    PalReset,
    CircFill { x: i32, y: i32, r: i32, color: i32 },
    Print { text: &'a str, x: i32, y: i32, color: i32 },
    RectFill { x0: i32, y0: i32, x1: i32, y1: i32, color: i32 },
    Line { x0: i32, y0: i32, x1: i32, y1: i32, color: i32 },
    /// Tile id at a tilemap cell.
    Mget { tx: i32, ty: i32 },
    /// Set the camera offset (no-op while screen shake is disabled).
    Camera { x: i32, y: i32 },
    /// Query flag bit `flag` of tile id `tile`.
    Fget { tile: i32, flag: i32 },
    /// Draw a w x h tilemap window to the screen, filtered by `mask`.
    Map {
        map_x: i32,
        map_y: i32,
        screen_x: i32,
        screen_y: i32,
        w: i32,
        h: i32,
        mask: i32,
    },
}

/// Result of one dispatched command; draw commands answer [`Unit`].
///
/// [`Unit`]: CommandResult::Unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Unit,
    Int(i32),
    Bool(bool),
}

impl CommandResult {
    pub fn as_int(self) -> i32 {
        match self {
            CommandResult::Unit => 0,
            CommandResult::Int(v) => v,
            CommandResult::Bool(b) => i32::from(b),
        }
    }

    pub fn as_bool(self) -> bool {
        self.as_int() != 0
    }
}

/// The emulation context: framebuffer, palette, camera, generator, input
/// snapshot, tile data, asset surfaces, and the audio seam. One value, owned
/// by the frame pacer, passed by reference everywhere; no ambient globals.
pub struct Console {
    pub(crate) canvas: Canvas,
    pub(crate) palette: Palette,
    pub(crate) camera: Camera,
    pub(crate) rng: Rng,
    pub(crate) input: InputState,
    pub(crate) tilemap: Tilemap,
    pub(crate) sprites: Option<Surface>,
    pub(crate) font: Option<Surface>,
    pub(crate) audio: Box<dyn AudioSink>,
}

impl Console {
    pub fn new(scale: i32) -> Self {
        Self {
            canvas: Canvas::new(scale),
            palette: Palette::new(),
            camera: Camera::new(),
            rng: Rng::new(),
            input: InputState::new(),
            tilemap: Tilemap::empty(),
            sprites: None,
            font: None,
            audio: Box::new(NullAudio),
        }
    }

    /// Install the sprite sheet. Until one is loaded, sprite and map draws
    /// are silently skipped.
    pub fn load_sprites(&mut self, sheet: Surface) {
        self.sprites = Some(sheet);
    }

    /// Install the font sheet. Until one is loaded, text draws are skipped.
    pub fn load_font(&mut self, font: Surface) {
        self.font = Some(font);
    }

    pub fn load_tilemap(&mut self, map: Tilemap) {
        self.tilemap = map;
    }

    pub fn set_audio(&mut self, sink: Box<dyn AudioSink>) {
        self.audio = sink;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn audio_mut(&mut self) -> &mut dyn AudioSink {
        self.audio.as_mut()
    }

    /// Dispatch one command. Draw commands are best effort and never fail;
    /// queries return their value. Argument contract violations (multi-tile
    /// sprites, button indexes past 5) trip debug assertions.
    pub fn invoke(&mut self, cmd: Command<'_>) -> CommandResult {
        let (cam_x, cam_y) = self.camera.offset();

        match cmd {
            Command::Music {
                track,
                fade_ms,
                channel_mask: _,
            } => {
                if track == -1 {
                    self.audio.stop_music(fade_ms);
                } else {
                    let slot = track / 10;
                    if (0..MUSIC_SLOTS as i32).contains(&slot) {
                        self.audio.play_music(slot as usize, fade_ms);
                    }
                }
                CommandResult::Unit
            }
            Command::Spr {
                sprite,
                x,
                y,
                cols,
                rows,
                flip_x,
                flip_y,
            } => {
                debug_assert!(cols == 1 && rows == 1, "multi-tile sprites are not supported");
                if sprite >= 0 {
                    if let Some(sheet) = &self.sprites {
                        self.canvas.draw_tile(
                            sheet,
                            sprite,
                            x - cam_x,
                            y - cam_y,
                            flip_x,
                            flip_y,
                            &self.palette,
                        );
                    }
                }
                CommandResult::Unit
            }
            Command::Btn { index } => CommandResult::Bool(self.input.button(index)),
            Command::Sfx { id } => {
                if (0..SFX_SLOTS as i32).contains(&id) {
                    self.audio.play_sfx(id as usize);
                }
                CommandResult::Unit
            }
            Command::Pal { slot, base } => {
                self.palette.remap(slot, base);
                CommandResult::Unit
            }
            Command::PalReset => {
                self.palette.reset();
                CommandResult::Unit
            }
            Command::CircFill { x, y, r, color } => {
                self.canvas
                    .circ_fill(x - cam_x, y - cam_y, r, color, &self.palette);
                CommandResult::Unit
            }
            Command::Print { text, x, y, color } => {
                if let Some(font) = &self.font {
                    self.canvas
                        .print(text, x - cam_x, y - cam_y, color % 16, &self.palette, font);
                }
                CommandResult::Unit
            }
            Command::RectFill { x0, y0, x1, y1, color } => {
                self.canvas.rect_fill(
                    x0 - cam_x,
                    y0 - cam_y,
                    x1 - cam_x,
                    y1 - cam_y,
                    color,
                    &self.palette,
                );
                CommandResult::Unit
            }
            Command::Line { x0, y0, x1, y1, color } => {
                self.canvas.line(
                    x0 - cam_x,
                    y0 - cam_y,
                    x1 - cam_x,
                    y1 - cam_y,
                    color,
                    &self.palette,
                );
                CommandResult::Unit
            }
            Command::Mget { tx, ty } => CommandResult::Int(self.tilemap.tile_at(tx, ty)),
            Command::Camera { x, y } => {
                self.camera.set(x, y);
                CommandResult::Unit
            }
            Command::Fget { tile, flag } => CommandResult::Bool(self.tilemap.flag(tile, flag)),
            Command::Map {
                map_x,
                map_y,
                screen_x,
                screen_y,
                w,
                h,
                mask,
            } => {
                if let Some(sheet) = &self.sprites {
                    self.tilemap.draw_window(
                        &mut self.canvas,
                        sheet,
                        &self.palette,
                        map_x,
                        map_y,
                        screen_x - cam_x,
                        screen_y - cam_y,
                        w,
                        h,
                        mask,
                    );
                }
                CommandResult::Unit
            }
        }
    }
}
