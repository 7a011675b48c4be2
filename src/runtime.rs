// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Frame pacer, input snapshot, and the host-side tick loop.
//!
//! One tick is: sample input, handle host pseudo-buttons, run the game
//! module's update and draw (or the pause overlay), draw the on-screen
//! display, present, then sleep off the remainder of the tick budget. The
//! logical rate is 30 Hz held with an alternating 33/33/34 ms budget, which
//! averages to exactly 33.333 ms on integer timers.

use std::time::{Duration, Instant};

use log::info;

use crate::console::Console;
use crate::gfx::LOGICAL_SIZE;
use crate::input::Buttons;
use crate::state::CORE_STATE_BYTES;

/// Logical frame rate.
pub const TICK_RATE_HZ: u32 = 30;

/// Per-tick millisecond budgets, repeating every three ticks.
const TICK_BUDGET_MS: [u64; 3] = [33, 33, 34];

/// Ticks an on-screen display message stays up.
const OSD_TICKS: i32 = 30;

/// The game logic module. Owns game state and scripting; each tick it is
/// handed the console to issue commands through [`Console::invoke`] and to
/// draw with. Save-state participation is part of the contract.
pub trait GameModule {
    fn init(&mut self, console: &mut Console);
    fn update(&mut self, console: &mut Console);
    fn draw(&mut self, console: &mut Console);

    /// Size of this module's save-state bytes; fixed for the process.
    fn state_size(&self) -> usize;
    fn save_state(&self, buf: &mut [u8]);
    fn load_state(&mut self, buf: &[u8]);
}

/// The window/input backend. Owns the OS window and raw device polling; the
/// runtime only sees a pre-sampled button bitmask and hands back the finished
/// frame.
pub trait Frontend {
    /// Sample every mapped physical input, ORed into one logical button set.
    fn sample_input(&mut self) -> Buttons;
    /// Push the finished frame to the display.
    fn present(&mut self, console: &Console);
}

/// On-screen display: one status line (state saved, pause hints) shown for
/// [`OSD_TICKS`] ticks at the bottom of the screen, sliding off during its
/// last ten. Drawn directly on the rasterizer, so the camera never moves it.
struct Osd {
    text: String,
    timer: i32,
}

impl Osd {
    fn new() -> Self {
        Self {
            text: String::new(),
            timer: 0,
        }
    }

    fn set(&mut self, message: &str) {
        info!("{message}");
        self.text.clear();
        // 4 px per glyph; keep the box on the 128 px screen
        self.text.push_str(&message[..message.len().min(30)]);
        self.timer = OSD_TICKS;
    }

    fn draw(&mut self, console: &mut Console) {
        if self.timer <= 0 {
            return;
        }
        self.timer -= 1;
        let x = 4;
        let y = 120 + if self.timer < 10 { 10 - self.timer } else { 0 };
        let w = 4 * self.text.len() as i32;
        console
            .canvas
            .rect_fill(x - 2, y - 2, x + w, y + 6, 6, &console.palette);
        console
            .canvas
            .rect_fill(x - 1, y - 1, x + w - 1, y + 5, 0, &console.palette);
        if let Some(font) = &console.font {
            console
                .canvas
                .print(&self.text, x, y, 7, &console.palette, font);
        }
    }
}

/// Drives the console at the fixed logical rate.
pub struct Runtime<G: GameModule> {
    console: Console,
    game: G,
    paused: bool,
    running: bool,
    tick_phase: usize,
    ticks: u64,
    save_buf: Option<Vec<u8>>,
    osd: Osd,
}

impl<G: GameModule> Runtime<G> {
    pub fn new(console: Console, game: G) -> Self {
        let mut runtime = Self {
            console,
            game,
            paused: false,
            running: true,
            tick_phase: 0,
            ticks: 0,
            save_buf: None,
            osd: Osd::new(),
        };
        runtime.game.init(&mut runtime.console);
        runtime
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Restart the game module from scratch, clearing pause.
    pub fn reset(&mut self) {
        self.paused = false;
        self.console.audio.set_paused(false);
        self.console.audio.stop_music(0);
        self.game.init(&mut self.console);
        self.osd.set("reset");
    }

    /// Total save blob size: console state followed by the game module's.
    /// Fixed for the process lifetime.
    pub fn state_size(&self) -> usize {
        CORE_STATE_BYTES + self.game.state_size()
    }

    /// Serialize the full deterministic state into a caller-owned buffer of
    /// exactly [`Runtime::state_size`] bytes.
    pub fn save_state(&self, buf: &mut [u8]) {
        self.console.save_state(&mut buf[..CORE_STATE_BYTES]);
        self.game.save_state(&mut buf[CORE_STATE_BYTES..]);
    }

    /// Overwrite the full state from a blob written by [`Runtime::save_state`].
    /// Foreign buffers are undefined; no validation is performed.
    pub fn load_state(&mut self, buf: &[u8]) {
        self.console.load_state(&buf[..CORE_STATE_BYTES]);
        self.game.load_state(&buf[CORE_STATE_BYTES..]);
    }

    /// Run one logical tick against the frontend, then sleep off the
    /// remainder of the tick budget. Never sleeps a negative duration: an
    /// over-budget tick proceeds straight to the next with no catch-up.
    pub fn run_tick(&mut self, frontend: &mut dyn Frontend) {
        let tick_start = Instant::now();

        let sampled = frontend.sample_input();
        self.console.input.begin_frame(sampled);
        self.handle_host_buttons();

        if self.paused {
            self.draw_pause_overlay();
        } else {
            self.game.update(&mut self.console);
            self.game.draw(&mut self.console);
        }
        self.osd.draw(&mut self.console);

        frontend.present(&self.console);
        self.ticks += 1;

        let budget = self.next_budget();
        let spent = tick_start.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
    }

    /// Tick until the exit pseudo-button fires.
    pub fn run(&mut self, frontend: &mut dyn Frontend) {
        while self.running {
            self.run_tick(frontend);
        }
    }

    fn handle_host_buttons(&mut self) {
        let input = self.console.input;
        if input.just_pressed(Buttons::PAUSE) {
            self.paused = !self.paused;
            self.console.audio.set_paused(self.paused);
        }
        if input.just_pressed(Buttons::EXIT) {
            self.running = false;
        }
        if input.just_pressed(Buttons::SAVE_STATE) {
            let mut buf = vec![0u8; self.state_size()];
            self.save_state(&mut buf);
            self.save_buf = Some(buf);
            self.osd.set("state saved");
        }
        if input.just_pressed(Buttons::LOAD_STATE) {
            if let Some(buf) = self.save_buf.take() {
                self.load_state(&buf);
                self.save_buf = Some(buf);
                self.osd.set("state loaded");
            } else {
                self.osd.set("no state saved");
            }
        }
    }

    fn draw_pause_overlay(&mut self) {
        let x0 = LOGICAL_SIZE / 2 - 3 * 4;
        let y0 = 8;
        self.console
            .canvas
            .rect_fill(x0 - 1, y0 - 1, 6 * 4 + x0 + 1, 6 + y0 + 1, 6, &self.console.palette);
        self.console
            .canvas
            .rect_fill(x0, y0, 6 * 4 + x0, 6 + y0, 0, &self.console.palette);
        if let Some(font) = &self.console.font {
            self.console
                .canvas
                .print("paused", x0 + 1, y0 + 1, 7, &self.console.palette, font);
        }
    }

    fn next_budget(&mut self) -> Duration {
        let ms = TICK_BUDGET_MS[self.tick_phase];
        self.tick_phase = (self.tick_phase + 1) % TICK_BUDGET_MS.len();
        Duration::from_millis(ms)
    }
}
