// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

// A headless demo cartridge for the Ferrite-8 emulator.
use anyhow::Result;
use ferrite_core::{
    Buttons, Command, Console, Frontend, GameModule, Runtime, Surface, Tilemap,
};

/// A bouncing-ball cartridge exercising the draw, map, and random opcodes.
struct DemoGame {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
}

impl DemoGame {
    fn new() -> Self {
        Self {
            x: 20,
            y: 20,
            dx: 2,
            dy: 1,
        }
    }
}

impl GameModule for DemoGame {
    fn init(&mut self, console: &mut Console) {
        console.rng_mut().seed(0);
        self.x = 20 + console.rng_mut().next_int(88);
        self.y = 20 + console.rng_mut().next_int(88);
    }

    fn update(&mut self, console: &mut Console) {
        self.x += self.dx;
        self.y += self.dy;
        if self.x <= 4 || self.x >= 123 {
            self.dx = -self.dx;
            console.invoke(Command::Sfx { id: 1 });
        }
        if self.y <= 4 || self.y >= 123 {
            self.dy = -self.dy;
            console.invoke(Command::Sfx { id: 2 });
        }
    }

    fn draw(&mut self, console: &mut Console) {
        console.invoke(Command::RectFill {
            x0: 0,
            y0: 0,
            x1: 127,
            y1: 127,
            color: 1,
        });
        console.invoke(Command::Map {
            map_x: 0,
            map_y: 0,
            screen_x: 0,
            screen_y: 0,
            w: 16,
            h: 16,
            mask: 0,
        });
        console.invoke(Command::Line {
            x0: 0,
            y0: 127,
            x1: 127,
            y1: 127,
            color: 6,
        });
        console.invoke(Command::CircFill {
            x: self.x,
            y: self.y,
            r: 4,
            color: 8,
        });
    }

    fn state_size(&self) -> usize {
        16
    }

    fn save_state(&self, buf: &mut [u8]) {
        for (i, v) in [self.x, self.y, self.dx, self.dy].into_iter().enumerate() {
            buf[i * 4..i * 4 + 4].copy_from_slice(&v.to_le_bytes());
        }
    }

    fn load_state(&mut self, buf: &[u8]) {
        let mut word = [0u8; 4];
        let mut read = |i: usize| {
            word.copy_from_slice(&buf[i * 4..i * 4 + 4]);
            i32::from_le_bytes(word)
        };
        self.x = read(0);
        self.y = read(1);
        self.dx = read(2);
        self.dy = read(3);
    }
}

/// Frontend with no window: input is always idle, frames are just counted.
struct HeadlessFrontend {
    frames: u64,
}

impl Frontend for HeadlessFrontend {
    fn sample_input(&mut self) -> Buttons {
        Buttons::empty()
    }

    fn present(&mut self, _console: &Console) {
        self.frames += 1;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Ferrite-8 Emulator v0.1.0");
    println!("=========================");
    println!();

    let scale = 2;
    let mut console = Console::new(scale);

    // Synthetic assets: a checkerboard tile sheet and a diagonal-stripe map.
    let mut sheet = vec![0u8; 128 * 128];
    for y in 0..8 {
        for x in 0..8 {
            if (x + y) % 2 == 0 {
                sheet[(8 + x) + y * 128] = 5; // tile 1
            }
        }
    }
    console.load_sprites(Surface::from_logical(&sheet, 128, 128, scale)?);

    let mut tiles = vec![0u8; 128 * 128];
    for i in 0..128 {
        tiles[i + i * 128] = 1;
    }
    console.load_tilemap(Tilemap::from_parts(tiles, vec![0, 0])?);

    println!("running demo cartridge for 60 ticks...");
    let mut runtime = Runtime::new(console, DemoGame::new());
    let mut frontend = HeadlessFrontend { frames: 0 };
    for _ in 0..60 {
        runtime.run_tick(&mut frontend);
    }

    let lit = runtime
        .console()
        .canvas()
        .surface()
        .raw_pixels()
        .iter()
        .filter(|&&p| p != 0)
        .count();
    println!("done!");
    println!();
    println!("  frames presented: {}", frontend.frames);
    println!("  ticks elapsed:    {}", runtime.ticks());
    println!("  lit pixels:       {lit}");

    Ok(())
}
