// Copyright (C) 2026 Ferrite-8 contributors
// Ferrite-8 Fantasy Console Emulator
// This file is part of Ferrite-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Indexed-color rasterizer.
//!
//! All drawing happens on 8-bit-per-pixel surfaces holding base-palette
//! indices. The logical resolution is fixed at 128x128; storage is scaled by
//! an integer magnification factor chosen at startup, so every logical pixel
//! occupies a scale x scale block. Draw colors pass through the active
//! [`Palette`] at write time, which means later remaps never touch pixels
//! already on the canvas.

use thiserror::Error;

use crate::palette::Palette;

/// Logical canvas edge length in pixels.
pub const LOGICAL_SIZE: i32 = 128;

/// Edge length of one sprite/font tile in logical pixels.
pub const TILE_SIZE: i32 = 8;

/// Tiles per sheet row; tile id = row * 16 + column.
pub const SHEET_COLUMNS: i32 = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GfxError {
    #[error("indexed image data is {actual} bytes, expected {expected}")]
    DataSizeMismatch { expected: usize, actual: usize },
    #[error("invalid surface dimensions {w}x{h}")]
    InvalidDimensions { w: i32, h: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// An indexed 8bpp pixel surface with a destination clip rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    w: i32,
    h: i32,
    pixels: Vec<u8>,
    clip: Rect,
}

impl Surface {
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            w,
            h,
            pixels: vec![0; (w.max(0) * h.max(0)) as usize],
            clip: Rect::new(0, 0, w, h),
        }
    }

    /// Build a scaled surface from unscaled indexed pixel data, replicating
    /// each logical pixel into a scale x scale block.
    pub fn from_logical(data: &[u8], w: i32, h: i32, scale: i32) -> Result<Self, GfxError> {
        if w <= 0 || h <= 0 || scale <= 0 {
            return Err(GfxError::InvalidDimensions { w, h });
        }
        let expected = (w * h) as usize;
        if data.len() != expected {
            return Err(GfxError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let mut surf = Self::new(w * scale, h * scale);
        for y in 0..h {
            for x in 0..w {
                let pix = data[(x + y * w) as usize];
                for j in 0..scale {
                    for i in 0..scale {
                        surf.put(x * scale + i, y * scale + j, pix);
                    }
                }
            }
        }
        Ok(surf)
    }

    pub fn width(&self) -> i32 {
        self.w
    }

    pub fn height(&self) -> i32 {
        self.h
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    /// Pixel index at (x, y); 0 outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        if x >= 0 && x < self.w && y >= 0 && y < self.h {
            self.pixels[(x + y * self.w) as usize]
        } else {
            0
        }
    }

    /// Write one pixel, silently dropping out-of-bounds writes.
    pub fn put(&mut self, x: i32, y: i32, value: u8) {
        if x >= 0 && x < self.w && y >= 0 && y < self.h {
            self.pixels[(x + y * self.w) as usize] = value;
        }
    }

    /// Fill a rectangle, clipped to the surface bounds.
    pub fn fill_rect(&mut self, rect: Rect, value: u8) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(self.w);
        let y1 = (rect.y + rect.h).min(self.h);
        for y in y0..y1 {
            let row = (y * self.w) as usize;
            for x in x0..x1 {
                self.pixels[row + x as usize] = value;
            }
        }
    }

    pub fn raw_pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Copy a source window onto this surface in scaled coordinates.
    ///
    /// Source index 0 is transparent. A nonzero `override_col` recolors every
    /// opaque pixel (how glyphs and HUD sprites are tinted without a second
    /// asset). The window is clipped against the source bounds and this
    /// surface's clip rectangle; horizontal flip mirrors sampling within the
    /// clipped window. `_flip_y` is accepted for call compatibility but the
    /// renderer has never applied it, and shipped games do not rely on it.
    #[allow(clippy::too_many_arguments)]
    pub fn blit_from(
        &mut self,
        src: &Surface,
        src_rect: Rect,
        mut dx: i32,
        mut dy: i32,
        override_col: u8,
        flip_x: bool,
        _flip_y: bool,
        pal: &Palette,
    ) {
        let mut srcx = src_rect.x;
        let mut w = src_rect.w;
        if srcx < 0 {
            w += srcx;
            dx -= srcx;
            srcx = 0;
        }
        w = w.min(src.w - srcx);

        let mut srcy = src_rect.y;
        let mut h = src_rect.h;
        if srcy < 0 {
            h += srcy;
            dy -= srcy;
            srcy = 0;
        }
        h = h.min(src.h - srcy);

        let clip = self.clip;
        let d = clip.x - dx;
        if d > 0 {
            w -= d;
            dx += d;
            srcx += d;
        }
        let d = dx + w - clip.x - clip.w;
        if d > 0 {
            w -= d;
        }
        let d = clip.y - dy;
        if d > 0 {
            h -= d;
            dy += d;
            srcy += d;
        }
        let d = dy + h - clip.y - clip.h;
        if d > 0 {
            h -= d;
        }

        if w <= 0 || h <= 0 {
            return;
        }
        for y in 0..h {
            let src_row = ((srcy + y) * src.w) as usize;
            let dst_row = ((dy + y) * self.w) as usize;
            for x in 0..w {
                let sx = if flip_x { srcx + (w - x - 1) } else { srcx + x };
                let p = src.pixels[src_row + sx as usize];
                if p != 0 {
                    let col = if override_col != 0 { override_col } else { p };
                    self.pixels[dst_row + (dx + x) as usize] = pal.resolve(col as i32);
                }
            }
        }
    }
}

/// The console framebuffer plus the logical-coordinate draw operations.
#[derive(Debug, Clone)]
pub struct Canvas {
    scale: i32,
    surf: Surface,
}

impl Canvas {
    pub fn new(scale: i32) -> Self {
        Self {
            scale,
            surf: Surface::new(LOGICAL_SIZE * scale, LOGICAL_SIZE * scale),
        }
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn surface(&self) -> &Surface {
        &self.surf
    }

    /// Logical pixel at (x, y): the base-palette index of the top-left sample
    /// of its scale x scale block.
    pub fn logical_pixel(&self, x: i32, y: i32) -> u8 {
        self.surf.pixel(x * self.scale, y * self.scale)
    }

    fn plot(&mut self, x: i32, y: i32, base: u8) {
        self.surf.fill_rect(
            Rect::new(x * self.scale, y * self.scale, self.scale, self.scale),
            base,
        );
    }

    /// Filled rectangle over the inclusive span [x0,x1] x [y0,y1]. A span
    /// with non-positive extent is a no-op.
    pub fn rect_fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: i32, pal: &Palette) {
        let w = (x1 - x0 + 1) * self.scale;
        let h = (y1 - y0 + 1) * self.scale;
        if w > 0 && h > 0 {
            self.surf
                .fill_rect(Rect::new(x0 * self.scale, y0 * self.scale, w, h), pal.resolve(col));
        }
    }

    /// Bresenham line. Endpoints are clamped into the surface before the walk
    /// starts, so a line with an off-screen endpoint is drawn from the clamped
    /// point rather than true-clipped, and the final endpoint is never
    /// plotted. Both are long-standing renderer behavior that recorded
    /// gameplay depends on.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: i32, pal: &Palette) {
        let clamp = |v: i32, max: i32| {
            if v < 0 {
                0
            } else if v >= max {
                max - 1
            } else {
                v
            }
        };
        let mut x0 = clamp(x0, self.surf.w);
        let mut y0 = clamp(y0, self.surf.h);
        let x1 = clamp(x1, self.surf.w);
        let y1 = clamp(y1, self.surf.h);

        let base = pal.resolve(col);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        if dx == 0 && dy == 0 {
            return;
        }
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        if dx == 0 {
            let mut y = y0;
            while y != y1 {
                self.plot(x0, y, base);
                y += sy;
            }
        } else if dy == 0 {
            let mut x = x0;
            while x != x1 {
                self.plot(x, y0, base);
                x += sx;
            }
        }
        while x0 != x1 || y0 != y1 {
            self.plot(x0, y0, base);
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Filled circle, built from chords rather than scanlines: one vertical
    /// and one horizontal chord through the center, then four mirrored
    /// segments per midpoint step. The faceted result differs visibly from a
    /// scanline disc and must stay that way.
    pub fn circ_fill(&mut self, cx: i32, cy: i32, r: i32, col: i32, pal: &Palette) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        // the stepping loop never covers the two diameters
        self.line(cx, cy - y, cx, cy + r, col, pal);
        self.line(cx + r, cy, cx - r, cy, col, pal);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.line(cx + x, cy + y, cx - x, cy + y, col, pal);
            self.line(cx + x, cy - y, cx - x, cy - y, col, pal);
            self.line(cx + y, cy + x, cx - y, cy + x, col, pal);
            self.line(cx + y, cy - x, cx - y, cy - x, col, pal);
        }
    }

    /// Draw one 8x8 tile from a sheet organized as a 16-column tile grid.
    pub fn draw_tile(
        &mut self,
        sheet: &Surface,
        tile: i32,
        x: i32,
        y: i32,
        flip_x: bool,
        flip_y: bool,
        pal: &Palette,
    ) {
        let cell = TILE_SIZE * self.scale;
        let src = Rect::new(
            (tile % SHEET_COLUMNS) * cell,
            (tile / SHEET_COLUMNS) * cell,
            cell,
            cell,
        );
        self.surf
            .blit_from(sheet, src, x * self.scale, y * self.scale, 0, flip_x, flip_y, pal);
    }

    /// Draw text glyph by glyph with a fixed 4-pixel advance. The glyph cell
    /// is `byte & 0x7F` in a 16-column font sheet. Color 0 keeps the glyph's
    /// own indices instead of recoloring.
    pub fn print(&mut self, text: &str, x: i32, y: i32, col: i32, pal: &Palette, font: &Surface) {
        let cell = TILE_SIZE * self.scale;
        let mut x = x;
        for byte in text.bytes() {
            let c = (byte & 0x7F) as i32;
            let src = Rect::new((c % 16) * cell, (c / 16) * cell, cell, cell);
            self.surf.blit_from(
                font,
                src,
                x * self.scale,
                y * self.scale,
                col.rem_euclid(16) as u8,
                false,
                false,
                pal,
            );
            x += 4;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(1)
    }

    fn pal() -> Palette {
        Palette::new()
    }

    #[test]
    fn from_logical_scales_pixels() {
        let data = [1u8, 2, 3, 4];
        let surf = Surface::from_logical(&data, 2, 2, 3).unwrap();
        assert_eq!(surf.width(), 6);
        assert_eq!(surf.pixel(0, 0), 1);
        assert_eq!(surf.pixel(2, 2), 1);
        assert_eq!(surf.pixel(3, 0), 2);
        assert_eq!(surf.pixel(5, 5), 4);
    }

    #[test]
    fn from_logical_rejects_bad_data() {
        assert_eq!(
            Surface::from_logical(&[0u8; 3], 2, 2, 1),
            Err(GfxError::DataSizeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            Surface::from_logical(&[], 0, 2, 1),
            Err(GfxError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rect_fill_covers_inclusive_span() {
        let mut c = canvas();
        c.rect_fill(2, 2, 5, 4, 7, &pal());
        assert_eq!(c.logical_pixel(2, 2), 7);
        assert_eq!(c.logical_pixel(5, 4), 7);
        assert_eq!(c.logical_pixel(6, 4), 0);
        assert_eq!(c.logical_pixel(5, 5), 0);
    }

    #[test]
    fn rect_fill_with_inverted_span_is_a_noop() {
        let mut c = canvas();
        c.rect_fill(0, 0, -1, -1, 7, &pal());
        assert!(c.surface().raw_pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn line_walk_skips_the_final_endpoint() {
        let mut c = canvas();
        c.line(0, 0, 5, 5, 7, &pal());
        for i in 0..5 {
            assert_eq!(c.logical_pixel(i, i), 7);
        }
        assert_eq!(c.logical_pixel(5, 5), 0);
    }

    #[test]
    fn line_clamps_offscreen_endpoints_instead_of_clipping() {
        let mut c = canvas();
        c.line(0, 60, 200, 60, 7, &pal());
        // the far endpoint clamps to x = 127, and the walk stops one short
        assert_eq!(c.logical_pixel(126, 60), 7);
        assert_eq!(c.logical_pixel(127, 60), 0);

        // a diagonal exiting the canvas bends toward the clamped endpoint
        // rather than continuing on its true slope
        let mut straight = canvas();
        straight.line(120, 0, 120, 100, 8, &pal());
        let mut clamped = canvas();
        clamped.line(120, 0, 200, 100, 8, &pal());
        assert_ne!(straight.surface().raw_pixels(), clamped.surface().raw_pixels());
    }

    #[test]
    fn circ_fill_is_chord_built_not_a_scanline_disc() {
        let mut c = canvas();
        c.circ_fill(10, 10, 3, 7, &pal());
        let set: usize = c
            .surface()
            .raw_pixels()
            .iter()
            .filter(|&&p| p != 0)
            .count();
        // pinned shape of the chord construction, including its asymmetries:
        // the vertical chord reaches the bottom but the horizontal chord
        // stops one pixel short of the left edge
        assert_eq!(set, 30);
        assert_eq!(c.logical_pixel(10, 13), 7);
        assert_eq!(c.logical_pixel(10, 7), 7);
        assert_eq!(c.logical_pixel(13, 10), 7);
        assert_eq!(c.logical_pixel(7, 10), 0);
        // faceted corners stay empty
        assert_eq!(c.logical_pixel(12, 12), 7);
        assert_eq!(c.logical_pixel(13, 13), 0);
        assert_eq!(c.logical_pixel(8, 12), 0);
    }

    #[test]
    fn blit_skips_transparent_and_honors_override() {
        let mut sheet_data = [0u8; 64];
        sheet_data[0] = 5; // one opaque pixel at (0, 0), rest transparent
        let sheet = Surface::from_logical(&sheet_data, 8, 8, 1).unwrap();
        let p = pal();

        let mut dst = Surface::new(8, 8);
        dst.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 0, false, false, &p);
        assert_eq!(dst.pixel(0, 0), 5);
        assert_eq!(dst.pixel(1, 0), 0);

        let mut dst = Surface::new(8, 8);
        dst.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 9, false, false, &p);
        assert_eq!(dst.pixel(0, 0), 9);
    }

    #[test]
    fn blit_applies_the_active_palette_at_write_time() {
        let sheet = Surface::from_logical(&[5u8; 64], 8, 8, 1).unwrap();
        let mut p = pal();
        p.remap(5, 12);
        let mut dst = Surface::new(8, 8);
        dst.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 0, false, false, &p);
        assert_eq!(dst.pixel(3, 3), 12);
        // a later remap must not touch what is already down
        p.remap(5, 1);
        assert_eq!(dst.pixel(3, 3), 12);
    }

    #[test]
    fn blit_flips_horizontally_only() {
        let mut data = [0u8; 64];
        for y in 0..8 {
            for x in 0..4 {
                data[x + y * 8] = 1;
                data[(x + 4) + y * 8] = 2;
            }
        }
        let sheet = Surface::from_logical(&data, 8, 8, 1).unwrap();
        let p = pal();

        let mut dst = Surface::new(8, 8);
        dst.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 0, true, false, &p);
        assert_eq!(dst.pixel(0, 0), 2);
        assert_eq!(dst.pixel(7, 0), 1);

        // the vertical flip flag is a no-op
        let mut plain = Surface::new(8, 8);
        plain.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 0, false, false, &p);
        let mut vflip = Surface::new(8, 8);
        vflip.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 0, false, true, &p);
        assert_eq!(plain.raw_pixels(), vflip.raw_pixels());
    }

    #[test]
    fn blit_clips_against_destination_clip_rect() {
        let sheet = Surface::from_logical(&[3u8; 64], 8, 8, 1).unwrap();
        let p = pal();
        let mut dst = Surface::new(16, 16);
        dst.set_clip(Rect::new(0, 0, 4, 16));
        dst.blit_from(&sheet, Rect::new(0, 0, 8, 8), 0, 0, 0, false, false, &p);
        assert_eq!(dst.pixel(3, 0), 3);
        assert_eq!(dst.pixel(4, 0), 0);
    }

    #[test]
    fn blit_partially_offscreen_draws_the_visible_part() {
        let sheet = Surface::from_logical(&[3u8; 64], 8, 8, 1).unwrap();
        let p = pal();
        let mut dst = Surface::new(16, 16);
        dst.blit_from(&sheet, Rect::new(0, 0, 8, 8), -4, -4, 0, false, false, &p);
        assert_eq!(dst.pixel(0, 0), 3);
        assert_eq!(dst.pixel(3, 3), 3);
        assert_eq!(dst.pixel(4, 4), 0);
    }

    #[test]
    fn print_advances_four_pixels_per_glyph() {
        // font sheet where glyph 'A' (cell 65: row 4, col 1) is solid index 5
        let mut data = vec![0u8; 128 * 128];
        for y in 0..8 {
            for x in 0..8 {
                data[(8 + x) + (32 + y) * 128] = 5;
            }
        }
        let font = Surface::from_logical(&data, 128, 128, 1).unwrap();
        let p = pal();

        let mut c = canvas();
        c.print("AA", 0, 0, 7, &p, &font);
        assert_eq!(c.logical_pixel(0, 0), 7);
        assert_eq!(c.logical_pixel(11, 0), 7);
        assert_eq!(c.logical_pixel(12, 0), 0);

        // color 0 keeps the glyph's own indices
        let mut c = canvas();
        c.print("A", 0, 0, 0, &p, &font);
        assert_eq!(c.logical_pixel(0, 0), 5);
    }
}
