//! Read-only tilemap and per-tile flag queries.

use thiserror::Error;

use crate::gfx::{Canvas, Surface, TILE_SIZE};
use crate::palette::Palette;

/// Tilemap edge length in tiles.
pub const MAP_SIZE: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TilemapError {
    #[error("tile grid is {actual} entries, expected {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
}

/// A fixed 128x128 grid of tile ids plus an 8-bit flag set per tile id.
/// Loaded once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    tiles: Vec<u8>,
    flags: Vec<u8>,
}

impl Tilemap {
    /// An all-zero map with no flags, used until real data is loaded.
    pub fn empty() -> Self {
        Self {
            tiles: vec![0; MAP_SIZE * MAP_SIZE],
            flags: Vec::new(),
        }
    }

    /// Build from a row-major tile grid and a flag table indexed by tile id.
    /// The flag table may be shorter than the id space; queries past its end
    /// answer false.
    pub fn from_parts(tiles: Vec<u8>, flags: Vec<u8>) -> Result<Self, TilemapError> {
        let expected = MAP_SIZE * MAP_SIZE;
        if tiles.len() != expected {
            return Err(TilemapError::GridSizeMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self { tiles, flags })
    }

    /// Tile id at the given cell; 0 outside the grid.
    pub fn tile_at(&self, tx: i32, ty: i32) -> i32 {
        if (0..MAP_SIZE as i32).contains(&tx) && (0..MAP_SIZE as i32).contains(&ty) {
            self.tiles[tx as usize + ty as usize * MAP_SIZE] as i32
        } else {
            0
        }
    }

    /// Raw flag byte for a tile id; 0 for ids past the flag table.
    pub fn flags_of(&self, tile: i32) -> u8 {
        usize::try_from(tile)
            .ok()
            .and_then(|t| self.flags.get(t).copied())
            .unwrap_or(0)
    }

    /// Whether `bit` is set in the tile's flag byte. Out-of-range tile ids or
    /// bits answer false rather than failing.
    pub fn flag(&self, tile: i32, bit: i32) -> bool {
        (0..8).contains(&bit) && self.flags_of(tile) & (1 << bit) != 0
    }

    /// The windowed-draw tile filter, kept verbatim from the console: mask 0
    /// draws everything, mask 4 additionally passes tiles whose flag byte
    /// equals 4 exactly, and any other mask tests flag bit (mask - 1).
    pub fn passes_mask(&self, tile: i32, mask: i32) -> bool {
        mask == 0
            || (mask == 4 && self.flags_of(tile) == 4)
            || self.flag(tile, if mask != 4 { mask - 1 } else { mask })
    }

    /// Draw the w x h tile window starting at (map_x, map_y) to the screen
    /// position (screen_x, screen_y), one blit per tile passing the mask.
    /// Screen coordinates are expected to be camera-adjusted already.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_window(
        &self,
        canvas: &mut Canvas,
        sheet: &Surface,
        pal: &Palette,
        map_x: i32,
        map_y: i32,
        screen_x: i32,
        screen_y: i32,
        w: i32,
        h: i32,
        mask: i32,
    ) {
        for x in 0..w {
            for y in 0..h {
                let tile = self.tile_at(x + map_x, y + map_y);
                if self.passes_mask(tile, mask) {
                    canvas.draw_tile(
                        sheet,
                        tile,
                        screen_x + x * TILE_SIZE,
                        screen_y + y * TILE_SIZE,
                        false,
                        false,
                        pal,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(entries: &[(usize, usize, u8)], flags: Vec<u8>) -> Tilemap {
        let mut tiles = vec![0u8; MAP_SIZE * MAP_SIZE];
        for &(tx, ty, tile) in entries {
            tiles[tx + ty * MAP_SIZE] = tile;
        }
        Tilemap::from_parts(tiles, flags).unwrap()
    }

    #[test]
    fn from_parts_rejects_wrong_grid_size() {
        assert_eq!(
            Tilemap::from_parts(vec![0; 10], Vec::new()),
            Err(TilemapError::GridSizeMismatch {
                expected: MAP_SIZE * MAP_SIZE,
                actual: 10
            })
        );
    }

    #[test]
    fn tile_lookup_is_bounds_checked() {
        let map = map_with(&[(3, 2, 7)], Vec::new());
        assert_eq!(map.tile_at(3, 2), 7);
        assert_eq!(map.tile_at(-1, 2), 0);
        assert_eq!(map.tile_at(3, 128), 0);
    }

    #[test]
    fn flag_queries_have_safe_defaults() {
        let map = map_with(&[], vec![0b0000_0101]);
        assert!(map.flag(0, 0));
        assert!(!map.flag(0, 1));
        assert!(map.flag(0, 2));
        // past the flag table, negative, and out-of-range bits
        assert!(!map.flag(9999, 0));
        assert!(!map.flag(-1, 0));
        assert!(!map.flag(0, 8));
        assert!(!map.flag(0, -1));
    }

    #[test]
    fn mask_zero_passes_everything() {
        let map = map_with(&[], vec![0, 0xFF]);
        assert!(map.passes_mask(0, 0));
        assert!(map.passes_mask(1, 0));
        assert!(map.passes_mask(9999, 0));
    }

    #[test]
    fn mask_four_is_an_exact_equality_check() {
        // flags: tile 1 == 4 exactly, tile 2 has bit 2 set among others,
        // tile 3 has bit 4 set
        let map = map_with(&[], vec![0, 4, 5, 0x10]);
        assert!(map.passes_mask(1, 4));
        assert!(!map.passes_mask(2, 4), "flag value 5 is not exactly 4");
        assert!(!map.passes_mask(0, 4));
        // the legacy condition also lets bit 4 through; kept as-is
        assert!(map.passes_mask(3, 4));
    }

    #[test]
    fn other_masks_test_bit_mask_minus_one() {
        let map = map_with(&[], vec![0b0000_0010]);
        assert!(map.passes_mask(0, 2), "mask 2 tests bit 1");
        assert!(!map.passes_mask(0, 1), "mask 1 tests bit 0");
        assert!(!map.passes_mask(0, 3));
    }

    #[test]
    fn draw_window_blits_only_passing_tiles() {
        // sheet where tile id n is solid color n (tiles 1..=3 in row 0)
        let mut sheet_data = vec![0u8; 128 * 128];
        for tile in 1u8..=3 {
            for y in 0..8usize {
                for x in 0..8usize {
                    sheet_data[(tile as usize * 8 + x) + y * 128] = tile;
                }
            }
        }
        let sheet = Surface::from_logical(&sheet_data, 128, 128, 1).unwrap();
        let pal = Palette::new();

        // map row: tiles 1 (flags == 4), 2 (flags == 0), 3 (bit 0 set)
        let map = map_with(&[(0, 0, 1), (1, 0, 2), (2, 0, 3)], vec![0, 4, 0, 1]);

        let mut canvas = Canvas::new(1);
        map.draw_window(&mut canvas, &sheet, &pal, 0, 0, 0, 0, 3, 1, 4);
        assert_eq!(canvas.logical_pixel(0, 0), 1);
        assert_eq!(canvas.logical_pixel(8, 0), 0, "tile 2 filtered by mask 4");
        assert_eq!(canvas.logical_pixel(16, 0), 0);

        let mut canvas = Canvas::new(1);
        map.draw_window(&mut canvas, &sheet, &pal, 0, 0, 0, 0, 3, 1, 1);
        assert_eq!(canvas.logical_pixel(0, 0), 0);
        assert_eq!(canvas.logical_pixel(16, 0), 3, "mask 1 tests bit 0");

        let mut canvas = Canvas::new(1);
        map.draw_window(&mut canvas, &sheet, &pal, 0, 0, 0, 0, 3, 1, 0);
        assert_eq!(canvas.logical_pixel(0, 0), 1);
        assert_eq!(canvas.logical_pixel(8, 0), 2);
        assert_eq!(canvas.logical_pixel(16, 0), 3);
    }
}
