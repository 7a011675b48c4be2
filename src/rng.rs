//! Deterministic two-word pseudo-random generator.
//!
//! This is the console's decompiled generator, kept bit-exact because replay
//! and save-state compatibility depend on it. All arithmetic is unsigned
//! 32-bit with wraparound; nothing here clamps or saturates.

const SEED_ZERO_SUBSTITUTE: u32 = 0xdead_beef;
const SEED_ZERO_HI: u32 = 0x6000_9755;
const SEED_MIX: u32 = 0xbead_29ba;
const SEED_ROUNDS: u32 = 0x20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rng {
    lo: u32,
    hi: u32,
}

impl Rng {
    pub fn new() -> Self {
        Self { lo: 0, hi: 1 }
    }

    /// Reseed the generator. A zero seed is substituted with a fixed nonzero
    /// constant so the mixing rounds never run on all-zero state.
    pub fn seed(&mut self, seed: u32) {
        let mut s = seed;
        if s == 0 {
            self.hi = SEED_ZERO_HI;
            s = SEED_ZERO_SUBSTITUTE;
        } else {
            self.hi = s ^ SEED_MIX;
        }
        for _ in 0..SEED_ROUNDS {
            self.hi = self.hi.rotate_left(16).wrapping_add(s);
            s = s.wrapping_add(self.hi);
        }
        self.lo = s;
    }

    /// Draw an integer in `[0, max)`. `max == 0` returns 0 without advancing.
    pub fn next_int(&mut self, max: i32) -> i32 {
        if max == 0 {
            return 0;
        }
        self.hi = self.hi.rotate_left(16).wrapping_add(self.lo);
        self.lo = self.lo.wrapping_add(self.hi);
        (self.hi % max as u32) as i32
    }

    /// Draw a float in `[0, max)` through 16.16 fixed point.
    pub fn next_float(&mut self, max: f32) -> f32 {
        let n = self.next_int((max * 65536.0) as i32);
        n as f32 / 65536.0
    }

    pub(crate) fn words(&self) -> (u32, u32) {
        (self.lo, self.hi)
    }

    pub(crate) fn set_words(&mut self, lo: u32, hi: u32) {
        self.lo = lo;
        self.hi = hi;
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}
