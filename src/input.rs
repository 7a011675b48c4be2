//! Per-tick button snapshot and edge detection.

use bitflags::bitflags;

bitflags! {
    /// Logical button bit-set sampled once per tick.
    ///
    /// Bits 0..=5 are the game buttons the game logic may query. The higher
    /// bits are host-level pseudo buttons consumed by the frame pacer and
    /// never exposed through the command boundary. A frontend ORs every
    /// physical input mapped to the same logical button into one bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const ACTION1 = 1 << 4;
        const ACTION2 = 1 << 5;
        const SAVE_STATE = 1 << 6;
        const LOAD_STATE = 1 << 7;
        const EXIT = 1 << 8;
        const PAUSE = 1 << 9;
    }
}

/// Current-tick button state plus the previous tick's copy for edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    current: Buttons,
    previous: Buttons,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install this tick's snapshot, retiring the previous one.
    pub fn begin_frame(&mut self, sampled: Buttons) {
        self.previous = self.current;
        self.current = sampled;
    }

    pub fn held(&self, buttons: Buttons) -> bool {
        self.current.contains(buttons)
    }

    /// Rising edge: down this tick, up the previous tick.
    pub fn just_pressed(&self, buttons: Buttons) -> bool {
        self.current.contains(buttons) && !self.previous.contains(buttons)
    }

    /// Game-button query by index 0..=5. Out-of-range indexes are a contract
    /// violation by the caller; release builds answer false.
    pub fn button(&self, index: i32) -> bool {
        debug_assert!((0..=5).contains(&index), "game buttons are indexed 0..=5");
        (0..=5).contains(&index) && self.current.bits() & (1 << index) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_indexes_match_bits() {
        let mut input = InputState::new();
        input.begin_frame(Buttons::LEFT | Buttons::ACTION2);
        assert!(input.button(0));
        assert!(!input.button(1));
        assert!(input.button(5));
    }

    #[test]
    fn just_pressed_fires_on_rising_edge_only() {
        let mut input = InputState::new();
        input.begin_frame(Buttons::PAUSE);
        assert!(input.just_pressed(Buttons::PAUSE));
        input.begin_frame(Buttons::PAUSE);
        assert!(input.held(Buttons::PAUSE));
        assert!(!input.just_pressed(Buttons::PAUSE));
        input.begin_frame(Buttons::empty());
        input.begin_frame(Buttons::PAUSE);
        assert!(input.just_pressed(Buttons::PAUSE));
    }

    #[test]
    fn pseudo_buttons_are_not_game_buttons() {
        let mut input = InputState::new();
        input.begin_frame(Buttons::SAVE_STATE | Buttons::EXIT);
        for index in 0..=5 {
            assert!(!input.button(index));
        }
    }
}
