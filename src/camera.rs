//! Screen-shake camera offset.

/// Camera offset subtracted from draw coordinates at the command boundary.
///
/// The offset only exists to carry the screen-shake effect, so it is gated by
/// a host-level enable flag: while shake is disabled, set requests are ignored
/// and the stored offset collapses back to (0, 0) on the next query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) shake_enabled: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            shake_enabled: true,
        }
    }

    /// Request a new offset. Silently ignored while shake is disabled.
    pub fn set(&mut self, x: i32, y: i32) {
        if self.shake_enabled {
            self.x = x;
            self.y = y;
        }
    }

    /// Current offset, zeroing any stale value when shake is disabled.
    pub fn offset(&mut self) -> (i32, i32) {
        if !self.shake_enabled {
            self.x = 0;
            self.y = 0;
        }
        (self.x, self.y)
    }

    pub fn shake_enabled(&self) -> bool {
        self.shake_enabled
    }

    pub fn set_shake_enabled(&mut self, enabled: bool) {
        self.shake_enabled = enabled;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_applies_when_shake_enabled() {
        let mut cam = Camera::new();
        cam.set(10, -3);
        assert_eq!(cam.offset(), (10, -3));
    }

    #[test]
    fn set_ignored_when_shake_disabled() {
        let mut cam = Camera::new();
        cam.set_shake_enabled(false);
        cam.set(10, 10);
        assert_eq!(cam.offset(), (0, 0));
    }

    #[test]
    fn disabling_shake_zeroes_a_stale_offset() {
        let mut cam = Camera::new();
        cam.set(5, 5);
        cam.set_shake_enabled(false);
        assert_eq!(cam.offset(), (0, 0));
        cam.set_shake_enabled(true);
        cam.set(7, 2);
        assert_eq!(cam.offset(), (7, 2));
    }
}
