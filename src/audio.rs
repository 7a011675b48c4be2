//! Seam to the audio backend.
//!
//! The console only issues "play track N" / "play sfx N" requests; decoding
//! and mixing happen behind [`AudioSink`]. A backend with an empty slot is
//! expected to drop the request quietly (degraded audio, never a crash).

use log::trace;

/// Number of addressable sound-effect slots.
pub const SFX_SLOTS: usize = 64;

/// Number of music track slots; track ids are bucketed by tens.
pub const MUSIC_SLOTS: usize = 6;

pub trait AudioSink {
    /// Start looping the given track slot with a fade-in.
    fn play_music(&mut self, slot: usize, fade_ms: i32);
    /// Fade out and stop whatever is playing.
    fn stop_music(&mut self, fade_ms: i32);
    /// Fire one sound effect, fire-and-forget.
    fn play_sfx(&mut self, id: usize);
    /// Pause or resume all playback (host pause toggle).
    fn set_paused(&mut self, paused: bool);
}

/// Backend used when no audio device is wired up; requests are logged and
/// dropped.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_music(&mut self, slot: usize, fade_ms: i32) {
        trace!("music slot {slot} requested (fade {fade_ms}ms), no audio backend");
    }

    fn stop_music(&mut self, fade_ms: i32) {
        trace!("music stop requested (fade {fade_ms}ms), no audio backend");
    }

    fn play_sfx(&mut self, id: usize) {
        trace!("sfx {id} requested, no audio backend");
    }

    fn set_paused(&mut self, paused: bool) {
        trace!("audio pause -> {paused}, no audio backend");
    }
}
