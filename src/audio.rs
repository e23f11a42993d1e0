//! Audio engine port.
//!
//! The queue core drives playback exclusively through [`AudioEngine`];
//! decoding and device handling live behind it. The production engine is
//! a `rodio` sink, tests use a recording fake.

mod engine;

pub use engine::*;

use std::path::Path;

use crate::error::AudioError;

pub trait AudioEngine {
    /// Decode `path` and stage it, replacing whatever was loaded before.
    /// The track does not start until [`AudioEngine::play`].
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    fn play(&mut self);
    fn stop(&mut self);
    fn unload(&mut self);
    /// Whether the engine still has audio to emit for the current track.
    fn is_busy(&self) -> bool;
    /// Playback position within the current track.
    fn position_millis(&self) -> u64;
}
