use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::rng;

use crate::error::QueueError;
use crate::macros::MacroStore;

/// The shared mutable state of one shell session.
///
/// `queue` is the canonical play order; `shuffled` holds the same tracks
/// in an independent order and is what plays while `shuffle_active`.
/// Mutations that change the track set keep both sides in sync.
pub struct Session {
    pub queue: Vec<String>,
    pub shuffled: Vec<String>,
    /// Track name -> whole seconds, populated when a track is added.
    pub durations: HashMap<String, u64>,

    /// One slot past the currently playing track, except at the end of a
    /// non-looping queue where it holds at the last index.
    pub position: usize,
    pub shuffle_active: bool,
    pub loop_active: bool,
    pub playing_queue: bool,
    pub paused: bool,
    pub current: Option<String>,
    /// Seconds already consumed before the engine's position counter
    /// started (survives for seek-style adjustments).
    pub elapsed_offset: u64,
    /// Remaining repeat count for the current track.
    pub loops: u32,
    /// Duration of the current track in seconds.
    pub duration: f64,

    pub macros: MacroStore,
}

impl Session {
    pub fn new(macros: MacroStore) -> Self {
        Self {
            queue: Vec::new(),
            shuffled: Vec::new(),
            durations: HashMap::new(),
            position: 0,
            shuffle_active: false,
            loop_active: false,
            playing_queue: false,
            paused: false,
            current: None,
            elapsed_offset: 0,
            loops: 0,
            duration: 0.0,
            macros,
        }
    }

    /// The order tracks actually play in right now.
    pub fn active_queue(&self) -> &[String] {
        if self.shuffle_active {
            &self.shuffled
        } else {
            &self.queue
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queue.iter().any(|s| s == name)
    }

    /// Append a track to both queues and cache its duration.
    pub fn add_track(&mut self, name: String, duration_secs: u64) -> Result<(), QueueError> {
        if self.contains(&name) {
            return Err(QueueError::DuplicateTrack);
        }
        self.durations.insert(name.clone(), duration_secs);
        self.shuffled.push(name.clone());
        self.queue.push(name);
        Ok(())
    }

    /// Remove a track from both queues and drop its cached duration.
    ///
    /// When the removed track preceded the cursor of a playing queue, the
    /// cursor shifts back one so "next track" stays the same track.
    pub fn remove_track(&mut self, name: &str) -> Result<(), QueueError> {
        let Some(idx) = self.queue.iter().position(|s| s == name) else {
            return Err(QueueError::NotInQueue);
        };
        self.queue.remove(idx);
        self.shuffled.retain(|s| s != name);
        self.durations.remove(name);
        if self.playing_queue && idx < self.position {
            self.position = self.position.saturating_sub(1);
        }
        // The cursor may never point past the end of the shrunken queue.
        if self.position > self.queue.len() {
            self.position = self.queue.len();
        }
        Ok(())
    }

    /// Empty everything and stop advancing.
    pub fn clear(&mut self) {
        self.position = 0;
        self.queue.clear();
        self.shuffled.clear();
        self.durations.clear();
        self.playing_queue = false;
        // Bad things would happen if we tried to advance and the queue was
        // suddenly empty.
    }

    /// Exchange the canonical positions of two queued tracks.
    pub fn swap_tracks(&mut self, first: &str, second: &str) -> Result<(), QueueError> {
        let a = self
            .queue
            .iter()
            .position(|s| s == first)
            .ok_or(QueueError::NotInQueue)?;
        let b = self
            .queue
            .iter()
            .position(|s| s == second)
            .ok_or(QueueError::NotInQueue)?;
        self.queue.swap(a, b);
        Ok(())
    }

    /// Move a queued track to a 0-based canonical position.
    pub fn move_track(&mut self, name: &str, index: usize) -> Result<(), QueueError> {
        let Some(cur) = self.queue.iter().position(|s| s == name) else {
            return Err(QueueError::NotInQueue);
        };
        let track = self.queue.remove(cur);
        let index = index.min(self.queue.len());
        self.queue.insert(index, track);
        Ok(())
    }

    /// Re-permute the shuffled queue until its order visibly changes, then
    /// make it the active order. Returns false when there is nothing to
    /// randomize (fewer than two tracks).
    pub fn randomize(&mut self) -> bool {
        if self.shuffled.len() <= 1 {
            return false;
        }
        let initial = self.shuffled.clone();
        while self.shuffled == initial {
            self.shuffled.shuffle(&mut rng());
        }
        self.shuffle_active = true;
        true
    }

    /// Flip between the canonical and shuffled orders. A never-randomized
    /// shuffled queue is indistinguishable from the canonical one, so
    /// toggling forces a first randomize to make the switch observable.
    /// Returns false when that randomize had nothing to work on.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_active = !self.shuffle_active;
        if self.queue == self.shuffled {
            return self.randomize();
        }
        true
    }

    /// Swap in a freshly loaded queue: shuffled order and cursor reset,
    /// duration cache cleared for the caller to rebuild.
    pub fn replace_queue(&mut self, tracks: Vec<String>) {
        self.shuffled = tracks.clone();
        self.queue = tracks;
        self.durations.clear();
        self.position = 0;
    }
}
