//! Session context: the queue store, its shuffled twin, the duration
//! cache, the playback cursor and the macro store — everything a command
//! mutates, owned in one place and passed explicitly instead of living in
//! globals.

mod model;

pub use model::*;
