//! Queue commands: the playback state machine (`play`/`next`/`prev`/
//! advance polling) and every mutation/report the `queue` command exposes.

mod format;
mod ops;

pub use format::*;
