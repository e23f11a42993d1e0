//! User-defined macros: session-scoped aliases that expand to command
//! tokens at dispatch time, with an optional JSON-persisted set that
//! outlives the session.

mod ops;
mod store;

pub use store::*;
