//! Error taxonomies for the shell core.
//!
//! Nothing here is fatal: every variant is reported to the user at the
//! point of failure and the REPL keeps going with in-memory state.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("That song is already in the queue")]
    DuplicateTrack,

    #[error("That song is not in the queue")]
    NotInQueue,

    #[error("Index must be a number between 1-{max}, not {given}")]
    InvalidIndex { given: i64, max: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MacroError {
    #[error("Macros can't be named existing commands")]
    ReservedName,

    #[error("Macro needs at least one argument")]
    EmptyExpansion,

    #[error("Recursive macros are not allowed")]
    Recursive,
}

/// Failures touching the persisted macro file.
#[derive(Debug, Error)]
pub enum MacroFileError {
    #[error("couldn't access the macro file: {0}")]
    Io(#[from] std::io::Error),

    #[error("macro file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("That playlist doesn't exist")]
    NotFound,

    #[error("couldn't access the playlist file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no usable audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("couldn't open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("couldn't decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("couldn't read tags: {0}")]
    Read(#[from] lofty::error::LoftyError),
}
