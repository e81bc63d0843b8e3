//! Error types for font loading and coverage scanning.

use std::{io, path::PathBuf, result};

use read_fonts::ReadError;

/// Errors that can occur while loading a font or computing its coverage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("face index {index} out of range (file has {count} faces)")]
    FaceOutOfRange { index: u32, count: u32 },

    #[error("no Unicode cmap subtable in font")]
    NoCharmap,
}

pub type Result<T> = result::Result<T, Error>;
