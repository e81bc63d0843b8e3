//! Error types for building, decoding and checking character tables.

use std::result;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("encodings disagree: {0}")]
    Inconsistent(String),

    #[error("character {c:?} refers to font index {index}, but only {fonts} fonts are listed")]
    IndexOutOfRange { c: char, index: usize, fonts: usize },

    #[error("font {0:?} is not selected for any character")]
    OrphanFont(String),

    #[error("font list is not sorted and unique at {0:?}")]
    UnsortedFonts(String),

    #[error("character {0:?} is assigned to more than one font")]
    DuplicateCharacter(char),

    #[error("font {0:?} has an empty character sequence")]
    EmptyFontSequence(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, Error>;
