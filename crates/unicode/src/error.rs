use std::result;

/// Errors that can occur while classifying a codepoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnicodeError {
    #[error("codepoint U+{0:04X} is outside the Unicode codespace")]
    OutOfRange(u32),
}

pub type Result<T> = result::Result<T, UnicodeError>;
