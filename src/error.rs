//! Error types for the label engine
//!
//! The engine itself never surfaces these to the host: failed attribute
//! applications and layout queries degrade to "no style" / "no link".
//! They exist for the internal seams (attributed text, JS bridge, config).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    /// A range does not fit inside the text it was applied to (UTF-16 units)
    #[error("Range {start}+{length} out of bounds for text of length {text_len}")]
    RangeOutOfBounds {
        start: usize,
        length: usize,
        text_len: usize,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The external layout collaborator failed to answer a query
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LabelError {
    fn from(e: serde_json::Error) -> Self {
        LabelError::InvalidConfig(e.to_string())
    }
}

pub type LabelResult<T> = Result<T, LabelError>;
