//! Error types for message splitting

use thiserror::Error;

/// Errors that can occur while splitting a message.
///
/// Offsets are byte offsets into the string handed to the splitter that
/// reported the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An opening `<` with no `>` anywhere after it
    #[error("unterminated special item: '<' at byte {offset} has no closing '>'")]
    MalformedToken { offset: usize },
    /// Odd number of ``` fences (strict fence mode only)
    #[error("unterminated code fence opened at byte {offset}")]
    UnterminatedFence { offset: usize },
    /// Raw text handed to [`SpecialItem::new`](super::SpecialItem::new) is not `<...>`
    #[error("invalid special item {raw:?}: expected text enclosed in '<' and '>'")]
    InvalidSpecialItem { raw: String },
}

impl ParseError {
    /// Byte offset of the failure, when the error is tied to a position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::MalformedToken { offset } | ParseError::UnterminatedFence { offset } => {
                Some(*offset)
            }
            ParseError::InvalidSpecialItem { .. } => None,
        }
    }

    /// Move the offset forward by `by` bytes, for errors found in a slice
    /// that starts `by` bytes into a larger text.
    pub fn shifted(self, by: usize) -> Self {
        match self {
            ParseError::MalformedToken { offset } => ParseError::MalformedToken {
                offset: offset + by,
            },
            ParseError::UnterminatedFence { offset } => ParseError::UnterminatedFence {
                offset: offset + by,
            },
            other => other,
        }
    }
}

/// Type alias for splitter results
pub type ParseResult<T> = Result<T, ParseError>;
