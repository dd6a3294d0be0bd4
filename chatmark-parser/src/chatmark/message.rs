//! Whole-message parsing
//!
//! Runs the fence splitter over a message and the token splitter over every
//! normal segment. Preformatted text is left alone: a `<` inside a code block
//! is just a character.

use serde::Serialize;
use tracing::debug;

use super::error::ParseResult;
use super::fences::{split_fences, split_fences_strict, Segment, FENCE};
use super::tokens::{tokenize, Token};

/// A parsed segment of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block<'a> {
    /// Text between fences, verbatim
    Preformatted(&'a str),
    /// Normal text, split into tokens
    Text(Vec<Token<'a>>),
}

impl<'a> Block<'a> {
    pub fn is_preformatted(&self) -> bool {
        matches!(self, Block::Preformatted(_))
    }

    pub fn tokens(&self) -> Option<&[Token<'a>]> {
        match self {
            Block::Text(tokens) => Some(tokens),
            Block::Preformatted(_) => None,
        }
    }
}

/// Knobs for [parse_message].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject messages whose last code fence is never closed
    pub strict_fences: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            strict_fences: true,
        }
    }
}

/// Parse a whole message into blocks, in source order.
///
/// Error offsets are byte offsets into `message`.
pub fn parse_message<'a>(message: &'a str, options: &ParseOptions) -> ParseResult<Vec<Block<'a>>> {
    let segments: Vec<Segment<'a>> = if options.strict_fences {
        split_fences_strict(message)?
    } else {
        split_fences(message).collect()
    };

    let mut blocks = Vec::with_capacity(segments.len());
    let mut start = 0;
    for segment in segments {
        if segment.preformatted {
            blocks.push(Block::Preformatted(segment.text));
        } else {
            let tokens = tokenize(segment.text).map_err(|e| e.shifted(start))?;
            blocks.push(Block::Text(tokens));
        }
        // Every segment but the last is followed by a fence
        start += segment.text.len() + FENCE.len();
    }

    debug!(blocks = blocks.len(), "parsed message");
    Ok(blocks)
}
