//! Code fence splitting
//!
//! A message alternates between normal text and preformatted blocks, each
//! block delimited by three backticks. The fences themselves are dropped:
//! concatenating every segment gives back the message without its fences.
//!
//! Fences need not be balanced. After an odd fence the rest of the message
//! is preformatted, which is how chat clients display a block that was never
//! closed. [split_fences_strict] rejects that case instead.

use serde::Serialize;
use tracing::debug;

use super::error::{ParseError, ParseResult};

/// The fence delimiter.
pub const FENCE: &str = "```";

/// A maximal run of text that is either all preformatted or all normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub preformatted: bool,
}

impl<'a> Segment<'a> {
    pub fn new(text: &'a str, preformatted: bool) -> Self {
        Self { text, preformatted }
    }
}

/// Iterator over the segments of a message. See [split_fences].
///
/// Cloning an unconsumed iterator restarts the scan.
#[derive(Debug, Clone)]
pub struct Fences<'a> {
    rest: Option<&'a str>,
    preformatted: bool,
}

/// Split `message` into preformatted and normal segments.
///
/// Always yields at least one segment; the empty message yields `("", false)`.
pub fn split_fences(message: &str) -> Fences<'_> {
    Fences {
        rest: Some(message),
        preformatted: false,
    }
}

/// Like [split_fences] but fails when the last fence is never closed.
///
/// The error offset points at the opening fence that has no partner.
pub fn split_fences_strict(message: &str) -> ParseResult<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut offset = 0;
    let mut last_open = None;

    for segment in split_fences(message) {
        if segment.preformatted {
            last_open = Some(offset - FENCE.len());
        } else {
            last_open = None;
        }
        offset += segment.text.len() + FENCE.len();
        segments.push(segment);
    }

    match last_open {
        Some(offset) => {
            debug!(offset, "unterminated code fence");
            Err(ParseError::UnterminatedFence { offset })
        }
        None => Ok(segments),
    }
}

impl<'a> Iterator for Fences<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let preformatted = self.preformatted;

        match rest.find(FENCE) {
            Some(p) => {
                self.rest = Some(&rest[p + FENCE.len()..]);
                self.preformatted = !preformatted;
                Some(Segment::new(&rest[..p], preformatted))
            }
            None => {
                self.rest = None;
                Some(Segment::new(rest, preformatted))
            }
        }
    }
}

impl std::iter::FusedIterator for Fences<'_> {}
