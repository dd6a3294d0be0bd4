//! Splitting normal text into plain runs and special items
//!
//! Chat services embed mentions, channel references and links in message text
//! as `<...>` items. This module cuts a (non-preformatted) segment into plain
//! runs and raw special items, keeping every byte: concatenating
//! [Token::as_str] over the output gives back the input.
//!
//! There is no escaping and no nesting. A `<` always opens an item that ends
//! at the next `>`, wherever that is. A `<` with no `>` after it is an error,
//! since the text is untrusted input.
//!
//! The raw lexing is done by [logos]; [TokenSplitter] adapts it into tokens.

use logos::Logos;
use serde::Serialize;
use tracing::{debug, trace};

use super::error::{ParseError, ParseResult};
use super::special::SpecialItem;

/// Raw token kinds recognised by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    // Everything up to the next '<'
    #[regex(r"[^<]+")]
    Text,

    // '<' up to and including the first '>'. SpecialItem::from_lexed relies on
    // every match starting with '<' and ending with '>'.
    #[regex(r"<[^>]*>")]
    Special,
}

/// One piece of a normal text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Token<'a> {
    /// Text with no special items in it
    Plain(&'a str),
    /// A `<...>` item, delimiters included
    Special(SpecialItem<'a>),
}

impl<'a> Token<'a> {
    /// The exact source slice this token was cut from.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Plain(text) => text,
            Token::Special(item) => item.raw(),
        }
    }

    pub fn as_special(&self) -> Option<&SpecialItem<'a>> {
        match self {
            Token::Special(item) => Some(item),
            Token::Plain(_) => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Token::Plain(_))
    }
}

/// Lazy splitter over a text segment. See [split_tokens].
///
/// Yields `Err` at most once, then ends.
pub struct TokenSplitter<'a> {
    lexer: logos::Lexer<'a, RawToken>,
    failed: bool,
}

/// Split `text` into plain runs and special items.
pub fn split_tokens(text: &str) -> TokenSplitter<'_> {
    TokenSplitter {
        lexer: RawToken::lexer(text),
        failed: false,
    }
}

/// Eager form of [split_tokens].
pub fn tokenize(text: &str) -> ParseResult<Vec<Token<'_>>> {
    split_tokens(text).collect()
}

impl<'a> Iterator for TokenSplitter<'a> {
    type Item = ParseResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let raw = self.lexer.next()?;
        let slice = self.lexer.slice();
        match raw {
            Ok(RawToken::Text) => Some(Ok(Token::Plain(slice))),
            Ok(RawToken::Special) => {
                trace!(item = slice, "special item");
                Some(Ok(Token::Special(SpecialItem::from_lexed(slice))))
            }
            Err(()) => {
                self.failed = true;
                let offset = self.lexer.span().start;
                debug!(offset, "'<' without closing '>'");
                Some(Err(ParseError::MalformedToken { offset }))
            }
        }
    }
}

impl std::iter::FusedIterator for TokenSplitter<'_> {}
