//! Main module for chatmark library functionality

pub mod correction;
pub mod entities;
pub mod error;
pub mod fences;
pub mod message;
pub mod special;
pub mod tokens;

pub use error::{ParseError, ParseResult};
pub use fences::{split_fences, split_fences_strict, Fences, Segment};
pub use message::{parse_message, Block, ParseOptions};
pub use special::{ItemKind, SpecialItem};
pub use tokens::{split_tokens, tokenize, Token, TokenSplitter};
