//! Special items: mentions, channels, group mentions and links
//!
//! A special item is the raw `<...>` slice cut out by the token splitter.
//! The character after `<` is a sigil selecting the [ItemKind]; the content
//! may carry a human readable label after the first `|`:
//!
//!     <@U024BE7LH>            mention
//!     <#C024BE7LR|general>    channel, labelled
//!     <!here>                 group mention
//!     <http://example.com|x>  anything else (links and the like)
//!
//! Kind, value and label are worked out from the raw slice on every call.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::error::{ParseError, ParseResult};

/// Classification of a special item by its sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// `<!...>`: here, channel, everyone and such
    GroupMention,
    /// `<@...>`: a user
    Mention,
    /// `<#...>`: a channel
    Channel,
    /// Everything else
    Other,
}

impl ItemKind {
    fn from_sigil(sigil: u8) -> Self {
        match sigil {
            b'!' => ItemKind::GroupMention,
            b'@' => ItemKind::Mention,
            b'#' => ItemKind::Channel,
            _ => ItemKind::Other,
        }
    }

    /// Name of the kind, as it appears in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::GroupMention => "group_mention",
            ItemKind::Mention => "mention",
            ItemKind::Channel => "channel",
            ItemKind::Other => "other",
        }
    }

    /// Whether the kind is marked by a one-character sigil after `<`.
    pub fn has_sigil(self) -> bool {
        self != ItemKind::Other
    }
}

/// A raw `<...>` item.
///
/// Always at least two bytes long, starting with `<` and ending with `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecialItem<'a> {
    raw: &'a str,
}

impl<'a> SpecialItem<'a> {
    /// Wrap `raw`, which must be enclosed in `<` and `>`.
    pub fn new(raw: &'a str) -> ParseResult<Self> {
        if raw.len() < 2 || !raw.starts_with('<') || !raw.ends_with('>') {
            return Err(ParseError::InvalidSpecialItem {
                raw: raw.to_string(),
            });
        }
        Ok(Self { raw })
    }

    /// Wrap a slice the lexer already matched as `<[^>]*>`.
    ///
    /// Skips the checks of [new](Self::new): the `Special` pattern in
    /// `tokens.rs` only matches text that starts with `<`, ends with `>` and
    /// is at least two bytes long. [value](Self::value) and
    /// [human](Self::human) slice up to `len - 1` and rely on it, so any
    /// change to that pattern must keep those three properties.
    pub(crate) fn from_lexed(raw: &'a str) -> Self {
        debug_assert!(raw.len() >= 2 && raw.starts_with('<') && raw.ends_with('>'));
        Self { raw }
    }

    /// The raw slice, delimiters included.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn kind(&self) -> ItemKind {
        // raw[1] is '>' for "<>", which falls through to Other
        ItemKind::from_sigil(self.raw.as_bytes()[1])
    }

    /// The identifier or content of the item, without sigil or label.
    pub fn value(&self) -> &'a str {
        let start = if self.kind().has_sigil() { 2 } else { 1 };
        let end = self.separator().unwrap_or(self.raw.len() - 1);
        // A sigil kind has its sigil at 1, so the first '|' is at 2 or later
        &self.raw[start..end]
    }

    /// The label after `|`, if the item has one.
    pub fn human(&self) -> Option<&'a str> {
        let sep = self.separator()?;
        Some(&self.raw[sep + 1..self.raw.len() - 1])
    }

    fn separator(&self) -> Option<usize> {
        self.raw.find('|')
    }
}

impl std::fmt::Display for SpecialItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}

impl Serialize for SpecialItem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SpecialItem", 4)?;
        state.serialize_field("raw", self.raw)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("value", self.value())?;
        state.serialize_field("human", &self.human())?;
        state.end()
    }
}
