//! Markup entity escaping
//!
//! Chat services send `&`, `<` and `>` inside message text as `&amp;`,
//! `&lt;` and `&gt;`, so that a literal `<` can't be mistaken for a special
//! item. Unescape plain runs and labels after splitting, never the whole
//! message before it. Escape outgoing text before sending it.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ESCAPABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[&<>]").expect("valid regex"));
static ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(amp|lt|gt);").expect("valid regex"));

/// Replace `&`, `<` and `>` with their entities.
pub fn escape(text: &str) -> Cow<'_, str> {
    ESCAPABLE.replace_all(text, |caps: &Captures| match &caps[0] {
        "&" => "&amp;",
        "<" => "&lt;",
        _ => "&gt;",
    })
}

/// Replace `&amp;`, `&lt;` and `&gt;` with the characters they stand for.
///
/// Other entities are left as they are.
pub fn unescape(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        _ => ">",
    })
}
