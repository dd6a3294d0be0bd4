//! Edit corrections in `s/old/new/` notation
//!
//! When a chat message is edited, IRC users expect the change spelled out
//! the way they would type it themselves. The diff is word based (split on
//! single spaces) and aimed at small edits: it keeps the common leading and
//! trailing words and reports the window in between.

use tracing::debug;

/// Describe the edit from `old` to `new` as `s/old words/new words/`.
///
/// Returns `None` when the texts are identical. An empty old window is
/// written as `$`, so an insertion at the end of an empty message reads
/// `s/$/text/`.
pub fn sed_correction(old: &str, new: &str) -> Option<String> {
    if old == new {
        return None;
    }

    let old_words: Vec<&str> = old.split(' ').collect();
    let new_words: Vec<&str> = new.split(' ').collect();

    let mut prefix = old_words
        .iter()
        .zip(&new_words)
        .take_while(|(a, b)| a == b)
        .count();
    let mut postfix = old_words
        .iter()
        .rev()
        .zip(new_words.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    // Insertion or removal: widen the window by one word on each side
    if prefix > 0 && postfix > 0 && old_words.len() != new_words.len() {
        prefix -= 1;
        postfix -= 1;
    }

    let from = window(&old_words, prefix, postfix);
    let to = window(&new_words, prefix, postfix);
    debug!(prefix, postfix, from = %from, to = %to, "edit correction");

    let from = if from.is_empty() { "$".to_string() } else { from };
    Some(format!("s/{}/{}/", from, to))
}

/// Words between `prefix` and `len - postfix`, joined by spaces.
fn window(words: &[&str], prefix: usize, postfix: usize) -> String {
    let end = words.len().saturating_sub(postfix);
    if prefix >= end {
        return String::new();
    }
    words[prefix..end].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_have_no_correction() {
        assert_eq!(sed_correction("same text", "same text"), None);
    }

    #[test]
    fn replaced_word_in_the_middle() {
        assert_eq!(sed_correction("a b c", "a x c").as_deref(), Some("s/b/x/"));
    }

    #[test]
    fn replaced_last_word() {
        assert_eq!(
            sed_correction("ciao mondo", "ciao monda").as_deref(),
            Some("s/mondo/monda/")
        );
    }

    #[test]
    fn inserted_word_keeps_context() {
        assert_eq!(
            sed_correction("hello world", "hello there world").as_deref(),
            Some("s/hello world/hello there world/")
        );
    }

    #[test]
    fn removed_word_keeps_context() {
        assert_eq!(
            sed_correction("one two three four", "one three four").as_deref(),
            Some("s/one two three/one three/")
        );
    }

    #[test]
    fn empty_old_text_is_dollar() {
        assert_eq!(sed_correction("", "new").as_deref(), Some("s/$/new/"));
    }

    #[test]
    fn appended_word_at_end() {
        assert_eq!(sed_correction("a b", "a b c").as_deref(), Some("s/$/c/"));
    }
}
