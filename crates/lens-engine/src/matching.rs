//! # Text Matching
//!
//! The two presence tests used by the detectors:
//!
//! - [`contains_keyword`]: plain substring over folded text, for framework
//!   keywords.
//! - [`PhraseSet`]: case-insensitive phrases whose ends fall on `\b` word
//!   boundaries, for dimension phrases. `"hey"` matches `"hey buddy"` but not
//!   `"they"` or `"hey_there"`.

use regex::RegexSet;

/// Lowercase `text` for case-insensitive comparison.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Whether a folded keyword occurs anywhere in folded text.
pub fn contains_keyword(folded_text: &str, folded_keyword: &str) -> bool {
    !folded_keyword.is_empty() && folded_text.contains(folded_keyword)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Regex source for one phrase. A boundary is only required on a side that
/// ends in a word character.
fn phrase_pattern(phrase: &str) -> String {
    let lead = if phrase.starts_with(is_word_char) { r"\b" } else { "" };
    let trail = if phrase.ends_with(is_word_char) { r"\b" } else { "" };
    format!("(?i){lead}{}{trail}", regex::escape(phrase))
}

/// A rule's phrases compiled into one [`RegexSet`].
#[derive(Debug, Clone)]
pub struct PhraseSet {
    phrases: &'static [&'static str],
    set: RegexSet,
}

impl PhraseSet {
    /// Compile `phrases`.
    pub fn new(phrases: &'static [&'static str]) -> Result<Self, regex::Error> {
        let set = RegexSet::new(phrases.iter().map(|phrase| phrase_pattern(phrase)))?;
        Ok(Self { phrases, set })
    }

    /// The phrases present in `text`, in declaration order.
    pub fn matches(&self, text: &str) -> impl Iterator<Item = &'static str> {
        let phrases = self.phrases;
        self.set
            .matches(text)
            .into_iter()
            .map(move |index| phrases[index])
            .filter(|phrase| !phrase.is_empty())
    }

    /// Whether any phrase is present in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.matches(text).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(phrases: &'static [&'static str]) -> PhraseSet {
        PhraseSet::new(phrases).unwrap()
    }

    fn hits(phrases: &'static [&'static str], text: &str) -> Vec<&'static str> {
        set(phrases).matches(text).collect()
    }

    #[test]
    fn fold_lowercases_unicode() {
        assert_eq!(fold("ALCOHOL Ümlaut"), "alcohol ümlaut");
    }

    #[test]
    fn keyword_is_plain_substring() {
        assert!(contains_keyword("alcoholic drinks", "alcohol"));
        assert!(!contains_keyword("water", "alcohol"));
        assert!(!contains_keyword("anything", ""));
    }

    #[test]
    fn phrase_respects_word_boundaries() {
        let hey = set(&["hey"]);
        assert!(hey.is_match("hey buddy, let's do this"));
        assert!(hey.is_match("well, hey!"));
        assert!(!hey.is_match("they said so"));
        assert!(!hey.is_match("heyday"));
    }

    #[test]
    fn underscore_is_a_word_character() {
        assert!(!set(&["hey"]).is_match("hey_there"));
    }

    #[test]
    fn phrase_matches_later_occurrence_after_glued_one() {
        assert!(set(&["hey"]).is_match("they say hey"));
    }

    #[test]
    fn phrase_matching_ignores_case() {
        assert_eq!(hits(&["treat yourself"], "Go on, TREAT Yourself."), vec!["treat yourself"]);
    }

    #[test]
    fn multi_word_phrase() {
        assert!(set(&["treat yourself"]).is_match("go on, treat yourself."));
        assert!(!set(&["treat yourself"]).is_match("treat yourselves"));
    }

    #[test]
    fn punctuation_inside_phrase_is_literal() {
        assert!(set(&["what's up"]).is_match("so what's up?"));
        assert!(set(&["20-year"]).is_match("a 20-year plan"));
        assert!(!set(&["a.b"]).is_match("axb"));
    }

    #[test]
    fn lists_every_hit_in_declaration_order() {
        assert_eq!(
            hits(&["dominate", "crush the competition", "killer"], "Crush the competition and dominate"),
            vec!["dominate", "crush the competition"]
        );
    }

    #[test]
    fn empty_phrase_never_matches() {
        assert!(!set(&[""]).is_match("text"));
        assert!(!set(&[]).is_match("text"));
    }
}
