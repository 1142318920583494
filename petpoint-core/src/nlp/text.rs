//! Text normalisation

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Lowercase and strip everything that is neither a word character nor
/// whitespace.
pub fn clean_text(text: &str) -> String {
    NON_WORD_RE.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Split already-cleaned text on whitespace
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_lowercases_and_strips_punctuation() {
        assert_eq!(clean_text("Halo, Kucing-ku SAKIT!?"), "halo kucingku sakit");
    }

    #[test]
    fn test_clean_text_keeps_underscores_digits_and_unicode_letters() {
        assert_eq!(clean_text("pet_id 42 Ünïcode."), "pet_id 42 ünïcode");
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  anjing  saya\tsakit "), vec!["anjing", "saya", "sakit"]);
        assert!(tokenize("   ").is_empty());
    }
}
