//! Unicode text normalization

use crate::classifier::TextNormalizer;
use langsift_core::Result;
use regex::Regex;

/// Deterministic text normalizer.
///
/// Applies, in order and each over the whole string:
/// 1. full Unicode case folding
/// 2. apostrophes (`'`, `’`, `ʼ`, `＇`) become a single space, so `don't` keeps both halves
/// 3. decimal digits are removed
/// 4. everything that is not a letter, number or whitespace is removed
/// 5. modifier letters (`\p{Lm}`) are removed, precomposed accented letters stay
/// 6. whitespace runs collapse to one ASCII space, ends are trimmed
///
/// The output is idempotent: normalizing it again yields the same string.
pub struct UnicodeNormalizer {
    apostrophe_regex: Regex,
    digit_regex: Regex,
    non_alphanumeric_regex: Regex,
    modifier_regex: Regex,
}

impl UnicodeNormalizer {
    /// Create a new normalizer
    pub fn new() -> Result<Self> {
        Ok(Self {
            apostrophe_regex: Regex::new(r"['\x{2019}\x{02BC}\x{FF07}]")
                .map_err(|e| langsift_core::Error::config(format!("Failed to compile apostrophe regex: {}", e)))?,
            digit_regex: Regex::new(r"\p{Nd}")
                .map_err(|e| langsift_core::Error::config(format!("Failed to compile digit regex: {}", e)))?,
            non_alphanumeric_regex: Regex::new(r"[^\p{L}\p{N}\s]")
                .map_err(|e| langsift_core::Error::config(format!("Failed to compile alphanumeric regex: {}", e)))?,
            modifier_regex: Regex::new(r"\p{Lm}")
                .map_err(|e| langsift_core::Error::config(format!("Failed to compile modifier regex: {}", e)))?,
        })
    }
}

impl Default for UnicodeNormalizer {
    fn default() -> Self {
        Self::new().expect("Failed to create text normalizer")
    }
}

impl TextNormalizer for UnicodeNormalizer {
    fn normalize(&self, text: &str) -> String {
        let folded = caseless::default_case_fold_str(text);
        let spaced = self.apostrophe_regex.replace_all(&folded, " ");
        let no_digits = self.digit_regex.replace_all(&spaced, "");
        let alphanumeric = self.non_alphanumeric_regex.replace_all(&no_digits, "");
        let letters = self.modifier_regex.replace_all(&alphanumeric, "");

        letters.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
