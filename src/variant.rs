//! Tokenization candidates and the normalization pipeline.
//!
//! A [`SearchVariant`] is one candidate tokenization of an address string:
//! an ordered token sequence, most-general part first, most-specific last.
//! Normalization turns a raw string into the seed variant; the generator in
//! [`crate::generator`] expands that seed into the full candidate set.

use std::fmt;

use crate::junk::JunkWords;
use crate::tokens::{insert_at, is_numeric, join_range};

/// Hyphen used for house/building suffix splitting and building assembly.
pub(crate) const HYPHEN: char = '-';

/// Delimiter that probably separates sub-tokens inside one token.
pub(crate) const PROBABLE_DELIMITER: char = ' ';

/// Split a token on embedded probable delimiters, dropping empty fragments.
pub(crate) fn probable_sub_tokens(token: &str) -> Vec<&str> {
    token
        .split(PROBABLE_DELIMITER)
        .filter(|s| !s.is_empty())
        .collect()
}

/// One candidate tokenization of an address string.
///
/// Equality is structural: same length and same tokens at every position
/// (order-sensitive, case-sensitive). Cloning produces an independent copy.
/// Invariant: tokens are never empty strings after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchVariant {
    pub(crate) tokens: Vec<String>,
}

impl SearchVariant {
    /// Run the full normalization pipeline on a raw address string.
    ///
    /// The steps are applied once, in order: coarse split on structural
    /// punctuation (`. , ; / \`), whitespace trim, hyphen splitting,
    /// junk-word removal, digit/letter boundary split.
    ///
    /// An empty or all-punctuation input yields a variant with zero tokens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use postal_variants::{JunkWords, SearchVariant};
    ///
    /// let seed = SearchVariant::normalize("Москва, ул.Ленина, д.12", JunkWords::default_set());
    /// assert_eq!(seed.tokens(), ["Москва", "Ленина", "12"]);
    /// ```
    pub fn normalize(raw: &str, junk: &JunkWords) -> Self {
        // Interior whitespace runs collapse to a single probable delimiter,
        // so inputs differing only in whitespace normalize identically.
        let tokens = raw
            .split(['.', ',', ';', '/', '\\'])
            .map(|fragment| {
                fragment
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(&PROBABLE_DELIMITER.to_string())
            })
            .filter(|s| !s.is_empty())
            .collect();

        let mut variant = Self { tokens };
        variant.split_hyphens();
        variant.trim_junk_words(junk);
        variant.split_digit_letter();
        variant
    }

    /// Build a variant directly from pre-tokenized input.
    ///
    /// Empty tokens are dropped to uphold the no-empty-tokens invariant.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// The ordered token sequence.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the variant holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Peel trailing numeric hyphen fragments into their own tokens.
    ///
    /// Scans right-to-left. For each token, the hyphen-split fragments are
    /// peeled from the end one at a time while they stay numeric (fragment 0
    /// is never peeled), each inserted as a new token immediately after the
    /// source token, which is rewritten to the remaining hyphen-joined
    /// prefix. `"Заречный-12-3"` becomes `"Заречный"`, `"12"`, `"3"`;
    /// non-numeric hyphenated names are left intact.
    fn split_hyphens(&mut self) {
        for index in (0..self.tokens.len()).rev() {
            let subs: Vec<String> = self.tokens[index]
                .split(HYPHEN)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            for sub_index in (1..subs.len()).rev() {
                if !is_numeric(&subs[sub_index]) {
                    break;
                }
                insert_at(&mut self.tokens, index + 1, subs[sub_index].clone());
                self.tokens[index] = join_range(&subs, HYPHEN, 0, sub_index);
            }
        }
    }

    /// Remove every token that is a junk word.
    ///
    /// A single full filter pass; running it twice yields the same sequence
    /// as running it once.
    pub(crate) fn trim_junk_words(&mut self, junk: &JunkWords) {
        self.tokens.retain(|token| !junk.contains(token));
    }

    /// Split two glued trailing digits off an otherwise numeric token.
    ///
    /// A token splits iff both its content minus the last two characters and
    /// those last two characters are fully numeric (`"1225"` → `"12"`,
    /// `"25"`; `"кв25"` stays whole). Left-to-right over the growing list.
    pub(crate) fn split_digit_letter(&mut self) {
        let mut index = 0;
        while index < self.tokens.len() {
            let chars: Vec<char> = self.tokens[index].chars().collect();
            if chars.len() > 2 {
                let prefix: String = chars[..chars.len() - 2].iter().collect();
                let suffix: String = chars[chars.len() - 2..].iter().collect();
                if is_numeric(&prefix) && is_numeric(&suffix) {
                    self.tokens[index] = prefix;
                    insert_at(&mut self.tokens, index + 1, suffix);
                }
            }
            index += 1;
        }
    }

    /// Splitting-cost heuristic used to order candidate variants.
    ///
    /// The rank is the sum over tokens of the squared character count,
    /// squared again for every embedded sub-word that is itself a junk word.
    /// Tokens still containing junk fragments signal an under-split
    /// candidate and are penalized far more than long legitimate tokens, so
    /// the ascending sort puts well-split candidates first.
    pub fn rank(&self, junk: &JunkWords) -> f64 {
        let mut rank = 0.0;
        for token in &self.tokens {
            let length = token.chars().count();
            let mut part_rank = (length * length) as f64;
            for sub in probable_sub_tokens(token) {
                if junk.contains(sub) {
                    part_rank *= part_rank;
                }
            }
            rank += part_rank;
        }
        rank
    }
}

impl fmt::Display for SearchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for token in &self.tokens {
            write!(f, "{sep}[{token}]")?;
            sep = " ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junk() -> &'static JunkWords {
        JunkWords::default_set()
    }

    #[test]
    fn test_normalize_coarse_split_and_junk() {
        let variant = SearchVariant::normalize("Москва, ул.Ленина, д.12", junk());
        assert_eq!(variant.tokens(), ["Москва", "Ленина", "12"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(SearchVariant::normalize("", junk()).is_empty());
        assert!(SearchVariant::normalize(" ,,; .. ", junk()).is_empty());
    }

    #[test]
    fn test_hyphen_splitting_peels_numeric_suffixes() {
        let variant = SearchVariant::normalize("пос. Заречный-12-3", junk());
        assert_eq!(variant.tokens(), ["Заречный", "12", "3"]);
    }

    #[test]
    fn test_hyphen_splitting_keeps_name_hyphens() {
        let variant = SearchVariant::normalize("Петра-Павла", junk());
        assert_eq!(variant.tokens(), ["Петра-Павла"]);
    }

    #[test]
    fn test_hyphen_splitting_stops_at_non_numeric() {
        // "3" peels, then "б" blocks further peeling
        let variant = SearchVariant::normalize("Ленина-б-3", junk());
        assert_eq!(variant.tokens(), ["Ленина-б", "3"]);
    }

    #[test]
    fn test_junk_removal_whole_tokens_only_case_insensitive() {
        let variant = SearchVariant::normalize("Тверская ОБЛ, Кимры, УЛ, Мира", junk());
        assert_eq!(variant.tokens(), ["Тверская ОБЛ", "Кимры", "Мира"]);
    }

    #[test]
    fn test_junk_removal_idempotent() {
        let mut variant = SearchVariant::from_tokens(["обл", "Кимры", "ул", "кв", "Мира"]);
        variant.trim_junk_words(junk());
        let once = variant.clone();
        variant.trim_junk_words(junk());
        assert_eq!(variant, once);
        assert_eq!(variant.tokens(), ["Кимры", "Мира"]);
    }

    #[test]
    fn test_digit_letter_split_numeric_only() {
        let mut variant = SearchVariant::from_tokens(["1225"]);
        variant.split_digit_letter();
        assert_eq!(variant.tokens(), ["12", "25"]);

        // "кв25": prefix "к" is not numeric, no split
        let mut variant = SearchVariant::from_tokens(["кв25"]);
        variant.split_digit_letter();
        assert_eq!(variant.tokens(), ["кв25"]);
    }

    #[test]
    fn test_digit_letter_split_short_tokens_untouched() {
        let mut variant = SearchVariant::from_tokens(["12", "3"]);
        variant.split_digit_letter();
        assert_eq!(variant.tokens(), ["12", "3"]);
    }

    #[test]
    fn test_structural_equality() {
        let a = SearchVariant::from_tokens(["Москва", "Ленина"]);
        let b = SearchVariant::from_tokens(["Москва", "Ленина"]);
        let c = SearchVariant::from_tokens(["Ленина", "Москва"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, SearchVariant::from_tokens(["Москва"]));
    }

    #[test]
    fn test_clone_is_independent() {
        let a = SearchVariant::from_tokens(["Москва"]);
        let mut b = a.clone();
        b.tokens[0].push('!');
        assert_eq!(a.tokens(), ["Москва"]);
    }

    #[test]
    fn test_rank_penalizes_embedded_junk() {
        // "Ленина 12" (chars 9, rank 81) vs "ул Ленина" (junk sub-word,
        // rank 81^2); the junk-bearing token must rank far higher.
        let clean = SearchVariant::from_tokens(["Ленина 12"]);
        let dirty = SearchVariant::from_tokens(["ул Ленина"]);
        assert!(dirty.rank(junk()) > clean.rank(junk()));
        assert_eq!(clean.rank(junk()), 81.0);
        assert_eq!(dirty.rank(junk()), 81.0 * 81.0);
    }

    #[test]
    fn test_display() {
        let variant = SearchVariant::from_tokens(["Москва", "Ленина", "12"]);
        assert_eq!(variant.to_string(), "[Москва] [Ленина] [12]");
    }
}
