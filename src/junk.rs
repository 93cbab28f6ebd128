//! Junk-word filtering.
//!
//! Administrative abbreviations ("обл", "ул", "кв", ...) carry no
//! address-distinguishing value and are dropped before scoring and matching.
//! The default set is built once per process and shared read-only; an engine
//! may carry an extended copy.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Administrative keyword abbreviations with no distinguishing value.
const DEFAULT_JUNK_WORDS: &[&str] = &[
    "область",
    "обл",
    "город",
    "гор",
    "район",
    "р-н",
    "р-он",
    "улица",
    "ул",
    "дом",
    "д",
    "квартира",
    "кв",
    "проспект",
    "пр-кт",
    "пр",
    "микрорайон",
    "м-р-н",
    "мкр",
    "мкрн",
    "корпус",
    "корп",
    "литера",
    "лит",
    "бульвар",
    "б-р",
    "поселок",
    "посёлок",
    "пос",
    "квартал",
    "кв-л",
    "квл",
    "кварт",
];

static DEFAULT_SET: Lazy<JunkWords> = Lazy::new(|| JunkWords::from_list(DEFAULT_JUNK_WORDS));

/// A case-insensitive membership test over administrative abbreviations.
#[derive(Debug, Clone)]
pub struct JunkWords {
    words: HashSet<String>,
}

impl JunkWords {
    /// The process-wide default set, built once and never mutated.
    pub fn default_set() -> &'static JunkWords {
        &DEFAULT_SET
    }

    /// Build a set from a custom word list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// The default set extended with additional words.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut set = Self::default_set().clone();
        for word in extra {
            set.words.insert(word.as_ref().to_lowercase());
        }
        set
    }

    /// Check whether `word` is a junk word (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for JunkWords {
    fn default() -> Self {
        Self::default_set().clone()
    }
}
