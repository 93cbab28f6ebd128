//! Combinatorial expansion of tokenization candidates.
//!
//! From a normalized seed variant the generator repeatedly tries splitting
//! each token on embedded probable delimiters, deduplicates structurally
//! equal candidates, and converges to a finite closed set, sorted ascending
//! by rank. Callers are expected to try variants in that order and accept
//! the first satisfactory match.

use log::debug;

use crate::junk::JunkWords;
use crate::tokens::{insert_at, join_range};
use crate::variant::{PROBABLE_DELIMITER, SearchVariant, probable_sub_tokens};

/// Default cap on the number of variants produced for one address.
///
/// Inputs with many space-separated sub-tokens expand combinatorially; the
/// cap bounds the fixed-point loop. Reaching it truncates the set, it never
/// errors.
pub const DEFAULT_MAX_VARIANTS: usize = 1024;

/// Drives the breadth-first fixed-point expansion of one seed variant.
#[derive(Debug, Clone)]
pub struct VariantGenerator<'a> {
    junk: &'a JunkWords,
    max_variants: usize,
}

impl<'a> VariantGenerator<'a> {
    /// Create a generator over the given junk-word set.
    pub fn new(junk: &'a JunkWords) -> Self {
        Self {
            junk,
            max_variants: DEFAULT_MAX_VARIANTS,
        }
    }

    /// Set the cap on the number of variants produced.
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants.max(1);
        self
    }

    /// Normalize a raw address string and expand it into ranked variants.
    ///
    /// The result always contains at least the normalized seed and never
    /// contains two structurally equal variants.
    pub fn generate(&self, raw: &str) -> Vec<SearchVariant> {
        self.expand(SearchVariant::normalize(raw, self.junk))
    }

    /// Expand an already-normalized seed into ranked variants.
    ///
    /// The worklist doubles as the result set: every variant in it is
    /// processed exactly once, including ones appended mid-loop, so the loop
    /// runs to a fixed point. Each derived variant re-runs junk-word removal
    /// and digit/letter splitting before the dedup check.
    pub fn expand(&self, seed: SearchVariant) -> Vec<SearchVariant> {
        let mut result = vec![seed];
        let mut index = 0;

        'expansion: while index < result.len() {
            let current = result[index].clone();
            for part_index in 0..current.len() {
                let subs: Vec<String> = probable_sub_tokens(&current.tokens()[part_index])
                    .into_iter()
                    .map(str::to_string)
                    .collect();

                for split_point in 1..subs.len() {
                    let mut derived = current.clone();
                    derived.tokens[part_index] =
                        join_range(&subs, PROBABLE_DELIMITER, 0, split_point);
                    insert_at(
                        &mut derived.tokens,
                        part_index + 1,
                        join_range(&subs, PROBABLE_DELIMITER, split_point, subs.len()),
                    );
                    derived.trim_junk_words(self.junk);
                    derived.split_digit_letter();

                    if result.contains(&derived) {
                        continue;
                    }
                    if result.len() >= self.max_variants {
                        debug!(
                            "variant cap {} reached, truncating expansion",
                            self.max_variants
                        );
                        break 'expansion;
                    }
                    result.push(derived);
                }
            }
            index += 1;
        }

        debug!("expanded into {} variants", result.len());

        let mut ranked: Vec<(f64, SearchVariant)> = result
            .into_iter()
            .map(|variant| (variant.rank(self.junk), variant))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.into_iter().map(|(_, variant)| variant).collect()
    }
}
