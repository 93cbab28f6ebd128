//! # postal-variants
//!
//! Search-variant generation and structured assembly for free-form postal
//! addresses.
//!
//! Address strings written by hand are inconsistent: abbreviations,
//! hyphenated house/building suffixes, mixed delimiters, administrative
//! filler words. No single fixed grammar parses them all, so this crate
//! takes the opposite route: it normalizes one raw string into **many**
//! candidate tokenizations ("search variants"), ranks them by a
//! splitting-cost heuristic, hands each candidate to an external gazetteer
//! ([`Matcher`]) in ascending-rank order, and assembles the best match into
//! a structured [`Address`], with leftover trailing tokens distributed
//! between the building and apartment fields.
//!
//! Recognition itself (which token is a city, which a street) is not part
//! of this crate; it is supplied through the [`Matcher`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use postal_variants::{
//!     AddressEngine, Level, Matcher, RecognizedPart, Result, TokenMatch,
//! };
//!
//! struct Gazetteer;
//!
//! impl Matcher for Gazetteer {
//!     fn match_tokens(&self, tokens: &[String]) -> Result<Vec<TokenMatch>> {
//!         Ok(tokens
//!             .iter()
//!             .enumerate()
//!             .map(|(i, token)| match token.as_str() {
//!                 "Москва" => {
//!                     TokenMatch::recognized(RecognizedPart::new("Москва", Level::Location), i)
//!                 }
//!                 "Ленина" => {
//!                     TokenMatch::recognized(RecognizedPart::new("Ленина", Level::Street), i)
//!                 }
//!                 _ => TokenMatch::Unrecognized,
//!             })
//!             .collect())
//!     }
//! }
//!
//! let engine = AddressEngine::new();
//! let resolution = engine.resolve("Москва, ул.Ленина, д.12, кв.5", &Gazetteer)?;
//!
//! assert_eq!(resolution.address.location, "Москва");
//! assert_eq!(resolution.address.street, "Ленина");
//! assert_eq!(resolution.address.building, "12");
//! assert_eq!(resolution.address.apartment, "5");
//! # Ok::<(), postal_variants::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod accumulator;
pub mod error;
pub mod generator;
pub mod junk;
pub mod matcher;
pub mod tokens;
pub mod types;
pub mod variant;

// Re-export main API
pub use accumulator::AddressAccumulator;
pub use error::{Error, Result};
pub use generator::{DEFAULT_MAX_VARIANTS, VariantGenerator};
pub use junk::JunkWords;
pub use matcher::{Matcher, TokenMatch};
pub use types::{Address, Level, RecognizedPart};
pub use variant::SearchVariant;

use log::trace;

/// Main entry point: owns the configuration and the junk-word set and
/// drives the normalize → expand → match → assemble pipeline.
///
/// The engine is synchronous and holds no mutable state, so one instance
/// can be shared freely across threads; independent addresses are
/// embarrassingly parallel.
#[derive(Debug)]
pub struct AddressEngine {
    config: EngineConfig,
    junk: JunkWords,
}

impl AddressEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use postal_variants::{AddressEngine, EngineConfig};
    ///
    /// let config = EngineConfig::builder()
    ///     .max_variants(256)
    ///     .min_match_quality(2)
    ///     .extra_junk_words(&["стр"])
    ///     .build();
    ///
    /// let engine = AddressEngine::with_config(config);
    /// ```
    pub fn with_config(config: EngineConfig) -> Self {
        let junk = if config.extra_junk_words.is_empty() {
            JunkWords::default()
        } else {
            JunkWords::with_extra(&config.extra_junk_words)
        };
        Self { config, junk }
    }

    /// Get the configuration used by this engine.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The junk-word set this engine filters with.
    pub fn junk_words(&self) -> &JunkWords {
        &self.junk
    }

    /// Normalize and expand a raw address into ranked search variants
    /// without running any matching.
    ///
    /// Useful for callers that drive their own gazetteer loop. The result
    /// contains at least the normalized seed and is sorted ascending by
    /// rank.
    pub fn variants(&self, address: &str) -> Vec<SearchVariant> {
        VariantGenerator::new(&self.junk)
            .with_max_variants(self.config.max_variants)
            .generate(address)
    }

    /// Resolve a raw address string into a structured [`Address`].
    ///
    /// Variants are tried in ascending-rank order; the first one whose
    /// accumulator reaches `min_match_quality` wins. If none does, the
    /// best-quality accumulator found is returned, even one with zero
    /// recognized parts, so a malformed input degrades to an (almost) empty
    /// address rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error only when the matcher itself fails.
    pub fn resolve<M: Matcher>(&self, address: &str, matcher: &M) -> Result<Resolution> {
        let mut best: Option<AddressAccumulator> = None;

        for variant in self.variants(address) {
            let matches = matcher.match_tokens(variant.tokens())?;

            let mut accumulator = AddressAccumulator::new(variant);
            for token_match in matches {
                match token_match {
                    TokenMatch::Recognized { part, token_index } => {
                        accumulator.add_part(part, Some(token_index));
                    }
                    TokenMatch::Unrecognized => accumulator.note_unrecognized(),
                }
            }

            trace!(
                "variant {} scored quality {}",
                accumulator.variant(),
                accumulator.match_quality()
            );

            if accumulator.match_quality() >= self.config.min_match_quality {
                return Ok(Resolution::from_accumulator(accumulator));
            }
            let better = best
                .as_ref()
                .is_none_or(|b| accumulator.match_quality() > b.match_quality());
            if better {
                best = Some(accumulator);
            }
        }

        // the variant set always holds at least the seed, so `best` is set
        let best =
            best.unwrap_or_else(|| AddressAccumulator::new(SearchVariant::from_tokens(Vec::<String>::new())));
        Ok(Resolution::from_accumulator(best))
    }

    /// Resolve multiple addresses sequentially.
    pub fn resolve_batch<M: Matcher>(
        &self,
        addresses: &[&str],
        matcher: &M,
    ) -> Result<Vec<Resolution>> {
        addresses
            .iter()
            .map(|address| self.resolve(address, matcher))
            .collect()
    }

    /// Resolve multiple addresses in parallel using multiple threads.
    ///
    /// Independent addresses share no mutable state, so the batch is
    /// embarrassingly parallel; the junk-word set is shared read-only.
    /// Results come back in input order; a per-address matcher failure is
    /// returned in place rather than aborting the batch.
    #[cfg(feature = "parallel")]
    pub fn resolve_batch_parallel<M: Matcher + Sync>(
        &self,
        addresses: &[&str],
        matcher: &M,
    ) -> Vec<Result<Resolution>> {
        use rayon::prelude::*;

        addresses
            .par_iter()
            .map(|address| self.resolve(address, matcher))
            .collect()
    }

    /// Resolve multiple addresses in parallel, keeping only successes.
    #[cfg(feature = "parallel")]
    pub fn resolve_batch_parallel_ok<M: Matcher + Sync>(
        &self,
        addresses: &[&str],
        matcher: &M,
    ) -> Vec<Resolution> {
        self.resolve_batch_parallel(addresses, matcher)
            .into_iter()
            .filter_map(|result| result.ok())
            .collect()
    }
}

impl Default for AddressEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of resolving one address: the assembled [`Address`] plus
/// diagnostics about how it was reached.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// The assembled structured address
    pub address: Address,
    /// Recognized-part count minus unrecognized count for the winning
    /// variant; higher is better
    pub match_quality: i64,
    /// The winning tokenization
    pub variant: SearchVariant,
}

impl Resolution {
    fn from_accumulator(accumulator: AddressAccumulator) -> Self {
        Self {
            address: accumulator.assemble(),
            match_quality: accumulator.match_quality(),
            variant: accumulator.variant().clone(),
        }
    }
}

/// Configuration for [`AddressEngine`] behavior.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cap on the number of variants generated per address (defensive bound
    /// on the combinatorial expansion; truncates, never errors)
    pub max_variants: usize,

    /// Match quality at which a variant is accepted without trying the rest
    pub min_match_quality: i64,

    /// Junk words added on top of the built-in administrative set
    pub extra_junk_words: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_variants: DEFAULT_MAX_VARIANTS,
            min_match_quality: 1,
            extra_junk_words: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Create a builder with default values.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Set the cap on generated variants per address.
    pub fn max_variants(mut self, max_variants: usize) -> Self {
        self.config.max_variants = max_variants;
        self
    }

    /// Set the early-accept match quality threshold.
    pub fn min_match_quality(mut self, min_match_quality: i64) -> Self {
        self.config.min_match_quality = min_match_quality;
        self
    }

    /// Add junk words on top of the built-in set.
    pub fn extra_junk_words<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.config
            .extra_junk_words
            .extend(words.iter().map(|w| w.as_ref().to_string()));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
