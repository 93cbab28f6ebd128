//! The external gazetteer contract.
//!
//! Recognition of hierarchical entities (region, district, locality, street,
//! house) lives outside this crate. The engine hands a matcher one candidate
//! token sequence at a time, in ascending rank order, and folds the returned
//! matches into an accumulator.

use crate::error::Result;
use crate::types::RecognizedPart;

/// Outcome of matching one or more tokens of a candidate variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMatch {
    /// A hierarchical entity was recognized at `token_index`.
    Recognized {
        /// The matched entity
        part: RecognizedPart,
        /// Index of the originating token within the variant
        token_index: usize,
    },
    /// A token failed to resolve to any entity. Not an error, only a
    /// match-quality-reducing event.
    Unrecognized,
}

impl TokenMatch {
    /// Convenience constructor for a recognized entity.
    pub fn recognized(part: RecognizedPart, token_index: usize) -> Self {
        Self::Recognized { part, token_index }
    }
}

/// External classifier resolving tokens to hierarchical address entities.
///
/// Implementations are expected to be deterministic over a given token
/// sequence. Returning an empty vector means nothing in the variant was
/// recognized; a `Err` aborts resolution of the whole address.
pub trait Matcher {
    /// Match an ordered token sequence against the gazetteer.
    fn match_tokens(&self, tokens: &[String]) -> Result<Vec<TokenMatch>>;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn match_tokens(&self, tokens: &[String]) -> Result<Vec<TokenMatch>> {
        (**self).match_tokens(tokens)
    }
}
