//! Command-structure extraction from voice transcripts
//!
//! Turns a short natural-language utterance into a typed command for a
//! form-driven interface, or a definitive rejection.
//!
//! # Pipeline
//!
//! - **Keyword registry**: canonical keys and their spoken synonyms for
//!   three categories (action, slot, connective), extensible with
//!   caller-defined slot names, immutable once built
//! - **Token classifier**: one pass over the tokens, each assigned to at
//!   most one still-open category, with a one-token lookahead for two-word
//!   action phrases
//! - **Assembler + validator**: accumulates fields and the free-text
//!   payload, defaults the slot, then applies the completeness rules
//!
//! There is no state between calls; a registry can be shared freely.

mod classify;
mod extract;
mod keywords;

pub use extract::{CommandExtractor, CommandStructure, Rejection, DEFAULT_SLOT};
pub use keywords::{Category, KeywordRegistry, RegistryBuilder, CATEGORY_PRIORITY};
