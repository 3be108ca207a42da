//! Structure assembly and validation
//!
//! Folds per-token classifications into a [`CommandStructure`] and applies
//! the completeness rules. Extraction either yields a full structure or a
//! [`Rejection`] naming the rule that failed; there is no partial success.

use std::fmt;

use super::classify::{classify, Detected};
use super::keywords::{Category, KeywordRegistry};

/// Slot used when the utterance names none
pub const DEFAULT_SLOT: &str = "current";

/// A successfully extracted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStructure {
    /// Canonical action verb ("focus", "fill", ...)
    pub action: String,
    /// Canonical slot key, defaulted to [`DEFAULT_SLOT`] when unspoken
    pub slot: String,
    /// Canonical connective, present only when one was spoken
    pub connective: Option<String>,
    /// Trimmed free-text remainder, absent when empty
    pub payload: Option<String>,
}

impl fmt::Display for CommandStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.slot)?;
        if let Some(c) = &self.connective {
            write!(f, " {}", c)?;
        }
        if let Some(p) = &self.payload {
            write!(f, " \"{}\"", p)?;
        }
        Ok(())
    }
}

/// Why an utterance was not accepted as a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No action verb was recognized anywhere in the transcript
    NoAction,
    /// A connective was spoken but no payload followed it
    ConnectiveWithoutPayload,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoAction => write!(f, "no action verb recognized"),
            Rejection::ConnectiveWithoutPayload => {
                write!(f, "connective without a payload")
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// Command extractor - one immutable registry, one pure extraction call
pub struct CommandExtractor {
    registry: KeywordRegistry,
    verbose: bool,
}

impl CommandExtractor {
    pub fn new(registry: KeywordRegistry) -> Self {
        Self {
            registry,
            verbose: false,
        }
    }

    /// Log classification decisions to stderr
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    /// Extract a command from a transcript.
    ///
    /// Single pass over the whitespace-split tokens: each token classifies
    /// into the first still-open category in priority order, or falls through
    /// to the payload once an action and a slot or connective are known.
    /// Tokens before that point that classify into nothing are dropped.
    pub fn extract(&self, transcript: &str) -> Result<CommandStructure, Rejection> {
        let tokens: Vec<&str> = transcript.split_whitespace().collect();
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut detected = Detected::default();
        let mut action: Option<String> = None;
        let mut slot: Option<String> = None;
        let mut connective: Option<String> = None;
        let mut payload = String::new();

        for (i, token) in lowered.iter().enumerate() {
            let next = lowered.get(i + 1).map(String::as_str);
            match classify(&self.registry, token, next, &detected) {
                Some((category, key)) => {
                    if self.verbose {
                        eprintln!("[PARSE] \"{}\" -> {:?} ({})", tokens[i], category, key);
                    }
                    match category {
                        Category::Action => action = Some(key.to_string()),
                        Category::Slot => slot = Some(key.to_string()),
                        Category::Connective => connective = Some(key.to_string()),
                    }
                    detected.mark(category);
                }
                None => {
                    // payload starts only after the action plus a slot or
                    // connective are on the table; earlier strays are noise
                    if action.is_some() && (slot.is_some() || connective.is_some()) {
                        payload.push_str(tokens[i]);
                        payload.push(' ');
                    } else if self.verbose {
                        eprintln!("[PARSE] \"{}\" dropped", tokens[i]);
                    }
                }
            }
        }

        let slot = slot.unwrap_or_else(|| DEFAULT_SLOT.to_string());
        let payload = match payload.trim() {
            "" => None,
            p => Some(p.to_string()),
        };

        validate(action, slot, connective, payload)
    }
}

/// Completeness matrix, checked in this order: a payload only needs an
/// action; a connective with no payload is never valid; otherwise an action
/// alone suffices (slot has already been defaulted).
fn validate(
    action: Option<String>,
    slot: String,
    connective: Option<String>,
    payload: Option<String>,
) -> Result<CommandStructure, Rejection> {
    let action = action.ok_or(Rejection::NoAction)?;
    if payload.is_none() && connective.is_some() {
        return Err(Rejection::ConnectiveWithoutPayload);
    }
    Ok(CommandStructure {
        action,
        slot,
        connective,
        payload,
    })
}
