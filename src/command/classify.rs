//! Token classifier - assigns each transcript token to at most one category
//!
//! Categories are tried in [`CATEGORY_PRIORITY`] order, skipping any that a
//! previous token already filled. Action lookup gets a one-token lookahead so
//! two-word verb phrases ("fill in") match as a unit.

use super::keywords::{Category, KeywordRegistry, CATEGORY_PRIORITY};

/// Per-call record of which categories have already been assigned.
/// Once a category is taken, later tokens matching its synonyms fall through
/// to the payload instead of re-classifying.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detected {
    action: bool,
    slot: bool,
    connective: bool,
}

impl Detected {
    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Action => self.action,
            Category::Slot => self.slot,
            Category::Connective => self.connective,
        }
    }

    pub fn mark(&mut self, category: Category) {
        match category {
            Category::Action => self.action = true,
            Category::Slot => self.slot = true,
            Category::Connective => self.connective = true,
        }
    }
}

/// Classify the token at one position of the (lowercased) token sequence.
///
/// `next_token` is the following token, if any; it is only consulted for the
/// two-word action phrase fallback. Returns the winning category and its
/// canonical key, or `None` when the token is filler or payload text.
pub fn classify<'r>(
    registry: &'r KeywordRegistry,
    token: &str,
    next_token: Option<&str>,
    detected: &Detected,
) -> Option<(Category, &'r str)> {
    for category in CATEGORY_PRIORITY {
        if detected.contains(category) {
            continue;
        }
        if let Some(key) = registry.lookup(category, token) {
            return Some((category, key));
        }
        if category == Category::Action {
            if let Some(next) = next_token {
                if let Some(key) = registry.lookup_phrase(category, token, next) {
                    return Some((category, key));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> KeywordRegistry {
        KeywordRegistry::builder().build()
    }

    #[test]
    fn test_classifies_by_priority() {
        let registry = registry();
        let detected = Detected::default();
        assert_eq!(
            classify(&registry, "fill", None, &detected),
            Some((Category::Action, "fill"))
        );
        assert_eq!(
            classify(&registry, "first", None, &detected),
            Some((Category::Slot, "first"))
        );
        assert_eq!(
            classify(&registry, "with", None, &detected),
            Some((Category::Connective, "with"))
        );
        assert_eq!(classify(&registry, "hello", None, &detected), None);
    }

    #[test]
    fn test_detected_category_is_skipped() {
        let registry = registry();
        let mut detected = Detected::default();
        detected.mark(Category::Action);
        // "fill" no longer classifies once an action is known
        assert_eq!(classify(&registry, "fill", None, &detected), None);
    }

    #[test]
    fn test_two_word_action_phrase() {
        let registry = registry();
        let detected = Detected::default();
        assert_eq!(
            classify(&registry, "fell", Some("in"), &detected),
            Some((Category::Action, "fill"))
        );
        // no lookahead available at the last token
        assert_eq!(classify(&registry, "fell", None, &detected), None);
    }

    #[test]
    fn test_phrase_fallback_only_for_actions() {
        let registry = registry();
        let mut detected = Detected::default();
        detected.mark(Category::Action);
        // with action taken, "fell in" must not match anything
        assert_eq!(classify(&registry, "fell", Some("in"), &detected), None);
    }

    #[test]
    fn test_priority_resolves_cross_category_collision() {
        // a caller slot name that collides with a connective synonym: slot
        // sits ahead of connective in the priority order, so slot wins while
        // both are undetected
        let registry = KeywordRegistry::builder().slot_names(["with"]).build();
        let detected = Detected::default();
        assert_eq!(
            classify(&registry, "with", None, &detected),
            Some((Category::Slot, "with"))
        );
        // once slot is taken the same token classifies as connective
        let mut detected = Detected::default();
        detected.mark(Category::Slot);
        assert_eq!(
            classify(&registry, "with", None, &detected),
            Some((Category::Connective, "with"))
        );
    }
}
