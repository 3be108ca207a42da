//! Keyword registry - canonical keys and their spoken surface forms
//!
//! Each category (action, slot, connective) maps canonical keys to ordered
//! synonym lists. The lists deliberately include common transcription
//! mishearings ("villain" for "fill in", "farts" for "fourth") so that the
//! extractor tolerates a sloppy speech-to-text pass.

/// Keyword categories, in the order the classifier tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Action,
    Slot,
    Connective,
}

/// Classification priority. Correctness depends on this order: when a token
/// matches synonyms in more than one undetected category, the earliest
/// category here wins.
pub const CATEGORY_PRIORITY: [Category; 3] =
    [Category::Action, Category::Slot, Category::Connective];

/// One canonical key with its surface forms, in registration order
struct Entry {
    key: String,
    synonyms: Vec<String>,
}

/// Immutable keyword tables, built once via [`RegistryBuilder`]
pub struct KeywordRegistry {
    actions: Vec<Entry>,
    slots: Vec<Entry>,
    connectives: Vec<Entry>,
}

/// Builder for [`KeywordRegistry`] - collects caller slot names, then
/// freezes the tables
#[derive(Default)]
pub struct RegistryBuilder {
    slot_names: Vec<String>,
}

fn entry(key: &str, synonyms: &[&str]) -> Entry {
    Entry {
        key: key.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
    }
}

impl RegistryBuilder {
    /// Register caller-defined slot names. Each becomes a canonical slot key
    /// matched by its own literal text, so a slot named "surname" is
    /// addressed by saying "surname". Names are not checked against the
    /// built-in keys; avoiding collisions is the caller's job.
    pub fn slot_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slot_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> KeywordRegistry {
        let actions = vec![
            entry("focus", &["focus", "cuckoo's", "koko's"]),
            entry(
                "fill",
                &[
                    "fill", "fill in", "fell in", "filling", "fillings", "fill-in",
                    "villain", "phil", "phil in", "phil's", "phil's in", "chilling",
                ],
            ),
            entry("clear", &["clear"]),
        ];

        let mut slots = vec![
            entry("current", &["current"]),
            entry("first", &["first", "1", "i", "1st"]),
            entry("second", &["second", "2", "ii", "2nd", "seconds"]),
            entry("third", &["third", "3", "iii", "3rd"]),
            entry("fourth", &["fourth", "4", "iv", "4th", "farts"]),
            entry("fifth", &["fifth", "5", "v", "5th", "fit"]),
            entry("next", &["next"]),
            entry(
                "previous",
                &["previous", "prev", "travis", "reviews", "previews", "preview"],
            ),
        ];
        for name in self.slot_names {
            slots.push(Entry {
                key: name.clone(),
                synonyms: vec![name],
            });
        }

        let connectives = vec![entry("with", &["with", "which"])];

        KeywordRegistry {
            actions,
            slots,
            connectives,
        }
    }
}

impl KeywordRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    fn table(&self, category: Category) -> &[Entry] {
        match category {
            Category::Action => &self.actions,
            Category::Slot => &self.slots,
            Category::Connective => &self.connectives,
        }
    }

    /// Find the canonical key whose synonym list contains `token`.
    /// Exact match only; callers lowercase beforehand. The first key in
    /// registration order wins.
    pub fn lookup(&self, category: Category, token: &str) -> Option<&str> {
        self.table(category)
            .iter()
            .find(|e| e.synonyms.iter().any(|s| s == token))
            .map(|e| e.key.as_str())
    }

    /// Two-word lookup: match "`token` `next_token`" against the synonym
    /// lists. Only action phrases span two words ("fill in", "phil's in").
    pub fn lookup_phrase(
        &self,
        category: Category,
        token: &str,
        next_token: &str,
    ) -> Option<&str> {
        let joined = format!("{} {}", token, next_token);
        self.lookup(category, &joined)
    }

    /// Canonical keys of a category, in registration order
    pub fn keys(&self, category: Category) -> impl Iterator<Item = &str> {
        self.table(category).iter().map(|e| e.key.as_str())
    }

    /// All (canonical key, synonym) pairs of a category
    pub fn synonym_pairs(&self, category: Category) -> Vec<(&str, &str)> {
        self.table(category)
            .iter()
            .flat_map(|e| e.synonyms.iter().map(move |s| (e.key.as_str(), s.as_str())))
            .collect()
    }
}
