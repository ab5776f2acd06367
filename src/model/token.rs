//! Sentence token with its normalized tag annotations.

use serde::{Deserialize, Serialize};

/// Normalized tag annotations attached to a token (opaque to the core).
pub type TagMap = hashbrown::HashMap<String, String>;

/// Tag key carrying the normalized value of a numeric entity,
/// e.g. `"$1900000.0"` on the head of `$ 1.9 million`.
pub const NORMALIZED_NE_TAG: &str = "NormalizedNamedEntityTag";

/// One sentence token. Immutable for the sentence's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    pub form: String,
    pub tags: TagMap,
}

impl Token {
    pub fn new(form: impl Into<String>) -> Self {
        Self { form: form.into(), tags: TagMap::new() }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
