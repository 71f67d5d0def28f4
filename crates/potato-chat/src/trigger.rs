//! Decides whether a message should be augmented with web search results.

use potato_core::config::DEFAULT_SEARCH_KEYWORDS;

/// Strategy deciding whether a message needs search context.
pub trait SearchTrigger: Send + Sync {
    fn needs_search(&self, message: &str) -> bool;
}

/// Case-insensitive keyword substring match.
///
/// Cheap and predictable. A message that needs fresh data but uses none of
/// the keywords is not searched, and a keyword used in passing triggers a
/// search anyway.
#[derive(Debug, Clone)]
pub struct KeywordTrigger {
    keywords: Vec<String>,
}

impl KeywordTrigger {
    /// Build a trigger from `keywords`. Blank entries are dropped so they
    /// cannot match every message.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_KEYWORDS)
    }
}

impl SearchTrigger for KeywordTrigger {
    fn needs_search(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}
