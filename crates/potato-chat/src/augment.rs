//! Fusing search results into the outgoing user turn.

use potato_search::SearchResult;

/// Header line opening the search context block.
pub const SEARCH_CONTEXT_HEADER: &str = "[RESULTADOS DA PESQUISA NA WEB]:";

/// Sentence appended after the search block telling the model to use it.
pub const SEARCH_CONTEXT_INSTRUCTION: &str =
    "Use essas informações para responder de forma precisa e útil.";

/// The message as received and the text actually sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub raw: String,
    pub augmented: String,
}

impl Turn {
    /// A turn sent as-is.
    pub fn plain(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            augmented: raw.to_string(),
        }
    }

    /// A turn carrying `results` as numbered context. An empty slice yields
    /// a plain turn.
    pub fn with_results(raw: &str, results: &[SearchResult]) -> Self {
        if results.is_empty() {
            return Self::plain(raw);
        }
        let context = format_search_context(results);
        Self {
            raw: raw.to_string(),
            augmented: format!("{}\n{}\n{}", raw, context, SEARCH_CONTEXT_INSTRUCTION),
        }
    }

    pub fn is_augmented(&self) -> bool {
        self.raw != self.augmented
    }
}

/// Render results as a numbered block of titles and snippets.
///
/// URLs are left out; the model gets only the text it should draw on.
pub fn format_search_context(results: &[SearchResult]) -> String {
    let mut context = format!("\n\n{}\n", SEARCH_CONTEXT_HEADER);
    for (i, result) in results.iter().enumerate() {
        context.push_str(&format!(
            "\n{}. {}\n{}\n",
            i + 1,
            result.title,
            result.snippet
        ));
    }
    context
}
