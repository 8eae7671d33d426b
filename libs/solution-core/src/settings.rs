//! Matcher and listing settings.

use serde::{Deserialize, Serialize};

use crate::locale::same_language;

/// Settings for building, matching and listing solutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Keep automatically derived graph vertices.
    pub include_automatic: bool,
    /// Locales for which no correction diff is computed.
    pub correction_excluded_locales: Vec<String>,
    /// Upper bound of variations diffed per best solution.
    pub max_variations_per_solution: usize,
    /// Entries kept in the per-string matching cache before it is cleared.
    pub string_cache_capacity: usize,
    pub page_size: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            include_automatic: false,
            correction_excluded_locales: vec!["ja".to_string()],
            max_variations_per_solution: 64,
            string_cache_capacity: 2048,
            page_size: 20,
        }
    }
}

impl MatcherSettings {
    /// Whether correction diffs are disabled for `locale`.
    pub fn is_correction_excluded(&self, locale: &str) -> bool {
        self.correction_excluded_locales
            .iter()
            .any(|excluded| same_language(excluded, locale))
    }
}
