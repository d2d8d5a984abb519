use std::collections::BTreeMap;

/// Language selected before any catalog has been loaded.
pub const DEFAULT_LANGUAGE: &str = "en";

const FALLBACK_LANGUAGES: [(&str, &str); 6] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
];

/// Target-language codes mapped to display names, ordered by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: BTreeMap<String, String>,
}

impl LanguageCatalog {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Built-in catalog used until (or instead of) the remote one.
    pub fn fallback() -> Self {
        FALLBACK_LANGUAGES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Picks the selection to keep after the catalog changed.
    pub(crate) fn reconcile_selection(&self, current: &str) -> String {
        if self.contains(current) {
            current.to_string()
        } else if self.contains(DEFAULT_LANGUAGE) {
            DEFAULT_LANGUAGE.to_string()
        } else {
            self.entries
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
        }
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl FromIterator<(String, String)> for LanguageCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_six_languages() {
        let catalog = LanguageCatalog::fallback();
        let codes: Vec<_> = catalog.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["de", "en", "es", "fr", "ja", "zh"]);
        assert_eq!(catalog.display_name("zh"), Some("Chinese"));
    }

    #[test]
    fn selection_falls_back_to_default_then_first_code() {
        let catalog: LanguageCatalog = [("ko".to_string(), "Korean".to_string())]
            .into_iter()
            .collect();
        assert_eq!(catalog.reconcile_selection("en"), "ko");

        let fallback = LanguageCatalog::fallback();
        assert_eq!(fallback.reconcile_selection("xx"), "en");
        assert_eq!(fallback.reconcile_selection("ja"), "ja");
    }
}
