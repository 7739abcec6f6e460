//! Target language allow-list
//!
//! Maps the language code used in field names (`definition_zh_HK`) to the code
//! the provider accepts. A requested language with no entry is skipped.

use serde::Deserialize;

/// One supported target language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    /// Code as written in field names, with `-` for `_` (e.g. "zh-HK")
    pub code: String,
    /// Code sent to the provider (e.g. "zh-TW")
    pub provider_code: String,
    /// `(from, to)` replacements applied to every translation into this language
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<(String, String)>,
}

impl Language {
    pub fn new(code: &str, provider_code: &str) -> Self {
        Language {
            code: code.to_string(),
            provider_code: provider_code.to_string(),
            substitutions: Vec::new(),
        }
    }

    pub fn with_substitution(mut self, from: &str, to: &str) -> Self {
        self.substitutions.push((from.to_string(), to.to_string()));
        self
    }

    /// Apply this language's fixed substitutions to translated text
    pub fn post_process(&self, text: &str) -> String {
        self.substitutions
            .iter()
            .fold(text.to_string(), |text, (from, to)| text.replace(from, to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap {
    languages: Vec<Language>,
}

impl LanguageMap {
    pub fn new(languages: Vec<Language>) -> Self {
        LanguageMap { languages }
    }

    /// Look up a language as written in a field name (`zh_HK` or `zh-HK`)
    pub fn resolve(&self, requested: &str) -> Option<&Language> {
        let code = requested.replace('_', "-");
        self.languages.iter().find(|language| language.code == code)
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}

impl Default for LanguageMap {
    fn default() -> Self {
        // Google Translate has no zh-HK; Taiwan Chinese stands in, with the
        // dictionary's spelling of "Klingon" forced afterwards.
        LanguageMap::new(vec![
            Language::new("de", "de"),
            Language::new("fa", "fa"),
            Language::new("sv", "sv"),
            Language::new("ru", "ru"),
            Language::new("zh-HK", "zh-TW").with_substitution("克林貢", "克林崗"),
            Language::new("pt", "pt"),
            Language::new("fi", "fi"),
            Language::new("fr", "fr"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_code() {
        let map = LanguageMap::default();
        assert_eq!(map.resolve("de").map(|l| l.provider_code.as_str()), Some("de"));
    }

    #[test]
    fn test_resolve_alias_with_underscore() {
        let map = LanguageMap::default();
        let language = map.resolve("zh_HK").unwrap();
        assert_eq!(language.code, "zh-HK");
        assert_eq!(language.provider_code, "zh-TW");
    }

    #[test]
    fn test_unsupported_language() {
        let map = LanguageMap::default();
        assert!(map.resolve("ja").is_none());
        assert!(map.resolve("zh-TW").is_none());
    }

    #[test]
    fn test_hong_kong_substitution() {
        let map = LanguageMap::default();
        let language = map.resolve("zh-HK").unwrap();
        assert_eq!(language.post_process("克林貢語"), "克林崗語");
    }

    #[test]
    fn test_no_substitution_for_other_languages() {
        let map = LanguageMap::default();
        let language = map.resolve("de").unwrap();
        assert_eq!(language.post_process("克林貢"), "克林貢");
    }
}
