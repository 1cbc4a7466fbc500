//! Per-language translation storage and key resolution.

use std::collections::HashMap;

use crate::input::translation::{
    Payload,
    TranslationValue,
    flatten_payload,
};
use crate::translation::interpolate::{
    Args,
    interpolate,
};
use crate::types::LanguageTag;

/// Key resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvePolicy {
    /// Separator splitting composed keys. `None` disables composed keys.
    pub composed_key_separator: Option<String>,
    /// Key resolved instead of a missing one.
    pub missing_key: Option<String>,
    /// Literal returned for a missing key when no `missing_key` is set.
    pub missing_value: Option<String>,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            composed_key_separator: Some(".".to_string()),
            missing_key: None,
            missing_value: None,
        }
    }
}

/// Translation data for every loaded language.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    data: HashMap<LanguageTag, Payload>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    /// Merges `payload` into the entry for `language`.
    ///
    /// Top-level keys already present are replaced, nested nodes are not
    /// merged recursively.
    pub fn add_data(&mut self, language: &LanguageTag, payload: Payload) {
        let entry = self.data.entry(language.clone()).or_default();
        tracing::debug!(language = %language, keys = payload.len(), "Merging translation data");
        entry.extend(payload);
    }

    /// Drops all data for `language`. Returns whether anything was removed.
    pub fn clear_language(&mut self, language: &LanguageTag) -> bool {
        self.data.remove(language).is_some()
    }

    #[must_use]
    pub fn has_language(&self, language: &LanguageTag) -> bool {
        self.data.contains_key(language)
    }

    /// Loaded languages, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageTag> {
        let mut languages: Vec<_> = self.data.keys().collect();
        languages.sort();
        languages
    }

    /// All keys of `language` joined with `separator`, sorted.
    #[must_use]
    pub fn keys(&self, language: &LanguageTag, separator: &str) -> Vec<String> {
        let Some(payload) = self.data.get(language) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = flatten_payload(payload, separator).into_keys().collect();
        keys.sort();
        keys
    }

    /// Looks up `key` without applying the missing-key policy.
    ///
    /// With a separator the key is split into segments. Every segment but the
    /// last descends into a nested node when the current map holds one under
    /// that name; otherwise the current map is kept. The last segment is the
    /// final lookup key. `null`, empty strings and nodes are misses.
    #[must_use]
    pub fn lookup(
        &self,
        key: &str,
        language: &LanguageTag,
        separator: Option<&str>,
    ) -> Option<&str> {
        let mut current = self.data.get(language)?;

        let last = match separator.filter(|sep| !sep.is_empty()) {
            Some(sep) => {
                let mut segments = key.split(sep).peekable();
                let mut last = key;
                while let Some(segment) = segments.next() {
                    if segments.peek().is_none() {
                        last = segment;
                        break;
                    }
                    if let Some(node) = current.get(segment).and_then(TranslationValue::as_node) {
                        current = node;
                    }
                }
                last
            }
            None => key,
        };

        current.get(last).and_then(TranslationValue::as_text)
    }

    /// Resolves `key` for `language`, applying the missing-key policy.
    ///
    /// On a miss the `missing_key` is resolved instead (once, never chained),
    /// then `missing_value` is returned, and finally the key itself.
    /// Placeholders are only substituted in found values.
    #[must_use]
    pub fn resolve(
        &self,
        key: &str,
        language: &LanguageTag,
        policy: &ResolvePolicy,
        args: Option<&Args>,
    ) -> String {
        let separator = policy.composed_key_separator.as_deref();

        let found = self.lookup(key, language, separator).or_else(|| {
            policy
                .missing_key
                .as_deref()
                .filter(|fallback| *fallback != key)
                .and_then(|fallback| self.lookup(fallback, language, separator))
        });

        match found {
            Some(value) => match args {
                Some(args) => interpolate(value, args).into_owned(),
                None => value.to_string(),
            },
            None => {
                tracing::trace!(key, language = %language, "Missing translation");
                policy.missing_value.clone().unwrap_or_else(|| key.to_string())
            }
        }
    }
}
