//! Translation provider records.

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::LanguageTag;

/// How a provider's payload location is derived from the language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderKind {
    /// `<prefix><lang>.<format>`
    #[default]
    File,
    /// `<prefix><lang>`
    Api,
}

/// One configured source of translation payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Provider {
    pub prefix: String,
    pub format: String,
    pub kind: ProviderKind,
}

impl Default for Provider {
    fn default() -> Self {
        Self { prefix: String::new(), format: "json".to_string(), kind: ProviderKind::File }
    }
}

impl Provider {
    #[must_use]
    pub fn file(prefix: impl Into<String>, format: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), format: format.into(), kind: ProviderKind::File }
    }

    #[must_use]
    pub fn api(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), format: String::new(), kind: ProviderKind::Api }
    }

    /// Builds the payload location for a language.
    ///
    /// # Examples
    /// ```
    /// use l10n_service::input::provider::Provider;
    /// use l10n_service::types::LanguageTag;
    ///
    /// let lang = LanguageTag::from("en");
    /// assert_eq!(Provider::file("./assets/locale-", "json").url(&lang), "./assets/locale-en.json");
    /// assert_eq!(Provider::api("http://localhost:54703/api/values/").url(&lang), "http://localhost:54703/api/values/en");
    /// ```
    #[must_use]
    pub fn url(&self, language: &LanguageTag) -> String {
        match self.kind {
            ProviderKind::File => format!("{}{}.{}", self.prefix, language, self.format),
            ProviderKind::Api => format!("{}{}", self.prefix, language),
        }
    }
}
