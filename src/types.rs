//! Core types used throughout the project.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use unic_langid::LanguageIdentifier;

/// Language identifier keying translation data (`en`, `en-US`, ...).
///
/// Compared by exact string equality; no case folding or canonicalization
/// is applied, so `en-US` and `en-us` are different tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Part of a locale used to build the language tag for translation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageCodePart {
    Language,
    Script,
    Country,
}

/// A locale made of a language and optional script and country.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Locale {
    pub language: String,
    pub script: Option<String>,
    pub country: Option<String>,
}

impl Locale {
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self { language: language.into(), script: None, country: None }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// BCP 47 tag: `language[-Script][-COUNTRY]`.
    #[must_use]
    pub fn tag(&self) -> String {
        self.compose(&[
            LanguageCodePart::Language,
            LanguageCodePart::Script,
            LanguageCodePart::Country,
        ])
    }

    /// Joins the requested parts with `-`, skipping parts that are not set.
    ///
    /// # Examples
    /// ```
    /// use l10n_service::types::{LanguageCodePart, Locale};
    ///
    /// let locale = Locale::new("en").with_country("US");
    /// assert_eq!(locale.compose(&[LanguageCodePart::Language]), "en");
    /// assert_eq!(
    ///     locale.compose(&[LanguageCodePart::Language, LanguageCodePart::Country]),
    ///     "en-US"
    /// );
    /// ```
    #[must_use]
    pub fn compose(&self, parts: &[LanguageCodePart]) -> String {
        parts
            .iter()
            .filter_map(|part| match part {
                LanguageCodePart::Language => Some(self.language.as_str()),
                LanguageCodePart::Script => self.script.as_deref(),
                LanguageCodePart::Country => self.country.as_deref(),
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Locale tag with a Unicode extension appended (`de-DE-u-co-phonebk`).
    #[must_use]
    pub fn tag_with_extension(&self, extension: Option<&str>) -> String {
        with_extension(&self.tag(), extension)
    }

    /// Parses the locale as a BCP 47 identifier.
    #[must_use]
    pub fn identifier(&self) -> Option<LanguageIdentifier> {
        self.tag().parse().ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

/// Appends `-u-<extension>` to a locale tag unless the extension is empty.
#[must_use]
pub fn with_extension(tag: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) if !ext.is_empty() => format!("{tag}-u-{ext}"),
        _ => tag.to_string(),
    }
}

/// Sort direction for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::language_only(Locale::new("en"), "en")]
    #[case::with_country(Locale::new("en").with_country("US"), "en-US")]
    #[case::with_script(Locale::new("sr").with_script("Cyrl").with_country("RS"), "sr-Cyrl-RS")]
    fn locale_tag(#[case] locale: Locale, #[case] expected: &str) {
        assert_that!(locale.tag(), eq(expected));
    }

    #[rstest]
    #[case(&[LanguageCodePart::Language], "it")]
    #[case(&[LanguageCodePart::Language, LanguageCodePart::Country], "it-IT")]
    #[case(&[LanguageCodePart::Country, LanguageCodePart::Language], "IT-it")]
    #[case(&[LanguageCodePart::Language, LanguageCodePart::Script], "it")]
    fn locale_compose(#[case] parts: &[LanguageCodePart], #[case] expected: &str) {
        let locale = Locale::new("it").with_country("IT");

        assert_that!(locale.compose(parts), eq(expected));
    }

    #[rstest]
    #[case(None, "de-DE")]
    #[case(Some(""), "de-DE")]
    #[case(Some("co-phonebk"), "de-DE-u-co-phonebk")]
    fn locale_tag_with_extension(#[case] extension: Option<&str>, #[case] expected: &str) {
        let locale = Locale::new("de").with_country("DE");

        assert_that!(locale.tag_with_extension(extension), eq(expected));
    }

    #[googletest::test]
    fn locale_identifier_rejects_malformed_tags() {
        expect_that!(Locale::new("en").with_country("GB").identifier(), some(anything()));
        expect_that!(Locale::new("not a language").identifier(), none());
    }

    #[googletest::test]
    fn language_tag_exact_equality() {
        expect_that!(LanguageTag::from("en-US"), eq(&LanguageTag::from("en-US")));
        expect_that!(LanguageTag::from("en-US"), not(eq(&LanguageTag::from("en-us"))));
        expect_that!(LanguageTag::new("").is_empty(), eq(true));
    }
}
