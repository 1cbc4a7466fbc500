use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::provider::{
    Provider,
    ProviderKind,
};
use crate::translation::ResolvePolicy;
use crate::types::{
    LanguageCodePart,
    Locale,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "providers[0].prefix")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct L10nSettings {
    /// Separator for composed keys (`Home.Title`). `null` disables them.
    pub composed_key_separator: Option<String>,

    /// Key translated in place of a missing one.
    pub missing_key: Option<String>,
    /// Literal returned for a missing key when `missing_key` is unset.
    pub missing_value: Option<String>,

    /// Locale used for collation and to derive the translation language.
    pub default_locale: Locale,

    /// Locale parts joined to build the language tag of translation data.
    ///
    /// - `["language"]`: `en` (default)
    /// - `["language", "country"]`: `en-US`
    pub composed_language: Vec<LanguageCodePart>,

    /// Payload sources, consulted in order on every load.
    pub providers: Vec<Provider>,

    /// Directory provider prefixes are resolved against.
    pub translations_root: PathBuf,
}

impl Default for L10nSettings {
    fn default() -> Self {
        Self {
            composed_key_separator: Some(".".to_string()),
            missing_key: None,
            missing_value: None,
            default_locale: Locale::new("en"),
            composed_language: vec![LanguageCodePart::Language],
            providers: Vec::new(),
            translations_root: PathBuf::from("."),
        }
    }
}

impl L10nSettings {
    /// # Errors
    /// - Empty separator
    /// - Provider without prefix, or file provider without format
    /// - Malformed default locale
    /// - Composed language without the language part
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(sep) = &self.composed_key_separator
            && sep.is_empty()
        {
            errors.push(ValidationError::new(
                "composedKeySeparator",
                "The separator cannot be empty. Please specify a separator (e.g., \".\"), or set it to null to disable composed keys",
            ));
        }

        for (index, provider) in self.providers.iter().enumerate() {
            if provider.prefix.is_empty() {
                errors.push(ValidationError::new(
                    format!("providers[{index}].prefix"),
                    "The prefix cannot be empty. Example: \"./assets/locale-\"",
                ));
            }
            if provider.kind == ProviderKind::File && provider.format.is_empty() {
                errors.push(ValidationError::new(
                    format!("providers[{index}].format"),
                    "File providers need a data format. Example: \"json\"",
                ));
            }
        }

        if self.default_locale.language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale.language",
                "The language cannot be empty. Example: \"en\"",
            ));
        } else if self.default_locale.identifier().is_none() {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!("Invalid locale '{}'", self.default_locale),
            ));
        }

        if !self.composed_language.contains(&LanguageCodePart::Language) {
            errors.push(ValidationError::new(
                "composedLanguage",
                "The composed language must include \"language\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Key resolution settings derived from this configuration.
    #[must_use]
    pub fn resolve_policy(&self) -> ResolvePolicy {
        ResolvePolicy {
            composed_key_separator: self.composed_key_separator.clone(),
            missing_key: self.missing_key.clone(),
            missing_value: self.missing_value.clone(),
        }
    }
}
