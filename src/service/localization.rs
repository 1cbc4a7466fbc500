//! Localization service: language switching, translation and collation.

use std::cmp::Ordering;
use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::broadcast;

use super::fetcher::{
    FsFetcher,
    PayloadFetcher,
};
use super::list::{
    ListCollation,
    Record,
    search_records,
    sort_records,
};
use super::state::{
    Completion,
    Coordinator,
    ServiceState,
};
use crate::collation::{
    Collation,
    CollationMatcher,
    CollatorOptions,
    UnicodeCollator,
};
use crate::config::L10nSettings;
use crate::input::provider::Provider;
use crate::input::translation::Payload;
use crate::translation::{
    Args,
    ResolvePolicy,
    TranslationTable,
};
use crate::types::{
    LanguageCodePart,
    LanguageTag,
    Locale,
    SortOrder,
};

/// Capacity of the language-change channel.
const NOTIFICATION_CAPACITY: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("No language to reload: none was given and none is active")]
    NoLanguage,

    #[error("Loading '{0}' from providers requires a Tokio runtime")]
    NoRuntime(LanguageTag),
}

/// Translation table, language-switch coordinator and collation, shared
/// between clones.
///
/// # Lock order
///
/// When both locks are held, `coordinator` is always taken before `table`.
/// Neither lock is held across an await point.
#[derive(Clone)]
pub struct LocalizationService {
    /// Translation data per language
    table: Arc<RwLock<TranslationTable>>,
    /// Active language, providers and the in-flight request
    coordinator: Arc<Mutex<Coordinator>>,
    /// Missing-key policy and key separator
    policy: Arc<ResolvePolicy>,
    /// Locale parts forming the language of a default locale
    composed_language: Arc<[LanguageCodePart]>,
    matcher: CollationMatcher,
    fetcher: Arc<dyn PayloadFetcher>,
    /// Announces every language that becomes active
    notifier: broadcast::Sender<LanguageTag>,
}

impl std::fmt::Debug for LocalizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationService")
            .field("table", &"<TranslationTable>")
            .field("coordinator", &"<Coordinator>")
            .field("policy", &self.policy)
            .field("composed_language", &self.composed_language)
            .field("matcher", &self.matcher)
            .field("fetcher", &self.fetcher)
            .finish_non_exhaustive()
    }
}

impl LocalizationService {
    #[must_use]
    pub fn new(
        settings: &L10nSettings,
        fetcher: Arc<dyn PayloadFetcher>,
        collator: Arc<dyn Collation>,
    ) -> Self {
        let (notifier, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        let coordinator =
            Coordinator::new(settings.default_locale.clone(), settings.providers.clone());

        Self {
            table: Arc::new(RwLock::new(TranslationTable::new())),
            coordinator: Arc::new(Mutex::new(coordinator)),
            policy: Arc::new(settings.resolve_policy()),
            composed_language: settings.composed_language.clone().into(),
            matcher: CollationMatcher::new(collator),
            fetcher,
            notifier,
        }
    }

    /// Service reading provider files below `translations_root` and
    /// collating with [`UnicodeCollator`].
    #[must_use]
    pub fn from_settings(settings: &L10nSettings) -> Self {
        Self::new(
            settings,
            Arc::new(FsFetcher::new(settings.translations_root.clone())),
            Arc::new(UnicodeCollator::new()),
        )
    }

    // ------------------------------------------------------------------
    // Translation data
    // ------------------------------------------------------------------

    /// Merges `payload` directly into the table for `language`.
    pub fn add_translation(&self, language: impl Into<LanguageTag>, payload: Payload) {
        self.write_table().add_data(&language.into(), payload);
    }

    /// Registers a provider consulted on every subsequent load.
    pub fn translation_provider(&self, provider: Provider) {
        tracing::debug!(prefix = %provider.prefix, kind = ?provider.kind, "Adding provider");
        self.lock_coordinator().providers.push(provider);
    }

    /// Switches to `language`.
    ///
    /// Does nothing for an empty tag or the active language. Without
    /// providers the language becomes active at once; otherwise every
    /// provider is fetched in its own task and the change is announced once
    /// all of them have reported.
    ///
    /// # Errors
    /// Providers are registered but no Tokio runtime is running.
    pub fn request_language(&self, language: impl Into<LanguageTag>) -> Result<(), ServiceError> {
        let language = language.into();
        let coordinator = self.lock_coordinator();
        if !coordinator.should_request(&language) {
            tracing::debug!(language = %language, "Language already active or empty");
            return Ok(());
        }
        self.load(coordinator, language, false)
    }

    /// Reloads `language`, or the active language when `None`.
    ///
    /// Existing data of the language is replaced by what the providers
    /// return, even when it is already active. Without providers the data
    /// added directly is kept and the change is announced again.
    ///
    /// # Errors
    /// - No language given and none active
    /// - Providers are registered but no Tokio runtime is running
    pub fn update_translation(&self, language: Option<LanguageTag>) -> Result<(), ServiceError> {
        let coordinator = self.lock_coordinator();
        let language = language
            .filter(|language| !language.is_empty())
            .or_else(|| coordinator.language.clone())
            .ok_or(ServiceError::NoLanguage)?;
        self.load(coordinator, language, true)
    }

    /// Sets the locale used for collation and requests the language derived
    /// from it.
    ///
    /// # Errors
    /// See [`Self::request_language`].
    pub fn set_default_locale(&self, locale: Locale) -> Result<(), ServiceError> {
        let language = LanguageTag::new(locale.compose(&self.composed_language));
        tracing::debug!(locale = %locale, language = %language, "Setting default locale");
        self.lock_coordinator().default_locale = locale;
        self.request_language(language)
    }

    fn load(
        &self,
        mut coordinator: MutexGuard<'_, Coordinator>,
        language: LanguageTag,
        reload: bool,
    ) -> Result<(), ServiceError> {
        if coordinator.providers.is_empty() {
            tracing::debug!(language = %language, "No providers, activating directly");
            coordinator.activate(language.clone());
            drop(coordinator);
            self.notify(language);
            return Ok(());
        }

        let Ok(runtime) = Handle::try_current() else {
            return Err(ServiceError::NoRuntime(language));
        };
        let Some(dispatch) = coordinator.begin(language, reload) else {
            return Ok(());
        };
        drop(coordinator);

        tracing::debug!(
            id = dispatch.id,
            language = %dispatch.language,
            providers = dispatch.providers.len(),
            reload,
            "Loading language"
        );

        for (index, provider) in dispatch.providers.iter().enumerate() {
            let url = provider.url(&dispatch.language);
            let fetch = self.fetcher.fetch(&url);
            let service = self.clone();
            let id = dispatch.id;

            runtime.spawn(async move {
                let payload = match fetch.await {
                    Ok(payload) => Some(payload),
                    Err(error) => {
                        tracing::warn!(url = %url, "Provider failed: {}", error);
                        None
                    }
                };
                service.provider_reported(id, index, payload);
            });
        }

        Ok(())
    }

    /// Records a provider result; the last one of the current request
    /// merges the payloads and activates the language.
    fn provider_reported(&self, id: u64, index: usize, payload: Option<Payload>) {
        let mut coordinator = self.lock_coordinator();

        match coordinator.complete(id, index, payload) {
            Completion::Stale => {
                tracing::warn!(id, index, "Discarding response of a superseded request");
            }
            Completion::Pending { remaining } => {
                tracing::debug!(id, index, remaining, "Provider reported");
            }
            Completion::Finished(request) => {
                let language = request.language.clone();
                {
                    let mut table = self.write_table();
                    if request.reload && table.clear_language(&language) {
                        tracing::debug!(language = %language, "Cleared translations for reload");
                    }
                    for payload in request.into_payloads() {
                        table.add_data(&language, payload);
                    }
                }
                coordinator.activate(language.clone());
                drop(coordinator);

                tracing::debug!(id, language = %language, "Language ready");
                self.notify(language);
            }
        }
    }

    fn notify(&self, language: LanguageTag) {
        if let Err(error) = self.notifier.send(language) {
            tracing::debug!(language = %error.0, "No subscribers for language change");
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Receiver of every language change, starting from now.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageTag> {
        self.notifier.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> ServiceState {
        self.lock_coordinator().state
    }

    /// The active language, once one is ready.
    #[must_use]
    pub fn language(&self) -> Option<LanguageTag> {
        self.lock_coordinator().language.clone()
    }

    #[must_use]
    pub fn default_locale(&self) -> Locale {
        self.lock_coordinator().default_locale.clone()
    }

    /// Languages with data in the table, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<LanguageTag> {
        self.read_table().languages().into_iter().cloned().collect()
    }

    /// Flattened keys of `language` (or the active language), sorted.
    #[must_use]
    pub fn keys(&self, language: Option<&LanguageTag>) -> Vec<String> {
        let language = self.language_or_active(language);
        let separator = self.policy.composed_key_separator.as_deref().unwrap_or(".");
        self.read_table().keys(&language, separator)
    }

    // ------------------------------------------------------------------
    // Translation and collation
    // ------------------------------------------------------------------

    /// Translates `key` into `language` (or the active language).
    ///
    /// Never fails: misses fall back to `missingKey`, then `missingValue`,
    /// then the key itself.
    #[must_use]
    pub fn translate(&self, key: &str, args: Option<&Args>, language: Option<&LanguageTag>) -> String {
        let language = self.language_or_active(language);
        self.read_table().resolve(key, &language, &self.policy, args)
    }

    /// Compares the translations of two keys in the default locale.
    ///
    /// `extension` is appended to the locale as a Unicode extension
    /// (`kn`, `co-phonebk`, ...). Options default to sort usage with
    /// variant sensitivity.
    #[must_use]
    pub fn compare(
        &self,
        key1: &str,
        key2: &str,
        extension: Option<&str>,
        options: Option<CollatorOptions>,
    ) -> Ordering {
        let locale = self.default_locale().tag_with_extension(extension);
        let options = options.unwrap_or_else(CollatorOptions::sort);
        if !self.matcher.supports(&locale) {
            return Ordering::Equal;
        }

        let language = self.language_or_active(None);
        let table = self.read_table();
        let a = table.resolve(key1, &language, &self.policy, None);
        let b = table.resolve(key2, &language, &self.policy, None);
        self.matcher.compare(&a, &b, &locale, &options)
    }

    /// Sorts records by the translation of their `key_field` value.
    ///
    /// Options default to sort usage with variant sensitivity.
    #[must_use]
    pub fn sort<R: Record>(
        &self,
        list: Vec<R>,
        key_field: &str,
        order: SortOrder,
        extension: Option<&str>,
        options: Option<CollatorOptions>,
    ) -> Vec<R> {
        let locale = self.default_locale().tag_with_extension(extension);
        let collation = ListCollation {
            matcher: &self.matcher,
            locale: &locale,
            options: options.unwrap_or_else(CollatorOptions::sort),
        };

        let language = self.language_or_active(None);
        let table = self.read_table();
        sort_records(list, key_field, order, &collation, |value| {
            table.resolve(value, &language, &self.policy, None)
        })
    }

    /// Keeps the records whose translated `key_fields` values contain
    /// `query`.
    ///
    /// Options default to search usage with base sensitivity.
    #[must_use]
    pub fn search<R: Record>(
        &self,
        query: &str,
        list: Vec<R>,
        key_fields: &[&str],
        options: Option<CollatorOptions>,
    ) -> Vec<R> {
        let locale = self.default_locale().tag();
        let collation = ListCollation {
            matcher: &self.matcher,
            locale: &locale,
            options: options.unwrap_or_else(CollatorOptions::search),
        };

        let language = self.language_or_active(None);
        let table = self.read_table();
        search_records(query, list, key_fields, &collation, |value| {
            table.resolve(value, &language, &self.policy, None)
        })
    }

    fn language_or_active(&self, language: Option<&LanguageTag>) -> LanguageTag {
        language.cloned().or_else(|| self.language()).unwrap_or_default()
    }

    fn lock_coordinator(&self) -> MutexGuard<'_, Coordinator> {
        self.coordinator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_table(&self) -> RwLockReadGuard<'_, TranslationTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, TranslationTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}
