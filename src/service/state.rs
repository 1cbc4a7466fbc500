//! Language-switch bookkeeping.

use crate::input::provider::Provider;
use crate::input::translation::Payload;
use crate::types::{
    LanguageTag,
    Locale,
};

/// Life cycle of the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceState {
    /// No language has been requested yet.
    #[default]
    Waiting,
    /// Providers are being fetched for a requested language.
    Loading,
    /// The active language is loaded.
    Ready,
}

/// A language request whose providers have not all reported yet.
#[derive(Debug)]
pub(super) struct PendingRequest {
    pub id: u64,
    pub language: LanguageTag,
    /// Drop the language's existing data before merging.
    pub reload: bool,
    remaining: usize,
    /// One slot per provider, in provider order.
    payloads: Vec<Option<Payload>>,
}

impl PendingRequest {
    /// Received payloads in provider order.
    pub fn into_payloads(self) -> impl Iterator<Item = Payload> {
        self.payloads.into_iter().flatten()
    }
}

/// Fetches to dispatch for a new request.
#[derive(Debug)]
pub(super) struct Dispatch {
    pub id: u64,
    pub language: LanguageTag,
    pub providers: Vec<Provider>,
}

/// What a provider completion did to the bookkeeping.
#[derive(Debug)]
pub(super) enum Completion {
    /// The completion belongs to a superseded request.
    Stale,
    /// Other providers are still outstanding.
    Pending { remaining: usize },
    /// Last provider reported; the request is finished.
    Finished(PendingRequest),
}

/// Mutable coordinator state, guarded by a single lock.
#[derive(Debug, Default)]
pub(super) struct Coordinator {
    pub state: ServiceState,
    pub language: Option<LanguageTag>,
    pub default_locale: Locale,
    pub providers: Vec<Provider>,
    pending: Option<PendingRequest>,
    next_id: u64,
}

impl Coordinator {
    pub fn new(default_locale: Locale, providers: Vec<Provider>) -> Self {
        Self { default_locale, providers, ..Self::default() }
    }

    /// Whether a request for `language` changes anything.
    pub fn should_request(&self, language: &LanguageTag) -> bool {
        !language.is_empty() && self.language.as_ref() != Some(language)
    }

    /// Starts a provider-backed request, superseding any in-flight one.
    ///
    /// Returns `None` when no providers are registered.
    pub fn begin(&mut self, language: LanguageTag, reload: bool) -> Option<Dispatch> {
        if self.providers.is_empty() {
            return None;
        }

        self.next_id += 1;
        let id = self.next_id;
        if let Some(stale) = self.pending.take() {
            tracing::debug!(
                id = stale.id,
                language = %stale.language,
                "Superseding in-flight language request"
            );
        }

        self.state = ServiceState::Loading;
        self.pending = Some(PendingRequest {
            id,
            language: language.clone(),
            reload,
            remaining: self.providers.len(),
            payloads: vec![None; self.providers.len()],
        });

        Some(Dispatch { id, language, providers: self.providers.clone() })
    }

    /// Records the result of provider `index` for request `id`.
    pub fn complete(&mut self, id: u64, index: usize, payload: Option<Payload>) -> Completion {
        let Some(pending) = self.pending.as_mut().filter(|pending| pending.id == id) else {
            return Completion::Stale;
        };

        if let Some(slot) = pending.payloads.get_mut(index) {
            *slot = payload;
        }
        pending.remaining = pending.remaining.saturating_sub(1);

        if pending.remaining > 0 {
            return Completion::Pending { remaining: pending.remaining };
        }

        match self.pending.take() {
            Some(finished) => Completion::Finished(finished),
            None => Completion::Stale,
        }
    }

    /// Marks `language` active and ready.
    pub fn activate(&mut self, language: LanguageTag) {
        self.language = Some(language);
        self.state = ServiceState::Ready;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::payload;

    fn coordinator(providers: usize) -> Coordinator {
        let providers = (0..providers).map(|i| Provider::file(format!("p{i}-"), "json")).collect();
        Coordinator::new(Locale::new("en"), providers)
    }

    fn tag(s: &str) -> LanguageTag {
        LanguageTag::from(s)
    }

    #[googletest::test]
    fn starts_waiting() {
        let coordinator = coordinator(1);

        expect_that!(coordinator.state, eq(ServiceState::Waiting));
        expect_that!(coordinator.language, none());
        expect_that!(coordinator.is_pending(), eq(false));
    }

    #[googletest::test]
    fn should_request_skips_empty_and_active() {
        let mut coordinator = coordinator(1);
        coordinator.activate(tag("en"));

        expect_that!(coordinator.should_request(&tag("")), eq(false));
        expect_that!(coordinator.should_request(&tag("en")), eq(false));
        expect_that!(coordinator.should_request(&tag("it")), eq(true));
    }

    #[googletest::test]
    fn begin_without_providers_dispatches_nothing() {
        let mut coordinator = coordinator(0);

        expect_that!(coordinator.begin(tag("en"), false), none());
        expect_that!(coordinator.state, eq(ServiceState::Waiting));
    }

    #[googletest::test]
    fn finishes_after_every_provider_reports() {
        let mut coordinator = coordinator(3);
        let dispatch = coordinator.begin(tag("it"), false).unwrap();

        expect_that!(coordinator.state, eq(ServiceState::Loading));
        expect_that!(dispatch.providers, len(eq(3)));
        expect_true!(matches!(
            coordinator.complete(dispatch.id, 2, Some(payload(&json!({"a": "2"})))),
            Completion::Pending { remaining: 2 }
        ));
        expect_true!(matches!(
            coordinator.complete(dispatch.id, 1, None),
            Completion::Pending { remaining: 1 }
        ));

        let Completion::Finished(finished) =
            coordinator.complete(dispatch.id, 0, Some(payload(&json!({"a": "0"}))))
        else {
            panic!("request should be finished");
        };

        expect_that!(finished.language, eq(&tag("it")));
        let payloads: Vec<_> = finished.into_payloads().collect();
        expect_that!(payloads, len(eq(2)));
        expect_that!(payloads[0].get("a").and_then(|v| v.as_text()), some(eq("0")));
        expect_that!(payloads[1].get("a").and_then(|v| v.as_text()), some(eq("2")));
        expect_that!(coordinator.is_pending(), eq(false));
    }

    #[googletest::test]
    fn superseded_request_completions_are_stale() {
        let mut coordinator = coordinator(1);
        let first = coordinator.begin(tag("it"), false).unwrap();
        let second = coordinator.begin(tag("de"), false).unwrap();

        expect_that!(second.id, gt(first.id));
        expect_true!(matches!(coordinator.complete(first.id, 0, None), Completion::Stale));
        expect_true!(matches!(coordinator.complete(second.id, 0, None), Completion::Finished(_)));
        expect_true!(matches!(coordinator.complete(second.id, 0, None), Completion::Stale));
    }

    #[googletest::test]
    fn activate_sets_ready() {
        let mut coordinator = coordinator(1);

        coordinator.activate(tag("en"));

        expect_that!(coordinator.state, eq(ServiceState::Ready));
        expect_that!(coordinator.language, some(eq(&tag("en"))));
    }
}
