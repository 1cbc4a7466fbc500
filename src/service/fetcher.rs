//! Payload retrieval for providers.

use std::fmt;
use std::path::PathBuf;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::input::translation::{
    Payload,
    PayloadError,
    parse_payload,
};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to read '{url}': {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid translation payload at '{url}': {source}")]
    Payload {
        url: String,
        #[source]
        source: PayloadError,
    },
}

/// Retrieves the payload behind a provider URL.
///
/// The returned future is spawned on the runtime, so it must own everything
/// it needs.
pub trait PayloadFetcher: Send + Sync + fmt::Debug {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Payload, FetchError>>;
}

/// Reads payloads from files below a root directory.
///
/// Provider URLs are treated as paths relative to the root; absolute paths
/// are used as they are.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PayloadFetcher for FsFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Payload, FetchError>> {
        let path = self.root.join(url);
        let url = url.to_string();

        Box::pin(async move {
            tracing::debug!(path = %path.display(), "Reading translation file");
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(source) => return Err(FetchError::Io { url, source }),
            };
            parse_payload(&content).map_err(|source| FetchError::Payload { url, source })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::input::translation::TranslationValue;

    #[tokio::test]
    async fn fs_fetcher_reads_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("assets")).unwrap();
        fs::write(temp_dir.path().join("assets/locale-en.json"), r#"{"Title": "Hello"}"#).unwrap();

        let fetcher = FsFetcher::new(temp_dir.path());
        let payload = fetcher.fetch("./assets/locale-en.json").await.unwrap();

        assert_that!(payload.get("Title"), some(eq(&TranslationValue::text("Hello"))));
    }

    #[tokio::test]
    async fn fs_fetcher_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = FsFetcher::new(temp_dir.path()).fetch("locale-xx.json").await;

        assert_that!(result, err(displays_as(contains_substring("Failed to read 'locale-xx.json'"))));
    }

    #[tokio::test]
    async fn fs_fetcher_invalid_payload() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("locale-en.json"), "[1, 2]").unwrap();

        let result = FsFetcher::new(temp_dir.path()).fetch("locale-en.json").await;

        assert!(matches!(result, Err(FetchError::Payload { .. })));
    }
}
