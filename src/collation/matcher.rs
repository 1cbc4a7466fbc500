//! Equality, ordering and substring predicates on top of a [`Collation`].

use std::cmp::Ordering;
use std::sync::Arc;

use super::collator::{
    Collation,
    UnicodeCollator,
};
use super::options::CollatorOptions;

/// Collation-based string predicates.
///
/// When the capability does not support the requested locale, comparisons
/// are neutral: `compare` is `Equal` and `substring_match` matches
/// everything, so filtering and sorting leave input untouched.
#[derive(Debug, Clone)]
pub struct CollationMatcher {
    collator: Arc<dyn Collation>,
}

impl Default for CollationMatcher {
    fn default() -> Self {
        Self::new(Arc::new(UnicodeCollator))
    }
}

impl CollationMatcher {
    #[must_use]
    pub fn new(collator: Arc<dyn Collation>) -> Self {
        Self { collator }
    }

    #[must_use]
    pub fn supports(&self, locale: &str) -> bool {
        self.collator.supports(locale)
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str, locale: &str, options: &CollatorOptions) -> Ordering {
        if !self.supports(locale) {
            return Ordering::Equal;
        }
        self.collator.compare(a, b, locale, options)
    }

    #[must_use]
    pub fn equals(&self, a: &str, b: &str, locale: &str, options: &CollatorOptions) -> bool {
        self.compare(a, b, locale, options).is_eq()
    }

    /// Whether some run of `needle.chars().count()` characters in `value`
    /// collates equal to `needle`.
    ///
    /// Windows are taken over chars, left to right, stopping at the first
    /// match. A needle longer than the value never matches.
    #[must_use]
    pub fn substring_match(
        &self,
        value: &str,
        needle: &str,
        locale: &str,
        options: &CollatorOptions,
    ) -> bool {
        if !self.supports(locale) {
            return true;
        }

        let needle_len = needle.chars().count();
        let value_len = value.chars().count();
        if needle_len > value_len {
            return false;
        }
        if needle_len == value_len {
            return self.collator.compare(value, needle, locale, options).is_eq();
        }

        let boundaries: Vec<usize> =
            value.char_indices().map(|(i, _)| i).chain(std::iter::once(value.len())).collect();

        boundaries
            .iter()
            .zip(boundaries.iter().skip(needle_len))
            .filter_map(|(&start, &end)| value.get(start..end))
            .any(|window| self.collator.compare(window, needle, locale, options).is_eq())
    }
}
