//! Collation-based sorting and searching of record lists.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::BuildHasher;

use serde_json::{
    Map,
    Value,
};

use crate::collation::{
    CollationMatcher,
    CollatorOptions,
};
use crate::types::SortOrder;

/// A caller-owned record with named text fields.
pub trait Record {
    /// Text of field `name`, or `None` when absent or not text.
    fn field(&self, name: &str) -> Option<&str>;
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

/// Matcher, locale and options shared by one list operation.
#[derive(Debug, Clone, Copy)]
pub struct ListCollation<'a> {
    pub matcher: &'a CollationMatcher,
    pub locale: &'a str,
    pub options: CollatorOptions,
}

impl ListCollation<'_> {
    fn supported(&self) -> bool {
        self.matcher.supports(self.locale)
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.matcher.compare(a, b, self.locale, &self.options)
    }

    fn contains(&self, value: &str, needle: &str) -> bool {
        self.matcher.substring_match(value, needle, self.locale, &self.options)
    }
}

/// Sorts `list` by the translated value of `key_field`.
///
/// The sort is stable; `Desc` is the exact reverse of the ascending result.
/// Records without the field sort as the empty string. The list comes back
/// unchanged when the field name is empty or the locale is unsupported.
pub fn sort_records<R: Record>(
    list: Vec<R>,
    key_field: &str,
    order: SortOrder,
    collation: &ListCollation<'_>,
    translate: impl Fn(&str) -> String,
) -> Vec<R> {
    if key_field.is_empty() || !collation.supported() {
        return list;
    }

    let mut keyed: Vec<(String, R)> = list
        .into_iter()
        .map(|record| {
            let translated = record.field(key_field).map(&translate).unwrap_or_default();
            (translated, record)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| collation.compare(a, b));
    if order == SortOrder::Desc {
        keyed.reverse();
    }

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Keeps the records where the translated value of any of `key_fields`
/// contains `query` under collation.
///
/// The list comes back unchanged when the query or the field list is empty
/// or the locale is unsupported.
pub fn search_records<R: Record>(
    query: &str,
    list: Vec<R>,
    key_fields: &[&str],
    collation: &ListCollation<'_>,
    translate: impl Fn(&str) -> String,
) -> Vec<R> {
    if query.is_empty() || key_fields.is_empty() || !collation.supported() {
        return list;
    }

    list.into_iter()
        .filter(|record| {
            key_fields.iter().any(|name| {
                record.field(name).is_some_and(|value| collation.contains(&translate(value), query))
            })
        })
        .collect()
}
