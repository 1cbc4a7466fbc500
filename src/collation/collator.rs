//! Locale-sensitive string comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::{
    AlternateHandling,
    CaseLevel,
    Collator,
    Numeric,
    Strength,
};
use icu_locid::Locale as IcuLocale;
use unic_langid::LanguageIdentifier;

use super::options::{
    CollatorOptions,
    Sensitivity,
};

/// A string collation capability keyed by locale tag.
///
/// Implementations must give a total order for a fixed locale and options.
pub trait Collation: Send + Sync + fmt::Debug {
    /// Whether `locale` (a BCP 47 tag, possibly with a `-u-` extension) is
    /// supported.
    fn supports(&self, locale: &str) -> bool;

    fn compare(&self, a: &str, b: &str, locale: &str, options: &CollatorOptions) -> Ordering;
}

/// Unicode Collation Algorithm with CLDR locale tailorings, backed by ICU4X.
///
/// [`Sensitivity`] maps onto collation strength:
/// - `Base`: primary
/// - `Accent`: secondary
/// - `Case`: primary plus the case level
/// - `Variant`: identical, so canonically distinct strings never collate
///   equal; tertiary when punctuation is ignored
///
/// Any well-formed language tag is supported. Tags without tailoring use
/// the root collation. The `kn` Unicode extension keyword turns on numeric
/// ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeCollator;

impl UnicodeCollator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Collation for UnicodeCollator {
    fn supports(&self, locale: &str) -> bool {
        let base = locale.split_once("-u-").map_or(locale, |(base, _)| base);
        LanguageIdentifier::from_str(base).is_ok_and(|id| !id.language.is_empty())
    }

    fn compare(&self, a: &str, b: &str, locale: &str, options: &CollatorOptions) -> Ordering {
        collator(locale, options).map_or(Ordering::Equal, |collator| collator.compare(a, b))
    }
}

/// Builds the ICU collator for `locale`, falling back to the root collation
/// when the tag does not parse.
fn collator(locale: &str, options: &CollatorOptions) -> Option<Collator> {
    let icu_locale = locale.parse::<IcuLocale>().unwrap_or(IcuLocale::UND);
    Collator::try_new(&(&icu_locale).into(), icu_options(locale, options))
        .inspect_err(|error| {
            tracing::warn!(locale = %locale, "Failed to create collator: {}", error);
        })
        .ok()
}

/// ICU options for `options`; the locale's own defaults apply to anything
/// left unset.
fn icu_options(locale: &str, options: &CollatorOptions) -> icu_collator::CollatorOptions {
    let mut icu = icu_collator::CollatorOptions::new();

    icu.strength = Some(match options.sensitivity {
        Sensitivity::Base | Sensitivity::Case => Strength::Primary,
        Sensitivity::Accent => Strength::Secondary,
        // shifted characters would come back at the quaternary level
        Sensitivity::Variant if options.ignore_punctuation => Strength::Tertiary,
        Sensitivity::Variant => Strength::Identical,
    });
    if options.sensitivity == Sensitivity::Case {
        icu.case_level = Some(CaseLevel::On);
    }

    if options.ignore_punctuation {
        icu.alternate_handling = Some(AlternateHandling::Shifted);
    }

    let numeric = options.numeric || numeric_keyword(locale).unwrap_or(false);
    icu.numeric = Some(if numeric { Numeric::On } else { Numeric::Off });

    icu
}

/// Value of the `kn` (numeric) keyword in a `-u-` extension, if present.
fn numeric_keyword(locale: &str) -> Option<bool> {
    let (_, extension) = locale.split_once("-u-")?;
    let mut parts = extension.split('-').peekable();
    while let Some(key) = parts.next() {
        if key.eq_ignore_ascii_case("kn") {
            return Some(!parts.peek().is_some_and(|value| value.eq_ignore_ascii_case("false")));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn compare(a: &str, b: &str, sensitivity: Sensitivity) -> Ordering {
        UnicodeCollator
            .compare(a, b, "en", &CollatorOptions::sort().with_sensitivity(sensitivity))
    }

    #[rstest]
    #[case("en")]
    #[case("en-US")]
    #[case("sr-Cyrl-RS")]
    #[case("de-DE-u-co-phonebk")]
    fn supports_well_formed_tags(#[case] locale: &str) {
        assert_that!(UnicodeCollator.supports(locale), eq(true));
    }

    #[rstest]
    #[case("")]
    #[case("und")]
    #[case("not a locale")]
    #[case("en_US!")]
    fn rejects_malformed_tags(#[case] locale: &str) {
        assert_that!(UnicodeCollator.supports(locale), eq(false));
    }

    #[rstest]
    #[case::base_ignores_accent("a", "á", Sensitivity::Base, Ordering::Equal)]
    #[case::base_ignores_case("a", "A", Sensitivity::Base, Ordering::Equal)]
    #[case::base_letters_differ("a", "b", Sensitivity::Base, Ordering::Less)]
    #[case::accent_sees_accent("a", "á", Sensitivity::Accent, Ordering::Less)]
    #[case::accent_ignores_case("a", "A", Sensitivity::Accent, Ordering::Equal)]
    #[case::case_sees_case("a", "A", Sensitivity::Case, Ordering::Less)]
    #[case::case_ignores_accent("a", "á", Sensitivity::Case, Ordering::Equal)]
    #[case::variant_sees_accent("a", "á", Sensitivity::Variant, Ordering::Less)]
    #[case::variant_sees_case("A", "a", Sensitivity::Variant, Ordering::Greater)]
    #[case::precomposed_equals_decomposed("\u{e9}", "e\u{301}", Sensitivity::Variant, Ordering::Equal)]
    fn sensitivity_levels(
        #[case] a: &str,
        #[case] b: &str,
        #[case] sensitivity: Sensitivity,
        #[case] expected: Ordering,
    ) {
        assert_that!(compare(a, b, sensitivity), eq(expected));
    }

    #[rstest]
    #[case::primary_beats_case("a", "B")]
    #[case::primary_beats_accent("á", "b")]
    #[case::prefix_first("Account", "Accountant")]
    #[case::space_before_letters("a b", "ab")]
    #[case::digits_before_letters("9", "a")]
    #[case::natural_word_order("résumé", "resumes")]
    fn orders_less(#[case] a: &str, #[case] b: &str) {
        assert_that!(compare(a, b, Sensitivity::Variant), eq(Ordering::Less));
        assert_that!(compare(b, a, Sensitivity::Variant), eq(Ordering::Greater));
    }

    #[rstest]
    fn numeric_option_compares_digit_runs() {
        let options = CollatorOptions { numeric: true, ..CollatorOptions::sort() };

        assert_that!(
            UnicodeCollator.compare("item 2", "item 10", "en", &options),
            eq(Ordering::Less)
        );
        assert_that!(
            UnicodeCollator.compare(
                "007",
                "7",
                "en",
                &CollatorOptions { numeric: true, ..CollatorOptions::search() }
            ),
            eq(Ordering::Equal)
        );
        assert_that!(
            UnicodeCollator.compare("item 2", "item 10", "en", &CollatorOptions::sort()),
            eq(Ordering::Greater)
        );
    }

    #[rstest]
    fn numeric_extension_keyword() {
        let options = CollatorOptions::sort();

        assert_that!(UnicodeCollator.compare("2", "10", "en-u-kn", &options), eq(Ordering::Less));
        assert_that!(
            UnicodeCollator.compare("2", "10", "en-u-kn-true", &options),
            eq(Ordering::Less)
        );
        assert_that!(
            UnicodeCollator.compare("2", "10", "en-u-kn-false", &options),
            eq(Ordering::Greater)
        );
    }

    #[rstest]
    fn ignore_punctuation_skips_symbols_and_spaces() {
        let options = CollatorOptions { ignore_punctuation: true, ..CollatorOptions::sort() };

        assert_that!(UnicodeCollator.compare("a-b c", "abc", "en", &options), eq(Ordering::Equal));
        assert_that!(
            UnicodeCollator.compare("a-b", "abc", "en", &CollatorOptions::sort()),
            eq(Ordering::Less)
        );
    }

    #[rstest]
    #[case::sharp_s_expands("Straße", "Strasse", "de", Ordering::Equal)]
    #[case::sharp_s_in_root("straße", "strasse", "en", Ordering::Equal)]
    #[case::polish_stroke_l("Łódź", "Mława", "pl", Ordering::Less)]
    #[case::polish_stroke_l_after_l("Lwów", "Łódź", "pl", Ordering::Less)]
    #[case::danish_ae_after_z("æble", "zebra", "da", Ordering::Greater)]
    #[case::root_slashed_o_near_o("øre", "pre", "en", Ordering::Less)]
    fn letters_without_decomposition(
        #[case] a: &str,
        #[case] b: &str,
        #[case] locale: &str,
        #[case] expected: Ordering,
    ) {
        let options = if expected.is_eq() { CollatorOptions::search() } else { CollatorOptions::sort() };

        assert_that!(UnicodeCollator.compare(a, b, locale, &options), eq(expected));
    }

    #[rstest]
    fn variant_distinguishes_every_string() {
        assert_that!(compare("ǅ", "ǆ", Sensitivity::Variant), not(eq(Ordering::Equal)));
        assert_that!(compare("Straße", "Strasse", Sensitivity::Variant), not(eq(Ordering::Equal)));
        assert_that!(compare("Straße", "Strasse", Sensitivity::Base), eq(Ordering::Equal));
    }
}
