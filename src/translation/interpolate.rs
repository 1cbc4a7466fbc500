//! `{{ name }}` placeholder substitution.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use serde_json::{
    Map,
    Value,
};

/// Interpolation arguments keyed by placeholder name.
pub type Args = Map<String, Value>;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    // literal pattern, always compiles
    Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("placeholder pattern")
});

/// Replaces every `{{ name }}` in `text` with `args[name]`.
///
/// Placeholders whose name is absent from `args` (or maps to `null`) are
/// left as they are. Strings are inserted without quotes; other JSON values
/// use their JSON text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use l10n_service::translation::interpolate::interpolate;
///
/// let args = json!({ "name": "Sam" });
/// let args = args.as_object().unwrap();
/// assert_eq!(interpolate("Hi {{name}}", args), "Hi Sam");
/// assert_eq!(interpolate("Hi {{ other }}", args), "Hi {{ other }}");
/// ```
#[must_use]
pub fn interpolate<'a>(text: &'a str, args: &Args) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let name = caps.get(1).map_or("", |m| m.as_str());
        match args.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => whole.to_string(),
            Some(other) => other.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn args(value: &Value) -> Args {
        value.as_object().cloned().unwrap_or_default()
    }

    #[rstest]
    #[case::simple("Hi {{name}}", json!({"name": "Sam"}), "Hi Sam")]
    #[case::spaces("Hi {{ name }}!", json!({"name": "Sam"}), "Hi Sam!")]
    #[case::no_args("Hi {{name}}", json!({}), "Hi {{name}}")]
    #[case::null_arg("Hi {{name}}", json!({"name": null}), "Hi {{name}}")]
    #[case::number("{{count}} items", json!({"count": 3}), "3 items")]
    #[case::repeated("{{a}}-{{a}}-{{b}}", json!({"a": "x", "b": "y"}), "x-x-y")]
    #[case::partial("{{a}} and {{b}}", json!({"a": "x"}), "x and {{b}}")]
    #[case::unclosed("Hi {{name", json!({"name": "Sam"}), "Hi {{name")]
    #[case::no_placeholder("Plain text", json!({"name": "Sam"}), "Plain text")]
    fn interpolate_cases(#[case] text: &str, #[case] values: Value, #[case] expected: &str) {
        assert_that!(interpolate(text, &args(&values)).as_ref(), eq(expected));
    }

    #[googletest::test]
    fn interpolate_does_not_rescan_substituted_text() {
        let values = json!({"a": "{{b}}", "b": "nope"});

        expect_that!(interpolate("{{a}}", &args(&values)).as_ref(), eq("{{b}}"));
    }
}
