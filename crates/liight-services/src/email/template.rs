//! `${key}` placeholder filling for HTML templates.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^{}]*)\}").expect("placeholder pattern is a valid regex"));

/// Placeholder values keyed by name.
pub type TemplateData = HashMap<&'static str, String>;

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace every `${key}` with the escaped value for the trimmed key.
/// Placeholders without a value are left untouched.
pub fn fill_template(template: &str, data: &TemplateData) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match data.get(caps[1].trim()) {
            Some(value) => escape_html(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&'static str, &str)]) -> TemplateData {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn fills_known_keys() {
        let filled = fill_template("Hello ${name}, file ${ file }", &data(&[("name", "Ada"), ("file", "a.pdf")]));
        assert_eq!(filled, "Hello Ada, file a.pdf");
    }

    #[test]
    fn leaves_unknown_placeholders() {
        let filled = fill_template("${known} and ${unknown}", &data(&[("known", "x")]));
        assert_eq!(filled, "x and ${unknown}");
    }

    #[test]
    fn escapes_values() {
        let filled = fill_template(
            "<p>${name}</p><a href=\"${url}\">",
            &data(&[("name", "<script>alert('x')</script>"), ("url", "a\"b&c")]),
        );
        assert_eq!(
            filled,
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p><a href=\"a&quot;b&amp;c\">"
        );
    }

    #[test]
    fn values_are_not_reexpanded() {
        let filled = fill_template("${a}", &data(&[("a", "${b}"), ("b", "nope")]));
        assert_eq!(filled, "${b}");
    }
}
