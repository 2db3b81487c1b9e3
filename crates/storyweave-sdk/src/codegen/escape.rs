//! Escaping primitives for generated JSX and JavaScript.
//!
//! Templates never receive raw user text. Every interpolated value is first
//! wrapped in one of these types, whose `Display` output is safe in the
//! syntactic position the template puts it in.

use std::fmt;

/// A double-quoted JavaScript string literal.
///
/// Quotes, backslashes and control characters are escaped, as are `<`, `>`
/// and `&` (so the literal cannot open a tag or close a `<script>` element)
/// and the U+2028/U+2029 line separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsLiteral(String);

impl JsLiteral {
    pub fn new(text: &str) -> Self {
        Self(quote_js(text))
    }

    /// The literal including its surrounding quotes.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The literal as a JSX expression container: `{"..."}`.
    pub fn braced(&self) -> Braced<'_, Self> {
        Braced(self)
    }
}

impl fmt::Display for JsLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wraps a value in `{` `}` so it can stand as a JSX attribute value or child.
#[derive(Debug, Clone, Copy)]
pub struct Braced<'a, T>(&'a T);

impl<T: fmt::Display> fmt::Display for Braced<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

/// An ordered JavaScript object literal of inline style properties.
///
/// Setting an existing key replaces its value in place, so later layers
/// (element overrides) win over earlier ones (fixed defaults) without
/// emitting duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleObject {
    entries: Vec<(String, JsLiteral)>,
}

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`StyleObject::set`].
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: &str) {
        let value = JsLiteral::new(value);
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsLiteral> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The object as a JSX `style` attribute value: `{{ ... }}`.
    pub fn braced(&self) -> Braced<'_, Self> {
        Braced(self)
    }
}

impl fmt::Display for StyleObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            if is_js_identifier(key) {
                write!(f, "{key}: {value}")?;
            } else {
                write!(f, "{}: {value}", JsLiteral::new(key))?;
            }
        }
        f.write_str(" }")
    }
}

/// Make text safe for a single-line `//` comment inside a `<script>` element.
///
/// Line breaks and other control characters become spaces and the result is
/// trimmed; sequences that the HTML parser treats specially inside script
/// data are neutralised.
pub fn comment_text(text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| {
            if c.is_control() || c == '\u{2028}' || c == '\u{2029}' {
                ' '
            } else {
                c
            }
        })
        .collect();
    flattened
        .trim()
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
}

fn quote_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => push_unicode_escape(&mut out, c),
            c if c.is_control() => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    // Only BMP characters reach here, so four hex digits suffice.
    out.push_str(&format!("\\u{:04x}", c as u32));
}

fn is_js_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_literal_plain_text() {
        assert_eq!(JsLiteral::new("Height").as_str(), "\"Height\"");
        assert_eq!(JsLiteral::new("").as_str(), "\"\"");
    }

    #[test]
    fn test_js_literal_escapes_syntax() {
        let literal = JsLiteral::new("say \"hi\" {now} \\ <b>&</b>\nnext");
        assert_eq!(
            literal.as_str(),
            "\"say \\\"hi\\\" {now} \\\\ \\u003cb\\u003e\\u0026\\u003c/b\\u003e\\nnext\""
        );
    }

    #[test]
    fn test_js_literal_escapes_line_separators_and_controls() {
        let literal = JsLiteral::new("a\u{2028}b\u{0}c");
        assert_eq!(literal.as_str(), "\"a\\u2028b\\u0000c\"");
    }

    #[test]
    fn test_js_literal_keeps_unicode() {
        assert_eq!(JsLiteral::new("Café ☕").as_str(), "\"Café ☕\"");
    }

    #[test]
    fn test_braced_literal() {
        assert_eq!(JsLiteral::new("x").braced().to_string(), "{\"x\"}");
    }

    #[test]
    fn test_style_object_display() {
        let style = StyleObject::new()
            .with("fontSize", "16px")
            .with("font-weight", "bold");
        assert_eq!(
            style.to_string(),
            "{ fontSize: \"16px\", \"font-weight\": \"bold\" }"
        );
        assert_eq!(
            style.braced().to_string(),
            "{{ fontSize: \"16px\", \"font-weight\": \"bold\" }}"
        );
    }

    #[test]
    fn test_style_object_set_replaces_in_place() {
        let mut style = StyleObject::new().with("padding", "8px").with("color", "red");
        style.set("padding", "0");
        assert_eq!(style.len(), 2);
        assert_eq!(style.to_string(), "{ padding: \"0\", color: \"red\" }");
        assert_eq!(style.get("padding").map(JsLiteral::as_str), Some("\"0\""));
    }

    #[test]
    fn test_empty_style_object() {
        let style = StyleObject::new();
        assert!(style.is_empty());
        assert_eq!(style.braced().to_string(), "{{}}");
    }

    #[test]
    fn test_style_values_are_escaped() {
        let style = StyleObject::new().with("color", "red\" onClick=\"x");
        assert_eq!(style.to_string(), "{ color: \"red\\\" onClick=\\\"x\" }");
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("Quiz\nalert(1)"), "Quiz alert(1)");
        assert_eq!(comment_text(" \n Quiz\t"), "Quiz");
        assert_eq!(comment_text("\r\n"), "");
        assert_eq!(
            comment_text("</script><!-- x"),
            "<\\/script><\\!-- x"
        );
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("backgroundColor"));
        assert!(is_js_identifier("_private"));
        assert!(is_js_identifier("$x1"));
        assert!(!is_js_identifier("1x"));
        assert!(!is_js_identifier("font-size"));
        assert!(!is_js_identifier(""));
    }
}
