//! Escaping helpers for text placed into HTML and inline scripts.

use serde::Serialize;

/// Escapes text for use in HTML element content or quoted attributes.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes a value as JSON that is safe to inline in a `<script>` block.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Escapes text for use inside a JavaScript template literal.
#[must_use]
pub fn template_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"O'HARE\" & co</b>"),
            "&lt;b&gt;&quot;O&#39;HARE&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape("1200 N STATE ST"), "1200 N STATE ST");
    }

    #[test]
    fn script_json_cannot_close_script_tag() {
        let json = script_json(&["</script><script>alert(1)"]).unwrap();
        assert!(!json.contains("</script"));
        assert!(json.contains("<\\/script>"));
    }

    #[test]
    fn template_literal_escapes_interpolation() {
        assert_eq!(template_literal("a `b` ${c}"), "a \\`b\\` \\${c}");
        assert_eq!(template_literal("INJURIES_TOTAL > 0"), "INJURIES_TOTAL > 0");
    }
}
