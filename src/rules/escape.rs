//! HTML character-reference escaping.

/// References that [`html_escape`] itself produces. An ampersand already
/// starting one of these is left alone, so re-escaping an escaped string
/// is a no-op.
const REFERENCES: &[&str] = &["lt;", "gt;", "amp;", "#34;", "#39;"];

/// Escape `<`, `>`, `&`, `"` and `'` as character references.
///
/// Never removes characters; output only grows.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (idx, ch) in input.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '&' => {
                let tail = &input[idx + 1..];
                if REFERENCES.iter().any(|reference| tail.starts_with(reference)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_around_text() {
        assert_eq!(
            html_escape("<html><body><h1>abc</h1></body></html>"),
            "&lt;html&gt;&lt;body&gt;&lt;h1&gt;abc&lt;/h1&gt;&lt;/body&gt;&lt;/html&gt;"
        );
    }

    #[test]
    fn escapes_quotes_and_ampersands() {
        assert_eq!(html_escape(r#"a & b "c" 'd'"#), "a &amp; b &#34;c&#34; &#39;d&#39;");
    }

    #[test]
    fn leaves_existing_references_alone() {
        assert_eq!(html_escape("&lt;kept&gt; &amp; &#34;"), "&lt;kept&gt; &amp; &#34;");
        // Unknown references still get their ampersand escaped.
        assert_eq!(html_escape("&copy;"), "&amp;copy;");
    }

    #[test]
    fn escaping_is_idempotent() {
        for input in ["<html>", "a & b", "&lt;", "plain", "", "mixed <b>&amp;</b>"] {
            let once = html_escape(input);
            assert_eq!(html_escape(&once), once, "not idempotent on {input:?}");
        }
    }
}
