//! Character-class whitelists and tag stripping.

/// Keep only US-ASCII letters. With `spaces`, space characters survive
/// too.
pub fn alpha(input: &str, spaces: bool) -> String {
    if spaces {
        regex!(r"[^a-zA-Z ]+").replace_all(input, "").into_owned()
    } else {
        regex!(r"[^a-zA-Z]+").replace_all(input, "").into_owned()
    }
}

/// Keep only US-ASCII letters and digits. With `spaces`, space characters
/// survive too.
pub fn alphanumeric(input: &str, spaces: bool) -> String {
    if spaces {
        regex!(r"[^a-zA-Z0-9 ]+").replace_all(input, "").into_owned()
    } else {
        regex!(r"[^a-zA-Z0-9]+").replace_all(input, "").into_owned()
    }
}

/// Remove `<...>` tag-shaped substrings. Single pass; nesting is not
/// parsed.
pub fn html(input: &str) -> String {
    regex!(r"<[^>]*>").replace_all(input, "").into_owned()
}

/// Remove XML tags. Tag shapes are identical to HTML's, so this shares
/// [`html`]'s pattern.
pub fn xml(input: &str) -> String {
    html(input)
}

/// Remove `<script>`, `<iframe>`, `<embed>` and `<object>` blocks: the
/// opening tag, a matching closing tag, and everything between.
/// Case-insensitive.
pub fn scripts(input: &str) -> String {
    regex!(r"(?i)<(?:script|iframe|embed|object)\b[^>]*>[\s\S]*?</(?:script|iframe|embed|object)>")
        .replace_all(input, "")
        .into_owned()
}
