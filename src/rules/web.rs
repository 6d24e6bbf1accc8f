//! URI/URL allow-lists, domain normalization, and XSS neutralization.

use tracing::debug;
use url::Url;

use super::strip::{html, scripts};
use crate::SanitizeError;

/// Substrings removed outright by [`xss`]: script-call prefixes, script
/// URI schemes (raw and HTML-encoded), and encoded angle brackets.
const DENY_LIST: &[&str] = &[
    "eval(",
    "eval&#40;",
    "javascript:",
    "javascript&#58;",
    "fromCharCode",
    "&#60;",
    "&#62;",
    "&lt;",
    "&gt;",
];

/// Options for [`domain`].
#[derive(Debug, Clone, Copy)]
pub struct DomainOptions {
    /// Strip one leading `www.` label from the host.
    pub remove_www: bool,
    /// Keep the host's original casing instead of lowercasing it.
    pub preserve_case: bool,
}

impl Default for DomainOptions {
    fn default() -> Self {
        DomainOptions { remove_www: true, preserve_case: false }
    }
}

/// Retain only URI-legal characters. No parse step; never fails.
pub fn uri(input: &str) -> String {
    regex!(r"[^:/?#\[\]@!$&'()*+,;=a-zA-Z0-9_~.%-]+").replace_all(input, "").into_owned()
}

/// Neutralize injection vectors, then retain only URL-legal characters.
///
/// Infallible; see [`url_strict`] for the validating variant bound to the
/// engine's `url` rule.
pub fn url(input: &str) -> String {
    let cleaned = xss(input);
    regex!(r"[^:/?#\[\]@!$&'()*+,;=a-zA-Z0-9_~.%-]+").replace_all(&cleaned, "").into_owned()
}

/// Like [`url`], but the result must round-trip through URL parsing as an
/// absolute `http`/`https`/`ftp` URL.
pub fn url_strict(input: &str) -> Result<String, SanitizeError> {
    let sanitized = url(input);
    let parsed = Url::parse(&sanitized).map_err(|err| {
        debug!(input = %sanitized, %err, "url rule rejected input");
        SanitizeError::InvalidUrl(err.to_string())
    })?;
    if !matches!(parsed.scheme(), "http" | "https" | "ftp") {
        return Err(SanitizeError::InvalidUrl(format!(
            "unsupported scheme {:?}",
            parsed.scheme()
        )));
    }
    Ok(sanitized)
}

/// Normalize a bare or schemed host string down to its domain.
///
/// The input is XSS-neutralized, given an `https://` scheme when it has
/// none, and parsed as a URL; the host is then optionally stripped of a
/// leading `www.`, optionally lowercased, and reduced to domain-legal
/// characters (letters, digits, hyphen, dot). Empty input passes through
/// unchanged.
pub fn domain(input: &str, options: DomainOptions) -> Result<String, SanitizeError> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let cleaned = xss(input);
    let trimmed = cleaned.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&with_scheme).map_err(|err| {
        debug!(input = %with_scheme, %err, "domain rule rejected input");
        SanitizeError::InvalidUrl(err.to_string())
    })?;
    let host = parsed
        .host_str()
        .ok_or_else(|| SanitizeError::InvalidUrl(format!("no host in {with_scheme:?}")))?;

    // The parser hands hosts back lowercased; recover the input's casing
    // when asked to. Best-effort for ASCII hosts.
    let mut host = host.to_owned();
    if options.preserve_case {
        if let Some(pos) = with_scheme.to_lowercase().find(&host) {
            if let Some(original) = with_scheme.get(pos..pos + host.len()) {
                host = original.to_owned();
            }
        }
    }

    if options.remove_www {
        host = regex!(r"(?i)^www\.").replace(&host, "").into_owned();
    }

    Ok(regex!(r"[^a-zA-Z0-9.-]+").replace_all(&host, "").into_owned())
}

/// Best-effort cross-site-scripting neutralization: script-block removal,
/// deny-list substring removal, then a final tag strip.
pub fn xss(input: &str) -> String {
    let mut value = scripts(input);
    for needle in DENY_LIST {
        if value.contains(needle) {
            value = value.replace(needle, "");
        }
    }
    html(&value)
}
