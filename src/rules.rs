//! Text transformation primitives.
//!
//! Every primitive is a pure `&str -> String` function over in-memory
//! text; `domain` and `url_strict` are the only fallible ones (URL
//! parsing). Patterns are compiled once via the `regex!` macro and are
//! safe to share across threads.
//!
//! These functions are both the single-value convenience API and the
//! appliers behind the engine's rule registry. None of them parse a DOM:
//! tag stripping is a best-effort, single-pass text filter, not a
//! parser-based security boundary.

#[path = "rules/escape.rs"]
mod escape;
#[path = "rules/strip.rs"]
mod strip;
#[path = "rules/web.rs"]
mod web;

pub use escape::html_escape;
pub use strip::{alpha, alphanumeric, html, scripts, xml};
pub use web::{DomainOptions, domain, uri, url, url_strict, xss};
