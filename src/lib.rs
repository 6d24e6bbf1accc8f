//! # sanitor
//!
//! A rule-based string sanitization engine. Untrusted text is cleaned by
//! named transformation rules (markup stripping, character-class
//! whitelisting, URL/domain normalization, XSS neutralization), either one
//! string at a time or declaratively across every tagged string field of a
//! nested struct.
//!
//! The crate is organised around three layers:
//!
//! 1. **The rule primitives** -- [`alpha`], [`html`], [`scripts`],
//!    [`domain`] and friends, each a pure `&str -> String` function
//!    (URL-parsing rules are fallible).
//! 2. **The registry and directive parser** -- a fixed-order catalogue
//!    mapping rule names to primitives, and the parser that turns a raw
//!    tag like `"xss, alpha"` into a [`Directive`].
//! 3. **The walker** -- a depth-first traversal over any [`Sanitizable`]
//!    composite that applies each string field's directive in place.
//!
//! ## Quick start
//!
//! ```rust
//! use sanitor::sanitizable;
//!
//! struct Comment {
//!     author: String,
//!     body: String,
//!     score: i64,
//! }
//!
//! sanitizable!(Comment {
//!     string author => "alpha",
//!     string body => "xss",
//!     scalar score,
//! });
//!
//! let mut comment = Comment {
//!     author: "spiffy".into(),
//!     body: "First <script>doEvil()</script>Name".into(),
//!     score: 3,
//! };
//! sanitor::sanitize(&mut comment).unwrap();
//! assert_eq!(comment.body, "First Name");
//! ```
//!
//! Single strings go through the primitives directly:
//!
//! ```rust
//! assert_eq!(sanitor::html("<b>Hi</b> there"), "Hi there");
//! assert_eq!(sanitor::alpha("abc123 def", false), "abcdef");
//! ```

extern crate self as sanitor;

#[macro_use]
mod macros;
mod api;
mod engine;
mod rules;

pub use api::{
    DEFAULT_TAG_KEY, SanitizeReport, sanitize, sanitize_slice, sanitize_verbose_with, sanitize_with,
};
pub use engine::{Directive, FieldTrace, FieldVisitor, RuleMask, Sanitizable, Walker};
pub use rules::{
    DomainOptions, alpha, alphanumeric, domain, html, html_escape, scripts, uri, url, url_strict,
    xml, xss,
};

// Used by the expansion of `sanitizable!`.
#[doc(hidden)]
pub use once_cell;

/// Errors surfaced by the sanitization engine.
///
/// Every variant is terminal to the current call: traversal stops at the
/// first hard error, and fields mutated before it keep their sanitized
/// values. Unrecognized directive tokens are *not* errors; the parser
/// ignores them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    /// The traversal root is not a mutable composite reference.
    #[error("root value is not a mutable composite reference")]
    NotAddressable,
    /// The traversal root declares zero fields.
    #[error("composite declares no fields")]
    EmptyStructure,
    /// A `domain`/`url` rule could not parse its input as a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
