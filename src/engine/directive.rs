//! Directive tag parsing.
//!
//! A directive is the raw text attached to a string field, e.g.
//! `"xss, alpha"`. Parsing splits it on commas and whitespace, trims each
//! token, and matches the tokens case-sensitively against the registry's
//! keywords. Unknown tokens are dropped silently: an unrecognized keyword
//! is a no-op, not a configuration error, so old binaries keep working
//! when a schema grows tags they do not know yet.
//!
//! The result is a [`Directive`], a cheap `Copy` value-object. Token order
//! in the tag never matters; application order comes from the registry.

use super::registry::{self, RuleMask};
use crate::SanitizeError;

/// The parsed, ordered set of rule names attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    mask: RuleMask,
}

impl Directive {
    /// Parse raw tag text into a directive.
    ///
    /// Never fails: unknown tokens and empty tokens are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut mask = RuleMask::empty();
        for token in raw.split(|c: char| c == ',' || c.is_whitespace()) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if let Some(def) = registry::lookup(token) {
                mask |= def.mask;
            }
        }
        Directive { mask }
    }

    /// Build a directive directly from a [`RuleMask`].
    pub fn from_mask(mask: RuleMask) -> Self {
        Directive { mask }
    }

    /// True when no recognized rule was selected.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Keywords of the selected rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        registry::names(self.mask)
    }

    /// Apply the selected rules to `input`, in application order.
    pub fn apply(&self, input: &str) -> Result<String, SanitizeError> {
        registry::apply(self.mask, input)
    }
}
