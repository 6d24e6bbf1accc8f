//! Rule registration and fixed-order application.
//!
//! This module holds the *static* side of the engine: the catalogue of
//! recognized rules and the one canonical order they are applied in.
//!
//! Structural stripping (markup, script blocks) runs before character-class
//! whitelisting, which would otherwise re-process text the earlier rules
//! already removed; `xss` runs last as a final pass over whatever the other
//! rules left behind. The order lives here, not in the directive: a parsed
//! directive is a plain bitmask, and [`apply`] walks [`REGISTRY`] front to
//! back.
//!
//! ## Extension points
//!
//! Adding a rule:
//! 1. Add a `RuleMask` bit.
//! 2. Add the primitive under `src/rules/`.
//! 3. Insert a `RuleDef` into [`REGISTRY`] at the right position in the
//!    application order.
//!
//! ## Invariants
//!
//! - `REGISTRY` keywords are unique and matched case-sensitively.
//! - Every `RuleMask` bit appears in exactly one `RuleDef`.
//! - `REGISTRY` is never mutated after initialization; it is safe to read
//!   from any number of threads.

use crate::{SanitizeError, rules};

bitflags::bitflags! {
    /// The parsed form of a directive: one bit per recognized rule.
    ///
    /// Application order is not stored here; it is supplied by the
    /// registry. That is what makes a plain bitmask a faithful
    /// representation of an "ordered set" of rules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleMask: u16 {
        const HTML         = 1 << 0;
        const XML          = 1 << 1;
        const HTML_ESCAPE  = 1 << 2;
        const SCRIPTS      = 1 << 3;
        const DOMAIN       = 1 << 4;
        const URL          = 1 << 5;
        const URI          = 1 << 6;
        const ALPHA        = 1 << 7;
        const ALPHANUMERIC = 1 << 8;
        const XSS          = 1 << 9;
    }
}

/// A registered rule: directive keyword, mask bit, and applier.
pub(crate) struct RuleDef {
    pub name: &'static str,
    pub mask: RuleMask,
    pub apply: fn(&str) -> Result<String, SanitizeError>,
}

/// The rule catalogue, in application order.
pub(crate) static REGISTRY: &[RuleDef] = &[
    RuleDef { name: "html", mask: RuleMask::HTML, apply: apply_html },
    RuleDef { name: "xml", mask: RuleMask::XML, apply: apply_xml },
    RuleDef { name: "html_escape", mask: RuleMask::HTML_ESCAPE, apply: apply_html_escape },
    RuleDef { name: "scripts", mask: RuleMask::SCRIPTS, apply: apply_scripts },
    RuleDef { name: "domain", mask: RuleMask::DOMAIN, apply: apply_domain },
    RuleDef { name: "url", mask: RuleMask::URL, apply: apply_url },
    RuleDef { name: "uri", mask: RuleMask::URI, apply: apply_uri },
    RuleDef { name: "alpha", mask: RuleMask::ALPHA, apply: apply_alpha },
    RuleDef { name: "alphanumeric", mask: RuleMask::ALPHANUMERIC, apply: apply_alphanumeric },
    RuleDef { name: "xss", mask: RuleMask::XSS, apply: apply_xss },
];

fn apply_html(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::html(input))
}

fn apply_xml(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::xml(input))
}

fn apply_html_escape(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::html_escape(input))
}

fn apply_scripts(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::scripts(input))
}

fn apply_domain(input: &str) -> Result<String, SanitizeError> {
    rules::domain(input, rules::DomainOptions::default())
}

fn apply_url(input: &str) -> Result<String, SanitizeError> {
    rules::url_strict(input)
}

fn apply_uri(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::uri(input))
}

fn apply_alpha(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::alpha(input, false))
}

fn apply_alphanumeric(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::alphanumeric(input, false))
}

fn apply_xss(input: &str) -> Result<String, SanitizeError> {
    Ok(rules::xss(input))
}

/// Look a directive token up by its keyword. Case-sensitive.
pub(crate) fn lookup(token: &str) -> Option<&'static RuleDef> {
    REGISTRY.iter().find(|def| def.name == token)
}

/// Apply every rule selected by `mask` to `input`, in registry order.
pub(crate) fn apply(mask: RuleMask, input: &str) -> Result<String, SanitizeError> {
    let mut value = input.to_owned();
    for def in REGISTRY {
        if mask.contains(def.mask) {
            value = (def.apply)(&value)?;
        }
    }
    Ok(value)
}

/// Keywords of the rules selected by `mask`, in application order.
pub(crate) fn names(mask: RuleMask) -> Vec<&'static str> {
    REGISTRY.iter().filter(|def| mask.contains(def.mask)).map(|def| def.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for def in REGISTRY {
            assert!(seen.insert(def.name), "duplicate rule keyword: {}", def.name);
        }
    }

    #[test]
    fn every_mask_bit_is_registered() {
        let mut union = RuleMask::empty();
        for def in REGISTRY {
            assert!(!def.mask.is_empty());
            assert!(!union.intersects(def.mask), "mask bit registered twice: {}", def.name);
            union |= def.mask;
        }
        assert_eq!(union, RuleMask::all());
    }

    #[test]
    fn structural_rules_precede_character_classes() {
        let position =
            |name: &str| REGISTRY.iter().position(|def| def.name == name).expect(name);

        assert!(position("html") < position("alpha"));
        assert!(position("scripts") < position("alphanumeric"));
        assert_eq!(position("xss"), REGISTRY.len() - 1);
    }

    #[test]
    fn apply_follows_registry_order_not_mask_construction_order() {
        // scripts must strip the block before alpha whitelists what is left.
        let mask = RuleMask::ALPHA | RuleMask::SCRIPTS;
        let out = apply(mask, "ab<script>1+1</script> cd3").unwrap();
        assert_eq!(out, "abcd");
    }

    #[test]
    fn names_reports_application_order() {
        let mask = RuleMask::XSS | RuleMask::HTML | RuleMask::ALPHA;
        assert_eq!(names(mask), vec!["html", "alpha", "xss"]);
    }
}
