//! Directive parsing and the sanitization engine.
//!
//! This module is the *entry point* for the declarative side of the crate:
//! given a composite value whose fields were registered with
//! [`sanitizable!`](crate::sanitizable), the engine walks the value and
//! rewrites every tagged string field in place.
//!
//! ## How the parts work together
//!
//! At a high level, sanitizing a root value is a pipeline:
//!
//! ```text
//! root ── Walker::sanitize_root ── validate (composite? non-empty?)
//!                │
//!                v
//!        visit_fields (declaration order, depth-first)
//!                │
//!                ├─ optional field: absent -> skip, present -> recurse
//!                ├─ composite field: recurse
//!                ├─ scalar field: inert
//!                └─ string field
//!                       │
//!                       v
//!             select Directive by tag key     (directive.rs)
//!                       │
//!                       v
//!             registry::apply, fixed order    (registry.rs)
//!                       │
//!                       v
//!             write the result back in place
//! ```
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: the static rule catalogue (`RuleMask` bit + keyword +
//!   applier per rule) and the fixed application order.
//! - `directive.rs`: parses raw tag text into a [`Directive`]; unknown
//!   tokens are ignored rather than rejected.
//! - `walker.rs`: the [`Sanitizable`]/[`FieldVisitor`] traits and the
//!   depth-first [`Walker`], including the verbose per-field trace.
//!
//! ## Invariants
//!
//! - The registry is read-only after first use; concurrent `sanitize`
//!   calls on *distinct* roots are safe. A single root must not be
//!   sanitized from two calls at once (the `&mut` receiver enforces this).
//! - A string field is only written back when its directive selects at
//!   least one recognized rule.
//! - Application order is the registry's, never the tag's: `"xss, alpha"`
//!   and `"alpha, xss"` sanitize identically.

#[path = "engine/directive.rs"]
pub(crate) mod directive;
#[path = "engine/registry.rs"]
pub(crate) mod registry;
#[path = "engine/walker.rs"]
pub(crate) mod walker;

pub use directive::Directive;
pub use registry::RuleMask;
pub use walker::{FieldTrace, FieldVisitor, Sanitizable, Walker};
