//! Generic struct traversal.
//!
//! This module is the operational core of the engine: a depth-first walk
//! over a composite value that rewrites tagged string fields in place.
//!
//! Per field of the current composite, in declaration order:
//!
//! 1. **Optional field**: absent is skipped; present is dereferenced and
//!    recursed into as a nested composite.
//! 2. **Composite field**: recursed into directly. Nested composites carry
//!    no directive of their own; only their string leaves do.
//! 3. **String field**: the directive registered under the walker's tag
//!    key is applied and the result written back. No directive, or a
//!    directive with no recognized rule, leaves the field untouched.
//! 4. **Any other scalar**: inert. Traversal continues with the next
//!    field.
//!
//! Recursion is well-founded: every recursive call descends into a field
//! of the parent, so tree-shaped composites terminate structurally. The
//! walker never follows back-references; shared/cyclic graphs are out of
//! scope.
//!
//! The walk performs no I/O. The only observable side effect is the
//! in-place mutation of string fields, plus `tracing` events and, for
//! verbose runs, a [`FieldTrace`] per string field visited.

use tracing::trace;

use super::directive::Directive;
use crate::SanitizeError;

/// A composite value whose string fields can be sanitized in place.
///
/// Implementations are normally generated by
/// [`sanitizable!`](crate::sanitizable); hand-written impls only need to
/// report every field, in declaration order, to the visitor.
pub trait Sanitizable {
    /// Number of declared fields.
    fn field_count(&self) -> usize;

    /// Walk every field in declaration order, reporting each to `visitor`.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor)
    -> Result<(), SanitizeError>;

    /// Whether this value is a composite. Leaf impls return `false` so
    /// the engine can reject them as traversal roots.
    fn composite(&self) -> bool {
        true
    }
}

impl<T: Sanitizable + ?Sized> Sanitizable for Box<T> {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn visit_fields(
        &mut self,
        visitor: &mut dyn FieldVisitor,
    ) -> Result<(), SanitizeError> {
        (**self).visit_fields(visitor)
    }

    fn composite(&self) -> bool {
        (**self).composite()
    }
}

// Leaf impls exist so that passing a bare scalar as the traversal root is
// rejected with `NotAddressable` instead of silently doing nothing.
macro_rules! leaf_sanitizable {
    ($($ty:ty),* $(,)?) => {
        $(impl Sanitizable for $ty {
            fn field_count(&self) -> usize {
                0
            }

            fn visit_fields(
                &mut self,
                _visitor: &mut dyn FieldVisitor,
            ) -> Result<(), SanitizeError> {
                Err(SanitizeError::NotAddressable)
            }

            fn composite(&self) -> bool {
                false
            }
        })*
    };
}

leaf_sanitizable!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Receives one callback per field of a composite, in declaration order.
///
/// [`Walker`] is the engine's implementation; custom visitors can reuse
/// the same registration macro for other field-driven passes.
pub trait FieldVisitor {
    /// A string field, with its per-namespace directive tags.
    fn string_field(
        &mut self,
        name: &'static str,
        tags: &[(&'static str, Directive)],
        value: &mut String,
    ) -> Result<(), SanitizeError>;

    /// A nested composite field.
    fn composite_field(
        &mut self,
        name: &'static str,
        value: &mut dyn Sanitizable,
    ) -> Result<(), SanitizeError>;

    /// An optional/indirect composite field; `None` when absent.
    fn optional_field(
        &mut self,
        name: &'static str,
        value: Option<&mut dyn Sanitizable>,
    ) -> Result<(), SanitizeError>;

    /// Any other scalar field. Inert to the engine.
    fn scalar_field(&mut self, name: &'static str);
}

/// One string field's before/after record, collected in verbose runs.
#[derive(Debug, Clone)]
pub struct FieldTrace {
    /// Dotted path from the root, e.g. `"address.city"`.
    pub path: String,
    /// Keywords of the rules that were applied, in application order.
    /// Empty when the field carried no directive under the tag key.
    pub rules: Vec<&'static str>,
    /// Field value before sanitization.
    pub before: String,
    /// Field value after sanitization.
    pub after: String,
}

/// Depth-first traversal over a [`Sanitizable`] composite.
pub struct Walker<'a> {
    tag_key: &'a str,
    path: Vec<&'static str>,
    fields_visited: usize,
    fields_changed: usize,
    traces: Option<Vec<FieldTrace>>,
}

impl<'a> Walker<'a> {
    /// A walker reading directives from the `tag_key` namespace.
    pub fn new(tag_key: &'a str) -> Self {
        Walker { tag_key, path: Vec::new(), fields_visited: 0, fields_changed: 0, traces: None }
    }

    /// Like [`Walker::new`], but additionally records a [`FieldTrace`] per
    /// string field visited.
    pub fn with_trace(tag_key: &'a str) -> Self {
        Walker { traces: Some(Vec::new()), ..Walker::new(tag_key) }
    }

    /// Validate `root` and traverse it, sanitizing in place.
    ///
    /// The first hard error aborts the traversal. Sanitization is not
    /// transactional: fields mutated before the error keep their
    /// sanitized values.
    pub fn sanitize_root(&mut self, root: &mut dyn Sanitizable) -> Result<(), SanitizeError> {
        if !root.composite() {
            return Err(SanitizeError::NotAddressable);
        }
        if root.field_count() == 0 {
            return Err(SanitizeError::EmptyStructure);
        }
        root.visit_fields(self)
    }

    /// Fields visited so far, of every kind.
    pub fn fields_visited(&self) -> usize {
        self.fields_visited
    }

    /// String fields whose value changed so far.
    pub fn fields_changed(&self) -> usize {
        self.fields_changed
    }

    /// Drain the collected traces. Empty unless built with
    /// [`Walker::with_trace`].
    pub fn take_traces(&mut self) -> Vec<FieldTrace> {
        self.traces.take().unwrap_or_default()
    }

    fn field_path(&self, name: &'static str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path.join("."), name)
        }
    }
}

impl FieldVisitor for Walker<'_> {
    fn string_field(
        &mut self,
        name: &'static str,
        tags: &[(&'static str, Directive)],
        value: &mut String,
    ) -> Result<(), SanitizeError> {
        self.fields_visited += 1;

        let directive = tags.iter().find(|(key, _)| *key == self.tag_key).map(|(_, d)| *d);
        let directive = match directive {
            Some(directive) if !directive.is_empty() => directive,
            _ => {
                trace!(field = %self.field_path(name), "no directive, left untouched");
                let path = self.field_path(name);
                if let Some(traces) = &mut self.traces {
                    traces.push(FieldTrace {
                        path,
                        rules: Vec::new(),
                        before: value.clone(),
                        after: value.clone(),
                    });
                }
                return Ok(());
            }
        };

        let before = value.clone();
        let after = directive.apply(&before)?;

        trace!(
            field = %self.field_path(name),
            rules = ?directive.rule_names(),
            changed = after != before,
            "sanitized string field"
        );

        let path = self.field_path(name);
        if let Some(traces) = &mut self.traces {
            traces.push(FieldTrace {
                path,
                rules: directive.rule_names(),
                before: before.clone(),
                after: after.clone(),
            });
        }

        if after != before {
            self.fields_changed += 1;
            *value = after;
        }
        Ok(())
    }

    fn composite_field(
        &mut self,
        name: &'static str,
        value: &mut dyn Sanitizable,
    ) -> Result<(), SanitizeError> {
        self.fields_visited += 1;
        self.path.push(name);
        let result = value.visit_fields(self);
        self.path.pop();
        result
    }

    fn optional_field(
        &mut self,
        name: &'static str,
        value: Option<&mut dyn Sanitizable>,
    ) -> Result<(), SanitizeError> {
        self.fields_visited += 1;
        match value {
            Some(inner) => {
                self.path.push(name);
                let result = inner.visit_fields(self);
                self.path.pop();
                result
            }
            None => {
                trace!(field = %self.field_path(name), "absent optional field, skipped");
                Ok(())
            }
        }
    }

    fn scalar_field(&mut self, name: &'static str) {
        self.fields_visited += 1;
        trace!(field = %self.field_path(name), "non-string scalar field, inert");
    }
}
