#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Implements [`Sanitizable`](crate::Sanitizable) for a struct from a
/// declarative field list.
///
/// Fields are reported to the engine in the order they are listed, which
/// should match declaration order. Four field kinds exist:
///
/// - `string <name>` -- a string field, optionally tagged with a directive
///   (`=> "xss, alpha"`) or with per-namespace directives
///   (`=> { sanitize: "xss", audit: "html_escape" }`).
/// - `composite <name>` -- a nested `Sanitizable` value, recursed into.
/// - `optional <name>` -- an `Option` of a (possibly boxed) `Sanitizable`
///   value; skipped when `None`.
/// - `scalar <name>` -- any other field, inert to the engine.
///
/// Directive strings are parsed exactly once, into a lazily initialized
/// static per field.
///
/// ```rust
/// struct Profile {
///     handle: String,
///     karma: i64,
/// }
///
/// sanitor::sanitizable!(Profile {
///     string handle => "alphanumeric",
///     scalar karma,
/// });
///
/// let mut profile = Profile { handle: "bob<img>!".into(), karma: 7 };
/// sanitor::sanitize(&mut profile).unwrap();
/// assert_eq!(profile.handle, "bobimg");
/// ```
#[macro_export]
macro_rules! sanitizable {
    ($ty:ty { $($kind:ident $name:ident $(=> $tags:tt)?),* $(,)? }) => {
        impl $crate::Sanitizable for $ty {
            fn field_count(&self) -> usize {
                <[()]>::len(&[$($crate::sanitizable!(@unit $name)),*])
            }

            fn visit_fields(
                &mut self,
                _visitor: &mut dyn $crate::FieldVisitor,
            ) -> ::std::result::Result<(), $crate::SanitizeError> {
                $($crate::sanitizable!(@field self, _visitor, $kind $name $(=> $tags)?);)*
                ::std::result::Result::Ok(())
            }
        }
    };

    (@unit $name:ident) => {
        ()
    };

    (@field $self:ident, $visitor:ident, string $name:ident => $directive:literal) => {{
        static TAGS: $crate::once_cell::sync::Lazy<
            ::std::vec::Vec<(&'static str, $crate::Directive)>,
        > = $crate::once_cell::sync::Lazy::new(|| {
            vec![($crate::DEFAULT_TAG_KEY, $crate::Directive::parse($directive))]
        });
        $visitor.string_field(stringify!($name), &TAGS, &mut $self.$name)?;
    }};

    (@field $self:ident, $visitor:ident, string $name:ident => { $($key:ident : $dir:literal),+ $(,)? }) => {{
        static TAGS: $crate::once_cell::sync::Lazy<
            ::std::vec::Vec<(&'static str, $crate::Directive)>,
        > = $crate::once_cell::sync::Lazy::new(|| {
            vec![$((stringify!($key), $crate::Directive::parse($dir))),+]
        });
        $visitor.string_field(stringify!($name), &TAGS, &mut $self.$name)?;
    }};

    (@field $self:ident, $visitor:ident, string $name:ident) => {{
        $visitor.string_field(stringify!($name), &[], &mut $self.$name)?;
    }};

    (@field $self:ident, $visitor:ident, composite $name:ident) => {{
        $visitor.composite_field(stringify!($name), &mut $self.$name)?;
    }};

    (@field $self:ident, $visitor:ident, optional $name:ident) => {{
        $visitor.optional_field(
            stringify!($name),
            match $self.$name.as_mut() {
                ::std::option::Option::Some(inner) => {
                    ::std::option::Option::Some(inner as &mut dyn $crate::Sanitizable)
                }
                ::std::option::Option::None => ::std::option::Option::None,
            },
        )?;
    }};

    (@field $self:ident, $visitor:ident, scalar $name:ident) => {{
        $visitor.scalar_field(stringify!($name));
    }};
}
