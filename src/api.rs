use std::time::{Duration, Instant};

use crate::engine::{Directive, FieldTrace, Sanitizable, Walker};
use crate::SanitizeError;

/// Tag namespace read by [`sanitize`].
///
/// Fields registered with the short `=> "..."` form of
/// [`sanitizable!`](crate::sanitizable) carry their directive under this
/// key.
pub const DEFAULT_TAG_KEY: &str = "sanitize";

/// Result from [`sanitize_verbose_with`].
///
/// This is intentionally compact: one record per string field visited,
/// plus counters and timing. It is meant for debugging and audit output,
/// not for programmatic post-processing of the sanitized value.
#[derive(Debug, Clone)]
pub struct SanitizeReport {
    /// Fields visited across the whole traversal, of every kind.
    pub fields_visited: usize,
    /// String fields whose value changed.
    pub fields_changed: usize,
    /// Per-string-field before/after records, in visit order.
    pub traces: Vec<FieldTrace>,
    /// Total elapsed time for the traversal.
    pub elapsed: Duration,
}

/// Sanitize every tagged string field reachable from `root`, in place,
/// reading directives from the [`DEFAULT_TAG_KEY`] namespace.
///
/// # Example
/// ```
/// struct Login {
///     user: String,
///     attempts: u8,
/// }
///
/// sanitor::sanitizable!(Login {
///     string user => "alphanumeric",
///     scalar attempts,
/// });
///
/// let mut login = Login { user: "bob<script>x</script>!".into(), attempts: 1 };
/// sanitor::sanitize(&mut login).unwrap();
/// assert_eq!(login.user, "bobscriptxscript");
/// ```
pub fn sanitize(root: &mut dyn Sanitizable) -> Result<(), SanitizeError> {
    sanitize_with(DEFAULT_TAG_KEY, root)
}

/// Sanitize `root` in place, reading directives from the `tag_key`
/// namespace.
///
/// `tag_key` selects which metadata namespace of the registered field
/// tags to read, so unrelated annotation systems can coexist on the same
/// struct.
///
/// Fails with [`SanitizeError::NotAddressable`] when `root` is not a
/// composite and [`SanitizeError::EmptyStructure`] when it declares no
/// fields. The first hard error from a rule (an unparseable URL) aborts
/// the traversal; fields sanitized before it keep their new values, so
/// callers needing atomicity should sanitize a copy and swap it in on
/// success.
pub fn sanitize_with(tag_key: &str, root: &mut dyn Sanitizable) -> Result<(), SanitizeError> {
    Walker::new(tag_key).sanitize_root(root)
}

/// Like [`sanitize_with`], additionally returning a per-field trace
/// report.
///
/// The report never affects the result: the traversal is the same one
/// [`sanitize_with`] performs, with before/after values recorded along
/// the way.
pub fn sanitize_verbose_with(
    tag_key: &str,
    root: &mut dyn Sanitizable,
) -> Result<SanitizeReport, SanitizeError> {
    let started = Instant::now();
    let mut walker = Walker::with_trace(tag_key);
    walker.sanitize_root(root)?;

    Ok(SanitizeReport {
        fields_visited: walker.fields_visited(),
        fields_changed: walker.fields_changed(),
        traces: walker.take_traces(),
        elapsed: started.elapsed(),
    })
}

/// Apply one parsed directive to every element of a string slice, in
/// place.
pub fn sanitize_slice(values: &mut [String], directive: &Directive) -> Result<(), SanitizeError> {
    for value in values.iter_mut() {
        let sanitized = directive.apply(value)?;
        if sanitized != *value {
            *value = sanitized;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Address {
        street: String,
        city: String,
        state: String,
        zip: String,
    }

    sanitizable!(Address {
        string street => "html",
        string city => "html",
        string state => "html",
        string zip => "xss",
    });

    #[derive(Debug, Default)]
    struct Payload {
        first_name: String,
        last_name: String,
        age: u32,
        website: String,
        username: String,
        address: Address,
        billing: Option<Box<Address>>,
    }

    sanitizable!(Payload {
        string first_name => "xss",
        string last_name => "xss",
        scalar age,
        string website => "url",
        string username => "uri",
        composite address,
        optional billing,
    });

    fn payload() -> Payload {
        Payload {
            first_name: "First <script>doEvil()</script>Name".into(),
            last_name: "Last <embed width=\"50\" class=\"x\"></embed>Name".into(),
            age: 30,
            website: "https://domain.com".into(),
            username: "/This/Works/?that=123&this#page10%".into(),
            address: Address {
                street: "<b>221B Baker Street</b>".into(),
                city: "<CustomTags>London</CustomTags>".into(),
                state: String::new(),
                zip: "SW1W 0NY<script>$(\"#x\").hide()</script>".into(),
            },
            billing: None,
        }
    }

    #[test]
    fn sanitizes_example_payload_in_place() {
        let mut payload = payload();
        sanitize(&mut payload).unwrap();

        assert_eq!(payload.first_name, "First Name");
        assert_eq!(payload.last_name, "Last Name");
        assert_eq!(payload.age, 30);
        assert_eq!(payload.website, "https://domain.com");
        assert_eq!(payload.username, "/This/Works/?that=123&this#page10%");
        assert_eq!(payload.address.street, "221B Baker Street");
        assert_eq!(payload.address.city, "London");
        assert_eq!(payload.address.state, "");
        assert_eq!(payload.address.zip, "SW1W 0NY");
    }

    #[test]
    fn sanitizes_present_optional_composites() {
        let mut payload = payload();
        payload.billing = Some(Box::new(Address {
            street: "<i>42 Wallaby Way</i>".into(),
            ..Address::default()
        }));

        sanitize(&mut payload).unwrap();
        assert_eq!(payload.billing.as_deref().unwrap().street, "42 Wallaby Way");
    }

    #[test]
    fn end_to_end_scenarios() {
        #[derive(Debug, Default)]
        struct Snippets {
            markup: String,
            greeting: String,
            letters: String,
        }

        sanitizable!(Snippets {
            string markup => "html",
            string greeting => "xss",
            string letters => "alpha",
        });

        let mut snippets = Snippets {
            markup: "<b>Hi</b> there".into(),
            greeting: "First <script>doEvil()</script>Name".into(),
            letters: "abc123 def".into(),
        };

        sanitize(&mut snippets).unwrap();

        assert_eq!(snippets.markup, "Hi there");
        assert_eq!(snippets.greeting, "First Name");
        assert_eq!(snippets.letters, "abcdef");
    }

    #[test]
    fn non_composite_roots_are_rejected() {
        let mut string_root = String::from("text");
        assert_eq!(sanitize(&mut string_root), Err(SanitizeError::NotAddressable));

        let mut scalar_root = 7_u32;
        assert_eq!(sanitize(&mut scalar_root), Err(SanitizeError::NotAddressable));
    }

    #[test]
    fn empty_composites_are_rejected() {
        #[derive(Debug, Default)]
        struct Hollow {}

        sanitizable!(Hollow {});

        let mut root = Hollow::default();
        assert_eq!(sanitize(&mut root), Err(SanitizeError::EmptyStructure));
    }

    #[test]
    fn verbose_report_records_the_traversal() {
        let mut payload = payload();
        let report = sanitize_verbose_with(DEFAULT_TAG_KEY, &mut payload).unwrap();

        assert!(report.elapsed >= Duration::ZERO);
        // 7 root fields + 4 nested address fields.
        assert_eq!(report.fields_visited, 11);
        // state (already empty), website and username are no-ops; the
        // other five tagged strings change.
        assert_eq!(report.fields_changed, 5);

        let zip = report.traces.iter().find(|t| t.path == "address.zip").unwrap();
        assert_eq!(zip.rules, vec!["xss"]);
        assert_eq!(zip.before, "SW1W 0NY<script>$(\"#x\").hide()</script>");
        assert_eq!(zip.after, "SW1W 0NY");
    }

    #[test]
    fn sanitize_slice_applies_one_directive_to_every_element() {
        let mut values = vec![
            "<b>one</b>".to_string(),
            "two".to_string(),
            "<i>three</i> <script>x</script>".to_string(),
        ];

        sanitize_slice(&mut values, &Directive::parse("scripts, html")).unwrap();
        assert_eq!(values, vec!["one", "two", "three "]);
    }
}
