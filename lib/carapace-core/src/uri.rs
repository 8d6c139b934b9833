//! URI construction.
//!
//! Templates use ordinal placeholders: `%1$s`, `%2$s`, … refer to the fragment
//! field declared at that position, a bare `%s` takes the next sequential
//! position, and `%%` is a literal percent sign.
//!
//! ```
//! use carapace_core::{UriTemplate, build_base_uri};
//!
//! let template = UriTemplate::parse("/posts/%1$s/comments/%2$s").unwrap();
//! let path = template.render(&["12", "7"]).unwrap();
//! assert_eq!(path, "/posts/12/comments/7");
//!
//! let uri = build_base_uri(Some("https://api.example.com/"), &path).unwrap();
//! assert_eq!(uri, "https://api.example.com/posts/12/comments/7");
//! ```

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{FieldValue, RpcObject, UriError, fragment_fields};

/// Everything except RFC 3986 unreserved characters is escaped.
const FRAGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Schemes that mark a template as absolute.
const ABSOLUTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Percent-encode (UTF-8) a value for substitution into a URI path.
#[must_use]
pub fn encode_fragment(value: &str) -> String {
    utf8_percent_encode(value, FRAGMENT_ENCODE_SET).to_string()
}

/// Returns `true` if the template already carries a scheme.
#[must_use]
pub fn is_absolute(template: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| {
        template
            .get(..scheme.len())
            .is_some_and(|start| start.eq_ignore_ascii_case(scheme))
    })
}

/// Join the URI prefix and a template.
///
/// Absolute templates are returned verbatim. Otherwise exactly one `/` ends up
/// between the prefix and the template, whatever slashes either side carries.
///
/// # Errors
///
/// Returns [`UriError::MissingUriPrefix`] for a relative template without prefix.
pub fn build_base_uri(prefix: Option<&str>, template: &str) -> Result<String, UriError> {
    if is_absolute(template) {
        return Ok(template.to_string());
    }

    let prefix = prefix.ok_or_else(|| UriError::MissingUriPrefix {
        template: template.to_string(),
    })?;

    Ok(format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        template.trim_start_matches('/')
    ))
}

/// Substitute the URI fragment fields of `object` into `template`.
///
/// Types without fragment fields get the template back unchanged.
///
/// # Errors
///
/// - [`UriError::DuplicatePosition`] / [`UriError::MissingPositionalArgument`]
///   if the fragment positions are not exactly `1..=N`
/// - [`UriError::UnsupportedFragmentType`] for a null or non-scalar value
/// - [`UriError::MalformedTemplate`] / [`UriError::UnresolvedPlaceholder`]
///   if the template does not match the fragments
pub fn resolve_fragments(object: &dyn RpcObject, template: &str) -> Result<String, UriError> {
    let fields = fragment_fields(object.fields(), object.type_name())?;
    if fields.is_empty() {
        return Ok(template.to_string());
    }

    let args = fields
        .iter()
        .map(|field| {
            let unsupported = || UriError::UnsupportedFragmentType {
                field: field.name,
                type_name: field.type_name,
            };
            match object.field_value(field.name).ok_or_else(unsupported)? {
                FieldValue::Str(value) => Ok(encode_fragment(&value)),
                FieldValue::Char(value) => Ok(encode_fragment(value.encode_utf8(&mut [0; 4]))),
                value => value
                    .canonical()
                    .map(std::borrow::Cow::into_owned)
                    .ok_or_else(unsupported),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    UriTemplate::parse(template)?.render(&args)
}

// ============================================================================
// Template
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(usize),
}

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate<'t> {
    source: &'t str,
    segments: Vec<Segment>,
}

impl<'t> UriTemplate<'t> {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::MalformedTemplate`] for a `%` that does not start
    /// `%s`, `%N$s` (with `N >= 1`) or `%%`.
    pub fn parse(source: &'t str) -> Result<Self, UriError> {
        let malformed = |reason: String| UriError::MalformedTemplate {
            template: source.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut sequential = 0;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let position = match chars.next() {
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('s') => {
                    sequential += 1;
                    sequential
                }
                Some(first) if first.is_ascii_digit() => {
                    let mut digits = String::from(first);
                    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                        digits.push(digit);
                    }
                    if chars.next() != Some('$') || chars.next() != Some('s') {
                        return Err(malformed(format!("expected `$s` after `%{digits}`")));
                    }
                    match digits.parse::<usize>() {
                        Ok(0) => return Err(malformed("positions start at 1".to_string())),
                        Ok(position) => position,
                        Err(err) => return Err(malformed(format!("invalid position: {err}"))),
                    }
                }
                Some(other) => {
                    return Err(malformed(format!("unsupported conversion `%{other}`")));
                }
                None => return Err(malformed("dangling `%`".to_string())),
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(position));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source, segments })
    }

    /// The template as declared.
    #[must_use]
    pub const fn as_str(&self) -> &'t str {
        self.source
    }

    /// Positions referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(position) => Some(*position),
            Segment::Literal(_) => None,
        })
    }

    /// Render the template, `args[0]` filling position 1.
    ///
    /// Arguments are inserted as given; encode them first.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::UnresolvedPlaceholder`] if a position has no argument.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> Result<String, UriError> {
        let mut result = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Placeholder(position) => {
                    let arg = position
                        .checked_sub(1)
                        .and_then(|index| args.get(index))
                        .ok_or_else(|| UriError::UnresolvedPlaceholder {
                            position: *position,
                            template: self.source.to_string(),
                        })?;
                    result.push_str(arg.as_ref());
                }
            }
        }
        Ok(result)
    }
}

impl std::fmt::Display for UriTemplate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source)
    }
}
