use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::error::TemplateError;
use super::segment::{Segment, MULTI_WILDCARD, SINGLE_WILDCARD};
use super::values::Values;

/// Path components kept inline before spilling to the heap.
pub const MAX_INLINE_COMPONENTS: usize = 16;

/// A request path split into its `/`-separated components.
pub type PathComponents<'a> = SmallVec<[&'a str; MAX_INLINE_COMPONENTS]>;

/// Split a request path into components for matching.
///
/// Leading and trailing slashes are trimmed before splitting, so `/`, `""`
/// and `//` all yield a single empty component (which the root template
/// matches). Inner empty components (`/a//b`) are kept. No percent-decoding
/// is applied.
#[must_use]
pub fn split_request_path(path: &str) -> PathComponents<'_> {
    path.trim_matches('/').split('/').collect()
}

/// A compiled path template.
///
/// Holds the head of the segment chain built from a template such as
/// `/v1/{name=shelves/*/books/*}`. Compiling the same string always yields
/// a structurally identical chain, and matching never mutates it.
///
/// # Grammar
///
/// ```text
/// Template  = "/" Segments [ Verb ] ;
/// Segments  = Segment { "/" Segment } ;
/// Segment   = "*" | "**" | LITERAL | Variable ;
/// Variable  = "{" FieldPath [ "=" Segments ] "}" ;
/// FieldPath = IDENT { "." IDENT } ;
/// Verb      = ":" LITERAL ;
/// ```
///
/// A `:verb` suffix is accepted as part of the last literal and matched
/// verbatim.
///
/// # Example
///
/// ```
/// use protorest::template::Path;
///
/// let path = Path::compile("/v1/articles/{value=data/*}").unwrap();
/// let values = path.matches("/v1/articles/data/12345").unwrap();
/// assert_eq!(values.get("value"), Some("data/12345"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    head: Segment,
}

impl Path {
    /// Compile a template string into a segment chain.
    ///
    /// The template is normalized first: surrounding whitespace and `/` are
    /// trimmed and it is lowercased (matching is case-insensitive, so captured
    /// field names are lowercase too). Whitespace left inside the template is
    /// rejected as part of a segment.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::InvalidSegmentFormat`] for a segment that is not a
    ///   literal, `{field}` or `{field=value}`
    /// - [`TemplateError::InvalidFieldValueFormat`] for `{field=/}`-style
    ///   variables with nothing to match
    /// - [`TemplateError::MultiWildcardNotLast`] when `**` is followed by more
    ///   segments
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let normalized = template.trim().trim_matches('/').to_lowercase();

        let mut nodes: Vec<Segment> = Vec::new();
        for raw in tokenize(&normalized) {
            compile_segment(raw, &mut nodes).map_err(|e| e.with_template(template))?;
        }

        if let Some(pos) = nodes.iter().position(|s| s.value() == MULTI_WILDCARD) {
            if pos + 1 != nodes.len() {
                return Err(TemplateError::MultiWildcardNotLast {
                    template: template.to_string(),
                });
            }
        }

        // Link back to front so every node owns its successor.
        let mut nodes = nodes.into_iter().rev();
        let mut head = nodes.next().unwrap_or_else(Segment::root);
        for mut node in nodes {
            node.set_next(head);
            head = node;
        }

        Ok(Self { head })
    }

    /// First node of the chain
    #[must_use]
    pub fn head(&self) -> &Segment {
        &self.head
    }

    /// Iterate the chain from head to tail
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            next: Some(&self.head),
        }
    }

    /// Number of nodes in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Always `false`: even the root template compiles to one node
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Match already-split request path components, recording captures in `values`
    #[must_use]
    pub fn matches_segments(&self, path: &[&str], values: &mut Values) -> bool {
        self.head.matches(path, values)
    }

    /// Match a raw request path, returning the captured values on success
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Values> {
        let components = split_request_path(path);
        let mut values = Values::new();
        self.matches_segments(&components, &mut values).then_some(values)
    }
}

impl FromStr for Path {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::compile(s)
    }
}

/// Renders the normalized template, folding composite nodes back into
/// `{field=...}` variables.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = Some(&self.head);

        while let Some(seg) = node {
            f.write_str("/")?;

            let Some(field) = seg.field() else {
                f.write_str(seg.value())?;
                node = seg.next();
                continue;
            };

            let mut parts = vec![seg.value()];
            let mut cur = seg.next();
            while let Some(n) = cur {
                if n.is_composite() && n.field() == Some(field) {
                    parts.push(n.value());
                    cur = n.next();
                } else {
                    break;
                }
            }

            if parts == [SINGLE_WILDCARD] {
                write!(f, "{{{field}}}")?;
            } else {
                write!(f, "{{{field}={}}}", parts.join("/"))?;
            }
            node = cur;
        }

        Ok(())
    }
}

/// Iterator over the nodes of a compiled chain
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    next: Option<&'a Segment>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next();
        Some(current)
    }
}

/// Split a normalized template on `/`, except inside `{...}`.
///
/// Always yields at least one (possibly empty) segment.
fn tokenize(template: &str) -> Vec<&str> {
    let mut segments = Vec::with_capacity(template.matches('/').count() + 1);
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in template.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&template[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&template[start..]);

    segments
}

/// Shape of one raw template segment
#[derive(Debug, PartialEq, Eq)]
enum RawSegment<'a> {
    /// `{field=value}`
    FieldValue { field: &'a str, value: &'a str },
    /// `{field}`
    Field(&'a str),
    /// `v1`, `*`, `**`, `items:batchGet`
    Literal(&'a str),
}

fn classify(raw: &str) -> Option<RawSegment<'_>> {
    if raw.chars().any(char::is_whitespace) {
        return None;
    }

    if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        if inner.is_empty() {
            return None;
        }
        // The field name is at least one character, so an `=` in first
        // position belongs to the name.
        let eq = inner
            .char_indices()
            .skip(1)
            .find_map(|(i, c)| (c == '=').then_some(i));
        let (field, value) = match eq {
            Some(i) if i + 1 < inner.len() => (&inner[..i], Some(&inner[i + 1..])),
            _ => (inner, None),
        };
        // Nested braces can carry a `/` past the tokenizer; a field name
        // never holds either.
        if field.contains(['{', '}', '/']) {
            return None;
        }
        return Some(match value {
            Some(value) => RawSegment::FieldValue { field, value },
            None => RawSegment::Field(field),
        });
    }

    if raw.contains(['{', '}']) {
        return None;
    }
    Some(RawSegment::Literal(raw))
}

/// Compile one raw segment into one or more chain nodes appended to `nodes`.
///
/// Errors carry an empty template; [`Path::compile`] fills it in.
fn compile_segment(raw: &str, nodes: &mut Vec<Segment>) -> Result<(), TemplateError> {
    if raw.is_empty() {
        nodes.push(Segment::root());
        return Ok(());
    }

    match classify(raw) {
        Some(RawSegment::FieldValue { field, value }) => {
            let trimmed = value.trim_matches('/');
            if trimmed.is_empty() {
                return Err(TemplateError::InvalidFieldValueFormat {
                    template: String::new(),
                    value: value.to_string(),
                });
            }
            let field: Arc<str> = Arc::from(field);
            for (i, part) in trimmed.split('/').enumerate() {
                nodes.push(Segment::new(part, Some(Arc::clone(&field)), i > 0));
            }
        }
        Some(RawSegment::Field(field)) => {
            nodes.push(Segment::new(SINGLE_WILDCARD, Some(Arc::from(field)), false));
        }
        Some(RawSegment::Literal(literal)) => {
            nodes.push(Segment::new(literal, None, false));
        }
        None => {
            return Err(TemplateError::InvalidSegmentFormat {
                template: String::new(),
                segment: raw.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod scanner_tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_variables_whole() {
        assert_eq!(tokenize(""), vec![""]);
        assert_eq!(tokenize("v1/articles"), vec!["v1", "articles"]);
        assert_eq!(
            tokenize("v1/{value=data/*}/x"),
            vec!["v1", "{value=data/*}", "x"]
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("v1"), Some(RawSegment::Literal("v1")));
        assert_eq!(classify("**"), Some(RawSegment::Literal("**")));
        assert_eq!(
            classify("books:batchget"),
            Some(RawSegment::Literal("books:batchget"))
        );
        assert_eq!(classify("{name}"), Some(RawSegment::Field("name")));
        assert_eq!(
            classify("{book.name}"),
            Some(RawSegment::Field("book.name"))
        );
        assert_eq!(
            classify("{name=shelves/*}"),
            Some(RawSegment::FieldValue {
                field: "name",
                value: "shelves/*"
            })
        );
        assert_eq!(classify(" "), None);
        assert_eq!(classify("{}"), None);
        assert_eq!(classify("{name"), None);
        assert_eq!(classify("name}"), None);
        assert_eq!(classify("{na me}"), None);
        assert_eq!(classify("a{b}"), None);
    }

    #[test]
    fn test_classify_rejects_nested_braces_in_field() {
        assert_eq!(tokenize("v1/{a{b}/c}"), vec!["v1", "{a{b}/c}"]);
        assert_eq!(classify("{a{b}/c}"), None);
        assert_eq!(classify("{a{b}}"), None);
        assert_eq!(classify("{a/b=c}"), None);
    }
}
