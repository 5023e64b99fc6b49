use std::fmt;
use std::sync::Arc;

use super::values::Values;

/// Matches exactly one path component.
pub const SINGLE_WILDCARD: &str = "*";
/// Matches every remaining path component.
pub const MULTI_WILDCARD: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    Literal,
    SingleWildcard,
    MultiWildcard,
}

/// One node of a compiled template chain.
///
/// A chain is singly linked: every node owns its successor, and the head is
/// owned by [`Path`](super::Path). Chains are built once by the compiler and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Literal to match, or `*` / `**`
    value: String,
    /// Variable this node contributes to, if any
    field: Option<Arc<str>>,
    /// Continuation of a multi-component `{field=...}` value; appended, not overwritten
    composite: bool,
    next: Option<Box<Segment>>,
}

impl Segment {
    pub(crate) fn new(value: impl Into<String>, field: Option<Arc<str>>, composite: bool) -> Self {
        Self {
            value: value.into(),
            field,
            composite,
            next: None,
        }
    }

    /// Neutral node produced for the root template `/`
    pub(crate) fn root() -> Self {
        Self::new(String::new(), None, false)
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    #[must_use]
    pub fn next(&self) -> Option<&Segment> {
        self.next.as_deref()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    pub(crate) fn set_next(&mut self, next: Segment) {
        self.next = Some(Box::new(next));
    }

    fn kind(&self) -> SegmentKind {
        match self.value.as_str() {
            MULTI_WILDCARD => SegmentKind::MultiWildcard,
            SINGLE_WILDCARD => SegmentKind::SingleWildcard,
            _ => SegmentKind::Literal,
        }
    }

    #[inline]
    fn capture(&self, component: &str, values: &mut Values) {
        if let Some(field) = &self.field {
            values.record(field, component, self.composite);
        }
    }

    /// Match the remaining request path components starting at this node.
    ///
    /// `path` holds the request path split on `/` with surrounding slashes
    /// trimmed. Captures are written into `values` as nodes match; on a
    /// `false` result `values` may hold partial captures and should be
    /// discarded.
    ///
    /// - `**` always matches and absorbs everything left.
    /// - A terminal `*` matches zero or one remaining component.
    /// - A non-terminal `*` consumes one component if there is one, otherwise
    ///   it is skipped and matching continues with the next node.
    /// - A literal must equal the next component (case-insensitively); a
    ///   terminal literal must also be the final component.
    #[must_use]
    pub fn matches(&self, path: &[&str], values: &mut Values) -> bool {
        let mut node = self;
        let mut rest = path;

        loop {
            match node.kind() {
                SegmentKind::MultiWildcard => {
                    node.capture_all(rest, values);
                    return true;
                }
                SegmentKind::SingleWildcard => match node.next.as_deref() {
                    None => {
                        return match rest {
                            [] => true,
                            [component] => {
                                node.capture(component, values);
                                true
                            }
                            _ => false,
                        };
                    }
                    Some(next) => {
                        if let Some((component, tail)) = rest.split_first() {
                            node.capture(component, values);
                            rest = tail;
                        }
                        node = next;
                    }
                },
                SegmentKind::Literal => {
                    let Some((component, tail)) = rest.split_first() else {
                        return false;
                    };
                    if !eq_fold(&node.value, component) {
                        return false;
                    }
                    node.capture(component, values);
                    match node.next.as_deref() {
                        None => return tail.is_empty(),
                        Some(next) => {
                            node = next;
                            rest = tail;
                        }
                    }
                }
            }
        }
    }

    fn capture_all(&self, rest: &[&str], values: &mut Values) {
        let Some(field) = &self.field else {
            return;
        };
        match rest {
            [] => {}
            [component] => values.record(field, component, self.composite),
            _ => values.record(field, &rest.join("/"), self.composite),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str("<root>")?;
        } else {
            f.write_str(&self.value)?;
        }
        match (&self.field, self.composite) {
            (Some(field), false) => write!(f, " -> {field}"),
            (Some(field), true) => write!(f, " -> {field} (+)"),
            (None, _) => Ok(()),
        }
    }
}

/// Case-insensitive comparison without allocating.
fn eq_fold(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
