use std::fmt;

/// Template compilation error
///
/// Returned by [`Path::compile`](super::Path::compile) when a template string
/// does not follow the `google.api.http` path grammar. Matching never
/// produces these; an unmatched request path is simply `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A raw segment is none of `{field=value}`, `{field}` or a literal
    ///
    /// Raised for stray braces, empty variables and embedded whitespace.
    InvalidSegmentFormat {
        /// The template being compiled
        template: String,
        /// The offending raw segment
        segment: String,
    },
    /// The value part of a `{field=value}` variable is empty once slashes are trimmed
    InvalidFieldValueFormat {
        /// The template being compiled
        template: String,
        /// The raw value part (e.g. `/`)
        value: String,
    },
    /// A `**` wildcard is followed by further segments, which could never match
    MultiWildcardNotLast {
        /// The template being compiled
        template: String,
    },
}

impl TemplateError {
    /// The template string the error was raised for
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            TemplateError::InvalidSegmentFormat { template, .. }
            | TemplateError::InvalidFieldValueFormat { template, .. }
            | TemplateError::MultiWildcardNotLast { template } => template,
        }
    }

    pub(crate) fn with_template(self, template: &str) -> Self {
        match self {
            TemplateError::InvalidSegmentFormat { segment, .. } => {
                TemplateError::InvalidSegmentFormat {
                    template: template.to_string(),
                    segment,
                }
            }
            TemplateError::InvalidFieldValueFormat { value, .. } => {
                TemplateError::InvalidFieldValueFormat {
                    template: template.to_string(),
                    value,
                }
            }
            TemplateError::MultiWildcardNotLast { .. } => TemplateError::MultiWildcardNotLast {
                template: template.to_string(),
            },
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::InvalidSegmentFormat { template, segment } => {
                write!(
                    f,
                    "create new path segment chain '{}': invalid url segment format: '{}'",
                    template, segment
                )
            }
            TemplateError::InvalidFieldValueFormat { template, value } => {
                write!(
                    f,
                    "create new path segment chain '{}': invalid format of field value template: '{}'",
                    template, value
                )
            }
            TemplateError::MultiWildcardNotLast { template } => {
                write!(
                    f,
                    "create new path segment chain '{}': '**' must be the last segment of the template",
                    template
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}
