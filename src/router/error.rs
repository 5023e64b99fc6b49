use std::fmt;

use crate::template::TemplateError;

/// Route registration error
///
/// Returned by [`Router::register`](super::Router::register). A route that
/// fails to register is never installed in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The method string is not a valid HTTP method token
    ///
    /// This includes the empty string and any string containing whitespace
    /// or other characters outside the RFC 9110 token set.
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
    /// The template failed to compile
    Template {
        /// Method the template was registered under
        method: String,
        /// The compiler error, carrying the template
        source: TemplateError,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidMethod { method } => {
                write!(f, "invalid HTTP method '{}'", method)
            }
            RouterError::Template { method, source } => {
                write!(f, "add path template for '{}': {}", method, source)
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::InvalidMethod { .. } => None,
            RouterError::Template { source, .. } => Some(source),
        }
    }
}
