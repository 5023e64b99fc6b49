//! # Template Module
//!
//! Compiles `google.api.http` path templates into segment chains and matches
//! request paths against them, collecting bound path variables.
//!
//! ## Overview
//!
//! - [`Path::compile`] parses a template such as `/v1/{name=shelves/*}` into a
//!   singly linked chain of [`Segment`]s.
//! - [`Segment::matches`] walks that chain against the split request path.
//! - [`Values`] collects the captured variables, concatenating the components
//!   of multi-segment (`{field=a/*/b}`) captures with `/`.
//!
//! ## Matching rules
//!
//! | Segment | Behaviour |
//! |---------|-----------|
//! | literal | equals the next component, case-insensitively |
//! | `*` (last) | zero or one remaining component |
//! | `*` (not last) | one component, or skipped if the path ran out |
//! | `**` | everything that remains, always matches |
//!
//! `**` must be the last segment; templates with segments after it are
//! rejected by the compiler.
//!
//! ## Example
//!
//! ```
//! use protorest::template::Path;
//!
//! let path = Path::compile("/v1/articles/{value=data2/symbol/**}").unwrap();
//!
//! let values = path.matches("/v1/articles/data2/symbol/some_data/12345").unwrap();
//! assert_eq!(values.get("value"), Some("data2/symbol/some_data/12345"));
//!
//! let values = path.matches("/v1/articles/data2/symbol").unwrap();
//! assert_eq!(values.get("value"), Some("data2/symbol"));
//! ```

mod error;
mod path;
mod segment;
#[cfg(test)]
mod tests;
mod values;

pub use error::TemplateError;
pub use path::{split_request_path, Path, PathComponents, Segments, MAX_INLINE_COMPONENTS};
pub use segment::{Segment, MULTI_WILDCARD, SINGLE_WILDCARD};
pub use values::{Values, MAX_INLINE_VALUES};
