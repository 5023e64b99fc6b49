//! # Router Module
//!
//! The router module maps HTTP methods and `google.api.http` path templates to
//! opaque handlers, and resolves incoming requests to a handler plus the path
//! variables bound while matching.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling templates into segment chains at registration time
//! - Keeping the compiled chains per HTTP method, in registration order
//! - Matching request paths against those chains
//! - Returning the first matching handler with its captured [`Values`](crate::template::Values)
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: each `(method, template, handler)` is compiled via
//!    [`Path::compile`](crate::template::Path::compile); malformed templates are
//!    rejected and never installed.
//!
//! 2. **Resolution**: the request path is split once, then each chain
//!    registered for the method is tried until one matches.
//!
//! Registration must finish before concurrent resolution starts; the router
//! does no internal locking.
//!
//! ## Example
//!
//! ```
//! use protorest::router::Router;
//!
//! let mut router = Router::new();
//! router.register("GET", "/v1/{name=shelves/*}", "get_shelf").unwrap();
//! router.register("GET", "/v1/{name=shelves/*/books/*}", "get_book").unwrap();
//!
//! let m = router.resolve("GET", "/v1/shelves/1/books/2").unwrap();
//! assert_eq!(*m.handler, "get_book");
//! assert_eq!(m.get("name"), Some("shelves/1/books/2"));
//! ```

mod core;
mod error;

pub use self::core::{RouteMatch, Router};
pub use error::RouterError;
