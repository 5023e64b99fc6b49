//! # protorest
//!
//! **protorest** maps REST-style request paths onto handlers using the path
//! templates of Google's [`google.api.http`](https://cloud.google.com/endpoints/docs/grpc-service-config/reference/rpc/google.api#http)
//! annotation, extracting the bound path variables while it matches.
//!
//! ## Overview
//!
//! A protobuf-to-REST gateway registers one `(method, template)` pair per RPC
//! and, at request time, needs the handler for an incoming `(method, path)`
//! together with the values of the template's variables. This crate is that
//! routing core: it does not speak HTTP itself and never calls handlers.
//!
//! ## Architecture
//!
//! The library is organized into a few modules:
//!
//! - **[`template`]** - Template compiler, segment chains and variable [`Values`](template::Values)
//! - **[`router`]** - Route table keyed by HTTP method, resolving requests to handlers
//! - **[`config`]** - Route tables loaded from YAML, JSON or TOML files
//! - **[`logging`]** - `tracing-subscriber` setup driven by environment variables
//! - **[`cli`]** - The `protorest` command-line tool
//!
//! ### Request Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Gateway
//!     participant Router as router::Router
//!     participant Path as template::Path
//!     participant Segment as template::Segment
//!
//!     Gateway->>Router: register("GET", "/v1/{name=shelves/*}", handler)
//!     Router->>Path: compile(template)
//!     Path-->>Router: segment chain (or TemplateError)
//!
//!     Gateway->>Router: resolve("GET", "/v1/shelves/42")
//!     Router->>Router: split path on "/"
//!     loop templates registered for GET, in order
//!         Router->>Segment: matches(components, values)
//!     end
//!     Router-->>Gateway: RouteMatch { handler, values: {name: "shelves/42"} }
//! ```
//!
//! ## Template Syntax
//!
//! ```text
//! Template  = "/" Segments [ Verb ] ;
//! Segments  = Segment { "/" Segment } ;
//! Segment   = "*" | "**" | LITERAL | Variable ;
//! Variable  = "{" FieldPath [ "=" Segments ] "}" ;
//! FieldPath = IDENT { "." IDENT } ;
//! Verb      = ":" LITERAL ;
//! ```
//!
//! - `*` matches one path component, `**` matches all remaining components
//! - `{field}` captures one component
//! - `{field=a/*/b}` captures several components joined with `/`
//!
//! Matching is case-insensitive; captured values keep the request's case.
//!
//! ## Quick Start
//!
//! ```
//! use protorest::router::Router;
//!
//! let mut router = Router::new();
//! router.register("GET", "/v1/articles", "list_articles").unwrap();
//! router.register("GET", "/v1/articles/{value=data2/symbol/**}", "get_symbol").unwrap();
//!
//! let m = router.resolve("GET", "/v1/articles/data2/symbol/some_data/12345").unwrap();
//! assert_eq!(*m.handler, "get_symbol");
//! assert_eq!(m.get("value"), Some("data2/symbol/some_data/12345"));
//!
//! assert!(router.resolve("POST", "/v1/articles").is_none());
//! ```
//!
//! ## Concurrency
//!
//! Build the router first, then share it read-only. Registration takes
//! `&mut self` and resolution `&self`; there is no internal locking and every
//! resolution allocates its own [`Values`](template::Values).

pub mod cli;
pub mod config;
pub mod logging;
pub mod router;
pub mod template;

pub use config::{load_routes, RouteConfig, RouteEntry};
pub use router::{RouteMatch, Router, RouterError};
pub use template::{Path, Segment, TemplateError, Values};
