//! Router core module - route table and request resolution.
//!
//! Templates are compiled once at registration time. Resolution splits the
//! request path once and walks the compiled chains registered for the method,
//! in registration order, until one matches.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::error::RouterError;
use crate::template::{split_request_path, Path, Values};

/// Matches slower than this are logged at `warn`.
const SLOW_MATCH_THRESHOLD: Duration = Duration::from_millis(1);

/// A compiled template registered under one HTTP method
struct Route<H> {
    /// Template exactly as registered (e.g. `/v1/{name=shelves/*}`)
    template: Arc<str>,
    path: Path,
    handler: Arc<H>,
}

impl<H> Clone for Route<H> {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            path: self.path.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Result of successfully resolving a request path
///
/// Contains the handler registered for the matching template and the path
/// variables captured while matching.
pub struct RouteMatch<H> {
    /// HTTP method the request was resolved under
    pub method: Method,
    /// Template that matched, as registered
    pub template: Arc<str>,
    /// Handler registered for the template
    pub handler: Arc<H>,
    /// Path variables captured from the request path
    pub values: Values,
}

impl<H> RouteMatch<H> {
    /// Get a captured path variable by name
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field)
    }
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            template: Arc::clone(&self.template),
            handler: Arc::clone(&self.handler),
            values: self.values.clone(),
        }
    }
}

impl<H> fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("method", &self.method)
            .field("template", &self.template)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// Route table mapping HTTP methods and path templates to handlers
///
/// Built once with [`register`](Router::register), then shared read-only for
/// [`resolve`](Router::resolve). There is no internal locking: registration
/// takes `&mut self`, resolution takes `&self`, so a fully built router can be
/// resolved from many threads (when `H: Send + Sync`).
///
/// Handlers are opaque; the router only hands back a reference-counted pointer
/// to the one registered for the matching template.
///
/// # Ordering
///
/// Templates registered under the same method are tried in registration order
/// and the first match wins. Overlapping templates therefore resolve
/// deterministically, but no literal-over-wildcard precedence is applied.
///
/// # Example
///
/// ```
/// use protorest::router::Router;
///
/// let mut router = Router::new();
/// router.register("GET", "/v1/articles/{value}", "get_article").unwrap();
///
/// let m = router.resolve("GET", "/v1/articles/12345").unwrap();
/// assert_eq!(*m.handler, "get_article");
/// assert_eq!(m.get("value"), Some("12345"));
///
/// assert!(router.resolve("POST", "/v1/articles/12345").is_none());
/// ```
pub struct Router<H> {
    routes: HashMap<Method, Vec<Route<H>>>,
    count: usize,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
            count: 0,
        }
    }
}

impl<H> Clone for Router<H> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            count: self.count,
        }
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.templates())
            .finish()
    }
}

impl<H> Router<H> {
    /// Create an empty route table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a route table from `(method, template, handler)` triples
    ///
    /// Stops at the first route that fails to register.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouterError`] raised by [`register`](Router::register).
    pub fn from_routes<I, M, T>(routes: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = (M, T, H)>,
        M: AsRef<str>,
        T: AsRef<str>,
    {
        let mut router = Self::new();
        for (method, template, handler) in routes {
            router.register(method.as_ref(), template.as_ref(), handler)?;
        }

        let summary: Vec<String> = router
            .templates()
            .into_iter()
            .take(10)
            .map(|(method, template)| format!("{method} {template}"))
            .collect();
        info!(
            routes_count = router.len(),
            routes_summary = ?summary,
            "Routing table loaded"
        );

        Ok(router)
    }

    /// Compile `template` and register it with `handler` under `method`
    ///
    /// Multiple templates may share a method; no duplicate or overlap
    /// detection is performed.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidMethod`] if `method` is not a valid HTTP token
    /// - [`RouterError::Template`] if the template does not compile
    pub fn register(&mut self, method: &str, template: &str, handler: H) -> Result<(), RouterError> {
        let parsed = Method::from_bytes(method.as_bytes()).map_err(|_| {
            warn!(method = %method, template = %template, "Rejected route with invalid method");
            RouterError::InvalidMethod {
                method: method.to_string(),
            }
        })?;

        let path = Path::compile(template).map_err(|source| {
            warn!(
                method = %method,
                template = %template,
                error = %source,
                "Rejected route with invalid template"
            );
            RouterError::Template {
                method: method.to_string(),
                source,
            }
        })?;

        debug!(
            method = %parsed,
            template = %template,
            compiled = %path,
            segments = path.len(),
            "Route registered"
        );

        self.routes.entry(parsed).or_default().push(Route {
            template: Arc::from(template),
            path,
            handler: Arc::new(handler),
        });
        self.count += 1;

        Ok(())
    }

    /// Resolve a request to its handler and captured path variables
    ///
    /// Returns `None` when `method` has no registered templates (or is not a
    /// valid HTTP method) or when no template matches `path`.
    #[must_use]
    pub fn resolve(&self, method: &str, path: &str) -> Option<RouteMatch<H>> {
        match Method::from_bytes(method.as_bytes()) {
            Ok(method) => self.route(&method, path),
            Err(_) => {
                warn!(method = %method, path = %path, "No route matched: invalid method");
                None
            }
        }
    }

    /// Resolve a request using an already parsed [`Method`]
    ///
    /// See [`resolve`](Router::resolve).
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch<H>> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();

        let Some(routes) = self.routes.get(method) else {
            warn!(method = %method, path = %path, "No routes registered for method");
            return None;
        };

        let components = split_request_path(path);
        let found = routes.iter().find_map(|route| {
            let mut values = Values::new();
            route
                .path
                .matches_segments(&components, &mut values)
                .then_some((route, values))
        });

        let match_duration = match_start.elapsed();

        let Some((route, values)) = found else {
            warn!(
                method = %method,
                path = %path,
                candidates = routes.len(),
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return None;
        };

        if match_duration > SLOW_MATCH_THRESHOLD {
            warn!(
                method = %method,
                path = %path,
                route_pattern = %route.template,
                path_params = ?values,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                route_pattern = %route.template,
                path_params = ?values,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Some(RouteMatch {
            method: method.clone(),
            template: Arc::clone(&route.template),
            handler: Arc::clone(&route.handler),
            values,
        })
    }

    /// Total number of registered templates across all methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Methods with at least one registered template, sorted by name
    #[must_use]
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.routes.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// All `(method, template)` pairs, methods sorted, templates in
    /// registration order
    #[must_use]
    pub fn templates(&self) -> Vec<(&Method, &str)> {
        self.methods()
            .into_iter()
            .flat_map(|method| {
                self.routes
                    .get(method)
                    .into_iter()
                    .flatten()
                    .map(move |route| (method, route.template.as_ref()))
            })
            .collect()
    }

    /// Iterate `(method, template, handler)` for every registered route
    pub fn iter(&self) -> impl Iterator<Item = (&Method, &str, &H)> {
        self.methods().into_iter().flat_map(move |method| {
            self.routes
                .get(method)
                .into_iter()
                .flatten()
                .map(move |route| (method, route.template.as_ref(), route.handler.as_ref()))
        })
    }
}

impl<H: fmt::Display> Router<H> {
    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.len());
        for (method, template, handler) in self.iter() {
            println!("[route] {method} {template} -> {handler}");
        }
    }
}
