use serde::{Deserialize, Serialize};

use crate::router::{Router, RouterError};

/// One route registration: the handler is identified by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub method: String,
    pub template: String,
    pub handler: String,
}

/// A route table file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteConfig {
    /// Build a router whose handlers are the configured handler names
    ///
    /// # Errors
    ///
    /// Returns the first registration error, naming the method and template.
    pub fn into_router(self) -> Result<Router<String>, RouterError> {
        Router::from_routes(
            self.routes
                .into_iter()
                .map(|r| (r.method, r.template, r.handler)),
        )
    }

    /// Try every entry and report all that fail to register
    #[must_use]
    pub fn validate(&self) -> Vec<(&RouteEntry, RouterError)> {
        let mut scratch: Router<()> = Router::new();
        self.routes
            .iter()
            .filter_map(|entry| {
                scratch
                    .register(&entry.method, &entry.template, ())
                    .err()
                    .map(|err| (entry, err))
            })
            .collect()
    }
}
