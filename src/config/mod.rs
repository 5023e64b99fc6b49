//! # Config Module
//!
//! Loads route tables from YAML, JSON or TOML files so a set of
//! `(method, template, handler)` registrations can live outside the code.
//!
//! ## Format
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     template: /v1/articles/{value}
//!     handler: get_article
//!   - method: GET
//!     template: /v1/articles/{value=data2/symbol/**}
//!     handler: get_symbol
//! ```
//!
//! The same shape in TOML uses `[[routes]]` tables. The format is chosen from
//! the file extension (`.yaml`/`.yml`, `.json`, `.toml`).

mod load;
mod types;

pub use load::{load_routes, parse_routes, RouteFormat};
pub use types::{RouteConfig, RouteEntry};
