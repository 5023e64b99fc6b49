use anyhow::{bail, Context};
use std::path::Path;
use tracing::debug;

use super::types::RouteConfig;

/// Serialization format of a route table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFormat {
    Yaml,
    Json,
    Toml,
}

impl RouteFormat {
    /// Pick the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(RouteFormat::Yaml),
            "json" => Some(RouteFormat::Json),
            "toml" => Some(RouteFormat::Toml),
            _ => None,
        }
    }
}

/// Parse a route table from a string
pub fn parse_routes(content: &str, format: RouteFormat) -> anyhow::Result<RouteConfig> {
    let config = match format {
        RouteFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML route table")?,
        RouteFormat::Json => serde_json::from_str(content).context("invalid JSON route table")?,
        RouteFormat::Toml => toml::from_str(content).context("invalid TOML route table")?,
    };
    Ok(config)
}

/// Load a route table from a file, choosing the format by extension
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<RouteConfig> {
    let path = path.as_ref();
    let Some(format) = RouteFormat::from_path(path) else {
        bail!(
            "unsupported route table extension for '{}' (expected .yaml, .yml, .json or .toml)",
            path.display()
        );
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route table '{}'", path.display()))?;
    let config = parse_routes(&content, format)
        .with_context(|| format!("failed to parse route table '{}'", path.display()))?;

    debug!(
        path = %path.display(),
        format = ?format,
        routes_count = config.routes.len(),
        "Route table loaded"
    );

    Ok(config)
}
