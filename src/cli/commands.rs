use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::config::load_routes;
use crate::template::Path;

/// Command-line interface for protorest
///
/// Compiles `google.api.http` path templates and resolves request paths
/// against route tables.
#[derive(Debug, Parser)]
#[command(name = "protorest")]
#[command(about = "Compile and match google.api.http path templates", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile every template in a route table and report failures
    Check {
        /// Route table file (.yaml, .yml, .json or .toml)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Resolve METHOD and PATH against a route table and print the match as JSON
    Resolve {
        /// Route table file (.yaml, .yml, .json or .toml)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method (e.g. GET)
        method: String,

        /// Request path (e.g. /v1/articles/12345)
        path: String,
    },
    /// Print the registered route table
    Routes {
        /// Route table file (.yaml, .yml, .json or .toml)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Print the compiled segment chain of a template
    Compile {
        /// Path template (e.g. /v1/{name=shelves/*})
        template: String,
    },
}

/// Parse the process arguments and run, writing to stdout
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Run a parsed command, writing its output to `out`
///
/// # Errors
///
/// Fails when a route table cannot be loaded, when `check` finds invalid
/// routes, when `resolve` finds no match, or when `compile` rejects the
/// template.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Check { routes } => {
            let config = load_routes(routes)?;
            let failures = config.validate();
            for (entry, err) in &failures {
                writeln!(out, "FAIL {} {}: {}", entry.method, entry.template, err)?;
            }
            if !failures.is_empty() {
                bail!(
                    "{} of {} routes failed to compile",
                    failures.len(),
                    config.routes.len()
                );
            }
            writeln!(out, "ok: {} routes compiled", config.routes.len())?;
            Ok(())
        }
        Commands::Resolve {
            routes,
            method,
            path,
        } => {
            let router = load_routes(routes)?
                .into_router()
                .with_context(|| format!("failed to build router from '{}'", routes.display()))?;
            let m = router
                .resolve(method, path)
                .ok_or_else(|| anyhow!("no route matched {} {}", method, path))?;
            let body = serde_json::json!({
                "method": m.method.as_str(),
                "template": m.template.as_ref(),
                "handler": m.handler.as_str(),
                "values": &m.values,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            Ok(())
        }
        Commands::Routes { routes } => {
            let router = load_routes(routes)?
                .into_router()
                .with_context(|| format!("failed to build router from '{}'", routes.display()))?;
            for (method, template, handler) in router.iter() {
                writeln!(out, "{method} {template} -> {handler}")?;
            }
            Ok(())
        }
        Commands::Compile { template } => {
            let path = Path::compile(template)?;
            writeln!(out, "{path}")?;
            for (i, segment) in path.segments().enumerate() {
                writeln!(out, "  {i}: {segment}")?;
            }
            Ok(())
        }
    }
}
