//! # CLI Module
//!
//! Command-line interface for inspecting path templates and route tables.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Compile every template in a route table and report the ones that fail:
//!
//! ```bash
//! protorest check --routes routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve a request against a route table and print the match as JSON:
//!
//! ```bash
//! protorest resolve --routes routes.yaml GET /v1/articles/data/12345
//! ```
//!
//! ### `routes`
//!
//! Print the registered table, one `METHOD template -> handler` per line:
//!
//! ```bash
//! protorest routes --routes routes.toml
//! ```
//!
//! ### `compile`
//!
//! Print the compiled segment chain of a single template:
//!
//! ```bash
//! protorest compile '/v1/{name=shelves/*/books/*}'
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use protorest::cli::{run, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run(&cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
