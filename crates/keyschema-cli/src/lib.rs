#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line surface over the keyschema validation engine.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `catalog.rs`: JSON schema catalog loading and key lookup
//! - `commands/`: command handlers grouped by concern
//! - `error.rs`: CLI error type and exit codes
//! - `output.rs`: renderers and formatting helpers
//! - `resolver.rs`: system host-name resolver for CIDR scope queries
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod catalog;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod output;
pub(crate) mod resolver;

pub use cli::run;
