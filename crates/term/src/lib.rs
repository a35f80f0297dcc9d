//! Terminal host for `rowkit-registry`: renders the demo list to a writer.

/// Command-line arguments.
pub mod cli;
/// Config file loading and CLI overrides.
pub mod config;
/// Row surfaces, binders and the render loop.
pub mod host;
/// Demo item types.
pub mod items;

// Used only by the `rowkit` binary.
use anyhow as _;
use tracing_subscriber as _;
