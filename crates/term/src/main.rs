use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use rowkit_term::cli::Cli;
use rowkit_term::config::FileConfig;
use rowkit_term::host::TermList;
use tracing::info;
// Used only by the library half of the crate.
use {rowkit_registry as _, rustc_hash as _, serde as _, thiserror as _, toml as _};
#[cfg(test)]
use {pretty_assertions as _, rstest as _, tempfile as _};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = FileConfig::load(cli.config.as_deref())?.with_cli(&cli);
	info!(
		repeat = config.list.repeat,
		width = config.list.width,
		flatten = config.list.flatten,
		policy = %config.registry.duplicate_policy,
		"starting"
	);

	let mut list = TermList::from_config(&config).context("failed to build the list")?;
	info!(handlers = list.dispatcher().registry().len(), "registry ready");

	let mut out = BufWriter::new(io::stdout().lock());
	let stats = list.render(&mut out)?;
	out.flush().context("failed to flush stdout")?;

	info!(rows = stats.rows, surfaces = stats.surfaces, "done");
	Ok(())
}

/// Logs to stderr so rows on stdout stay clean. `RUST_LOG` overrides the
/// default level.
fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(true)
		.init();
}
