//! Terminal host configuration.
//!
//! Values come from an optional TOML file and are then overridden by CLI
//! flags. A missing `--config` path means all defaults.

use std::path::{Path, PathBuf};

use rowkit_registry::RegistryConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

/// Errors that can occur when loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading the config file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or schema.
	#[error("TOML parse error in {path}: {error}")]
	Toml {
		path: PathBuf,
		error: toml::de::Error,
	},
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Whole config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
	pub registry: RegistryConfig,
	pub list: ListConfig,
}

/// `[list]` table: what the demo list holds and how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ListConfig {
	pub repeat: usize,
	pub width: usize,
	pub flatten: bool,
}

impl Default for ListConfig {
	fn default() -> Self {
		Self {
			repeat: 20,
			width: 40,
			flatten: false,
		}
	}
}

impl FileConfig {
	/// Reads `path`, or returns defaults when no path is given.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let Some(path) = path else {
			return Ok(Self::default());
		};
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&text).map_err(|error| ConfigError::Toml {
			path: path.to_path_buf(),
			error,
		})
	}

	pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	/// Applies CLI overrides on top of file values.
	pub fn with_cli(mut self, cli: &Cli) -> Self {
		if let Some(repeat) = cli.repeat {
			self.list.repeat = repeat;
		}
		if let Some(width) = cli.width {
			self.list.width = width;
		}
		self.list.flatten |= cli.flatten;
		self
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use clap::Parser;
	use pretty_assertions::assert_eq;
	use rowkit_registry::DuplicatePolicy;

	use super::*;

	#[test]
	fn no_path_yields_defaults() {
		let config = FileConfig::load(None).unwrap();
		assert_eq!(config, FileConfig::default());
		assert_eq!(config.list.repeat, 20);
		assert_eq!(config.list.width, 40);
		assert_eq!(config.registry.initial_capacity, 8);
	}

	#[test]
	fn parses_both_tables() {
		let config = FileConfig::parse(
			r#"
			[registry]
			duplicate-policy = "reject"

			[list]
			repeat = 2
			flatten = true
			"#,
		)
		.unwrap();
		assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Reject);
		assert_eq!(
			config.list,
			ListConfig {
				repeat: 2,
				width: 40,
				flatten: true,
			}
		);
	}

	#[test]
	fn unknown_table_is_rejected() {
		assert!(FileConfig::parse("[colors]\nbg = 1").is_err());
	}

	#[test]
	fn load_reports_path_on_errors() {
		let missing = Path::new("/definitely/not/here/rowkit.toml");
		match FileConfig::load(Some(missing)) {
			Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
			other => panic!("expected I/O error, got {other:?}"),
		}

		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[list]\nrepeat = \"lots\"").unwrap();
		match FileConfig::load(Some(file.path())) {
			Err(ConfigError::Toml { path, .. }) => assert_eq!(path, file.path()),
			other => panic!("expected TOML error, got {other:?}"),
		}
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[list]\nwidth = 12").unwrap();
		let config = FileConfig::load(Some(file.path())).unwrap();
		assert_eq!(config.list.width, 12);
	}

	#[test]
	fn cli_flags_override_file() {
		let file = FileConfig::parse("[list]\nrepeat = 5\nwidth = 30").unwrap();
		let cli = Cli::try_parse_from(["rowkit", "--width", "10", "--flatten"]).unwrap();
		let config = file.with_cli(&cli);
		assert_eq!(
			config.list,
			ListConfig {
				repeat: 5,
				width: 10,
				flatten: true,
			}
		);
	}
}
