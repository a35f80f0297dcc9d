use std::path::PathBuf;

use clap::Parser;

use crate::items::MAX_REPEAT;

#[derive(Parser, Debug)]
#[command(name = "rowkit")]
#[command(about = "Render a heterogeneous list through a type-keyed handler registry")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// TOML config file with `[registry]` and `[list]` tables
	#[arg(long, short = 'c')]
	pub config: Option<PathBuf>,

	/// How many times the text/image/rich triple is repeated
	#[arg(long, short = 'n', value_parser = parse_repeat)]
	pub repeat: Option<usize>,

	/// Row width in columns
	#[arg(long, short = 'w')]
	pub width: Option<usize>,

	/// Wrap every item in a post and dispatch on its content
	#[arg(long)]
	pub flatten: bool,

	/// Enable debug logging
	#[arg(long, short = 'v')]
	pub verbose: bool,
}

fn parse_repeat(value: &str) -> Result<usize, String> {
	let repeat: usize = value.parse::<usize>().map_err(|err| err.to_string())?;
	if repeat > MAX_REPEAT {
		return Err(format!("at most {MAX_REPEAT} repeats are supported"));
	}
	Ok(repeat)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_leave_file_values_alone() {
		let cli = Cli::try_parse_from(["rowkit"]).unwrap();
		assert!(cli.config.is_none());
		assert!(cli.repeat.is_none());
		assert!(cli.width.is_none());
		assert!(!cli.flatten);
		assert!(!cli.verbose);
	}

	#[test]
	fn parses_all_flags() {
		let cli = Cli::try_parse_from([
			"rowkit",
			"--config",
			"list.toml",
			"-n",
			"3",
			"--width",
			"24",
			"--flatten",
			"-v",
		])
		.unwrap();
		assert_eq!(cli.config, Some(PathBuf::from("list.toml")));
		assert_eq!(cli.repeat, Some(3));
		assert_eq!(cli.width, Some(24));
		assert!(cli.flatten);
		assert!(cli.verbose);
	}

	#[test]
	fn rejects_non_numeric_repeat() {
		assert!(Cli::try_parse_from(["rowkit", "--repeat", "many"]).is_err());
	}

	#[test]
	fn rejects_oversized_repeat() {
		let max = MAX_REPEAT.to_string();
		let cli = Cli::try_parse_from(["rowkit", "-n", max.as_str()]).unwrap();
		assert_eq!(cli.repeat, Some(MAX_REPEAT));

		let over = (MAX_REPEAT + 1).to_string();
		assert!(Cli::try_parse_from(["rowkit", "-n", over.as_str()]).is_err());
		let huge = (usize::MAX / 2).to_string();
		assert!(Cli::try_parse_from(["rowkit", "--repeat", huge.as_str()]).is_err());
	}
}
