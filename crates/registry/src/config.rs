use serde::Deserialize;

use crate::DuplicatePolicy;

/// Registry settings, usually read from the `[registry]` table of a host
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
	pub duplicate_policy: DuplicatePolicy,
	/// Preallocated entry slots.
	pub initial_capacity: usize,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			duplicate_policy: DuplicatePolicy::default(),
			initial_capacity: 8,
		}
	}
}
