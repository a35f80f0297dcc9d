use serde::Deserialize;

/// Policy for registering a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Append the duplicate; lookups keep resolving to the earliest entry.
	#[default]
	FirstWins,
	/// Refuse the duplicate and leave the registry unchanged.
	Reject,
}

impl DuplicatePolicy {
	/// Returns true if duplicates are refused.
	#[inline]
	pub const fn is_strict(self) -> bool {
		matches!(self, Self::Reject)
	}
}

impl std::fmt::Display for DuplicatePolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::FirstWins => f.write_str("first-wins"),
			Self::Reject => f.write_str("reject"),
		}
	}
}
