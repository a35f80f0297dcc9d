use crate::TypeKey;

/// Registry lookup and registration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// No entry matches the key exactly.
	#[error("no handler registered for type `{key}`")]
	HandlerNotFound { key: TypeKey },

	/// The key is already registered and the registry refuses duplicates.
	#[error("type `{key}` is already registered at index {existing}")]
	DuplicateType { key: TypeKey, existing: usize },
}

/// Errors surfaced by [`Dispatcher`](crate::Dispatcher) calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	#[error(transparent)]
	Registry(#[from] RegistryError),

	/// Position outside `[0, item_count())`.
	#[error("position {position} out of range for {len} items")]
	PositionOutOfRange { position: usize, len: usize },

	/// View-type index the current registry does not hold.
	#[error("view type {index} out of range for {len} registered handlers")]
	UnknownViewType { index: usize, len: usize },

	/// The effective value is not of the type the handler was registered for.
	#[error("handler expects `{expected}` but the effective value is `{found}`")]
	ValueMismatch { expected: TypeKey, found: TypeKey },
}

impl DispatchError {
	/// Key of a [`RegistryError::HandlerNotFound`], if this is one.
	pub fn missing_key(&self) -> Option<TypeKey> {
		match self {
			Self::Registry(RegistryError::HandlerNotFound { key }) => Some(*key),
			_ => None,
		}
	}
}
