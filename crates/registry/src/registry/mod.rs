//! Ordered key-to-handler table.
//!
//! # Invariants
//!
//! * `keys` and `handlers` always have the same length; entry `i` is the pair
//!   `(keys[i], handlers[i])`.
//! * Insertion order is preserved. Duplicate keys may coexist under
//!   [`DuplicatePolicy::FirstWins`]; lookups resolve to the earliest entry.
//! * `first` maps every present key to its earliest index and never to any
//!   other, so a hash hit equals the result of a linear first-match scan.

use std::sync::Arc;

use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};
use tracing::{debug, trace, warn};

use crate::{
	DuplicatePolicy, Handler, Host, ItemBinder, RegistryConfig, RegistryError, TypeKey, Typed,
};


/// Ordered collection of `(TypeKey, Handler)` entries.
pub struct TypeRegistry<H: Host> {
	keys: Vec<TypeKey>,
	handlers: Vec<Arc<dyn Handler<H>>>,
	first: HashMap<TypeKey, usize>,
	policy: DuplicatePolicy,
}

impl<H: Host> TypeRegistry<H> {
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			keys: Vec::with_capacity(capacity),
			handlers: Vec::with_capacity(capacity),
			first: HashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
			policy: DuplicatePolicy::default(),
		}
	}

	pub fn with_policy(policy: DuplicatePolicy) -> Self {
		Self {
			policy,
			..Self::new()
		}
	}

	pub fn from_config(config: &RegistryConfig) -> Self {
		Self {
			policy: config.duplicate_policy,
			..Self::with_capacity(config.initial_capacity)
		}
	}

	#[inline]
	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// Appends an entry and returns its index.
	///
	/// Under [`DuplicatePolicy::Reject`] a key that is already present fails
	/// with [`RegistryError::DuplicateType`] and nothing is appended.
	pub fn register(
		&mut self,
		key: TypeKey,
		handler: Arc<dyn Handler<H>>,
	) -> Result<usize, RegistryError> {
		if let Some(&existing) = self.first.get(&key) {
			if self.policy.is_strict() {
				warn!(%key, existing, "duplicate registration rejected");
				return Err(RegistryError::DuplicateType { key, existing });
			}
			debug!(
				%key,
				existing,
				handler = handler.name(),
				"registration shadowed by earlier entry"
			);
		}
		Ok(self.push(key, handler))
	}

	/// Registers a typed binder under the key of its value type.
	pub fn register_binder<B: ItemBinder<H>>(&mut self, binder: B) -> Result<usize, RegistryError> {
		self.register(TypeKey::of::<B::Value>(), Typed::shared(binder))
	}

	/// Registers a typed binder under an explicit key, usually a tag produced
	/// by a flatten adapter.
	pub fn register_binder_as<B: ItemBinder<H>>(
		&mut self,
		key: TypeKey,
		binder: B,
	) -> Result<usize, RegistryError> {
		self.register(key, Typed::shared(binder))
	}

	/// Appends every entry of `other`, in its order, after the existing ones.
	///
	/// Under [`DuplicatePolicy::Reject`] all incoming keys are checked first;
	/// on conflict nothing is appended.
	pub fn register_all(&mut self, other: &TypeRegistry<H>) -> Result<(), RegistryError> {
		if self.policy.is_strict() {
			let mut incoming: HashMap<TypeKey, usize> = HashMap::default();
			for (offset, key) in other.keys.iter().enumerate() {
				let existing = self
					.first
					.get(key)
					.copied()
					.or_else(|| incoming.get(key).map(|i| self.keys.len() + i));
				if let Some(existing) = existing {
					warn!(%key, existing, "bulk import rejected on duplicate type");
					return Err(RegistryError::DuplicateType { key: *key, existing });
				}
				incoming.insert(*key, offset);
			}
		}

		self.keys.reserve(other.len());
		self.handlers.reserve(other.len());
		for (key, handler) in other.iter() {
			self.push(key, handler.clone());
		}
		debug!(imported = other.len(), total = self.len(), "registry imported");
		Ok(())
	}

	/// Index of the first entry whose key equals `key`.
	pub fn index_of(&self, key: TypeKey) -> Result<usize, RegistryError> {
		match self.first.get(&key) {
			Some(&index) => {
				trace!(%key, index, "resolved");
				Ok(index)
			}
			None => {
				trace!(%key, "no handler");
				Err(RegistryError::HandlerNotFound { key })
			}
		}
	}

	/// Handler at a previously resolved index.
	#[inline]
	pub fn handler_at(&self, index: usize) -> Option<&Arc<dyn Handler<H>>> {
		self.handlers.get(index)
	}

	/// Handler of the first entry whose key equals `key`.
	pub fn handler_for(&self, key: TypeKey) -> Result<&Arc<dyn Handler<H>>, RegistryError> {
		let index = self.index_of(key)?;
		Ok(&self.handlers[index])
	}

	/// Registered keys in registration order.
	#[inline]
	pub fn contents(&self) -> &[TypeKey] {
		&self.keys
	}

	/// Registered handlers in registration order, aligned with [`Self::contents`].
	#[inline]
	pub fn handlers(&self) -> &[Arc<dyn Handler<H>>] {
		&self.handlers
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = (TypeKey, &Arc<dyn Handler<H>>)> + '_ {
		self.keys.iter().copied().zip(self.handlers.iter())
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	fn push(&mut self, key: TypeKey, handler: Arc<dyn Handler<H>>) -> usize {
		let index = self.keys.len();
		debug!(%key, index, handler = handler.name(), "registered");
		self.keys.push(key);
		self.handlers.push(handler);
		self.first.entry(key).or_insert(index);
		debug_assert_eq!(self.keys.len(), self.handlers.len());
		index
	}
}

impl<H: Host> Default for TypeRegistry<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: Host> Clone for TypeRegistry<H> {
	fn clone(&self) -> Self {
		Self {
			keys: self.keys.clone(),
			handlers: self.handlers.clone(),
			first: self.first.clone(),
			policy: self.policy,
		}
	}
}

impl<H: Host> std::fmt::Debug for TypeRegistry<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("policy", &self.policy)
			.field(
				"entries",
				&self.iter().map(|(key, h)| (key, h.name())).collect::<Vec<_>>(),
			)
			.finish()
	}
}
